use crate::mapping::DisplayPoint;
use image::Rgb;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// One drawing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: Rgb<u8>,
    pub thickness: u32,
}

/// Optional thick outline pass followed by a thin fill pass.
///
/// Drawing a dark stroke under a light one keeps overlays legible on any color map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub outline: Option<Stroke>,
    pub fill: Stroke,
}

impl StrokeStyle {
    pub fn single(color: Rgb<u8>) -> Self {
        Self {
            outline: None,
            fill: Stroke {
                color,
                thickness: 1,
            },
        }
    }

    pub fn outlined(outline: Rgb<u8>, outline_thickness: u32, fill: Rgb<u8>) -> Self {
        Self {
            outline: Some(Stroke {
                color: outline,
                thickness: outline_thickness.max(1),
            }),
            fill: Stroke {
                color: fill,
                thickness: 1,
            },
        }
    }

    /// Passes in drawing order
    pub fn passes(&self) -> impl Iterator<Item = Stroke> {
        self.outline.into_iter().chain(std::iter::once(self.fill))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Line {
        from: DisplayPoint,
        to: DisplayPoint,
    },
    Marker {
        center: DisplayPoint,
        radius: u32,
    },
    /// Text anchored at the left end of its baseline
    Text {
        origin: DisplayPoint,
        text: String,
    },
    Rect {
        top_left: DisplayPoint,
        bottom_right: DisplayPoint,
    },
}

/// A display-space placement request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayElement {
    pub shape: Shape,
    pub style: StrokeStyle,
}

impl OverlayElement {
    pub fn new(shape: Shape, style: StrokeStyle) -> Self {
        Self { shape, style }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
