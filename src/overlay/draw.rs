use super::style::{OverlayElement, Shape, Stroke};
use crate::config::OverlayConfig;
use crate::error::{DisplayError, Result};
use crate::mapping::DisplayPoint;
use image::RgbImage;
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    draw_text_mut,
};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use std::fs;
use tracing::{debug, warn};

/// Rasterizes planned overlay elements onto a composed frame
pub struct OverlayPainter {
    font: Option<Font<'static>>,
    scale: Scale,
}

impl OverlayPainter {
    /// Load the configured font. A missing or unreadable font disables text drawing
    /// but keeps the shape overlays.
    pub fn load(config: &OverlayConfig) -> Self {
        let scale = Scale::uniform(config.font_size);
        match Self::read_font(&config.font_path) {
            Ok(font) => {
                debug!(
                    "Loaded overlay font {} at size {}",
                    config.font_path, config.font_size
                );
                Self {
                    font: Some(font),
                    scale,
                }
            }
            Err(e) => {
                warn!("Overlay text disabled: {}", e);
                Self::without_text(config.font_size)
            }
        }
    }

    pub fn without_text(font_size: f32) -> Self {
        Self {
            font: None,
            scale: Scale::uniform(font_size),
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    fn read_font(path: &str) -> Result<Font<'static>> {
        let data = fs::read(path).map_err(|e| DisplayError::FontLoad {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Font::try_from_vec(data).ok_or_else(|| {
            DisplayError::FontLoad {
                path: path.to_string(),
                details: "not a TrueType font".to_string(),
            }
            .into()
        })
    }

    pub fn draw(&self, image: &mut RgbImage, elements: &[OverlayElement]) {
        for element in elements {
            for stroke in element.style.passes() {
                self.draw_pass(image, &element.shape, stroke);
            }
        }
    }

    fn draw_pass(&self, image: &mut RgbImage, shape: &Shape, stroke: Stroke) {
        match shape {
            Shape::Line { from, to } => {
                for (dx, dy) in offsets(stroke.thickness) {
                    draw_line_segment_mut(
                        image,
                        ((from.x + dx) as f32, (from.y + dy) as f32),
                        ((to.x + dx) as f32, (to.y + dy) as f32),
                        stroke.color,
                    );
                }
            }
            Shape::Marker { center, radius } => {
                let radius = *radius as i32;
                if stroke.thickness > 1 {
                    let outer = radius + spread(stroke.thickness);
                    draw_filled_circle_mut(image, (center.x, center.y), outer, stroke.color);
                } else {
                    draw_hollow_circle_mut(image, (center.x, center.y), radius, stroke.color);
                }
            }
            Shape::Rect {
                top_left,
                bottom_right,
            } => {
                for (dx, dy) in offsets(stroke.thickness) {
                    let rect = rect_between(*top_left, *bottom_right, dx, dy);
                    draw_hollow_rect_mut(image, rect, stroke.color);
                }
            }
            Shape::Text { origin, text } => {
                let Some(font) = &self.font else {
                    return;
                };
                // draw_text_mut positions the top of the line box
                let ascent = font.v_metrics(self.scale).ascent.round() as i32;
                let top = origin.y - ascent;
                for (dx, dy) in offsets(stroke.thickness) {
                    draw_text_mut(
                        image,
                        stroke.color,
                        origin.x + dx,
                        top + dy,
                        self.scale,
                        font,
                        text,
                    );
                }
            }
        }
    }
}

fn spread(thickness: u32) -> i32 {
    (thickness / 2) as i32
}

fn offsets(thickness: u32) -> impl Iterator<Item = (i32, i32)> {
    let s = spread(thickness);
    (-s..=s).flat_map(move |dy| (-s..=s).map(move |dx| (dx, dy)))
}

fn rect_between(a: DisplayPoint, b: DisplayPoint, dx: i32, dy: i32) -> Rect {
    let left = a.x.min(b.x) + dx;
    let top = a.y.min(b.y) + dy;
    let width = (a.x - b.x).unsigned_abs() + 1;
    let height = (a.y - b.y).unsigned_abs() + 1;
    Rect::at(left, top).of_size(width, height)
}
