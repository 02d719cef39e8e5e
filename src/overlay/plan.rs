use super::style::{OverlayElement, Shape, StrokeStyle, BLACK, BLUE, RED, WHITE};
use crate::config::OverlayConfig;
use crate::error::Result;
use crate::extremum::{self, ExtremumResult};
use crate::mapping::{DisplayPoint, DisplayScale, SensorPoint};
use crate::radiometry::decode;
use crate::session::SessionState;
use ndarray::ArrayView2;

// Display-space text anchors
const CENTER_TEXT_RIGHT_INSET: i32 = 65;
const CENTER_TEXT_BOTTOM_INSET: i32 = 4;
const TOP_TEXT_BASELINE: i32 = 11;
const REC_TEXT_RIGHT_INSET: i32 = 88;
// Sensor-space label offset from a marker
const LABEL_OFFSET: (i32, i32) = (2, 7);

/// Geometry and stroke widths for overlay elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    pub text_outline_width: u32,
    pub marker_outline_width: u32,
    pub marker_radius: u32,
    pub crosshair_half_length: u32,
}

impl OverlayLayout {
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self {
            text_outline_width: config.text_outline_width,
            marker_outline_width: config.marker_outline_width,
            marker_radius: config.marker_radius,
            crosshair_half_length: config.crosshair_half_length,
        }
    }

    fn text_style(&self) -> StrokeStyle {
        StrokeStyle::outlined(BLACK, self.text_outline_width, WHITE)
    }
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self::from_config(&OverlayConfig::default())
    }
}

/// Everything the frame loop needs to draw for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayPlan {
    pub elements: Vec<OverlayElement>,
    /// Extremum scan for this frame, when markers were requested
    pub extremes: Option<ExtremumResult>,
}

/// Decide which overlay elements to draw for the current frame and where.
///
/// The thermal plane is only read when the crosshair or markers are enabled, and the
/// extremum scan runs only for markers.
pub fn plan_overlay(
    session: &SessionState,
    thermal: &ArrayView2<'_, u16>,
    layout: &OverlayLayout,
    recording_label: Option<&str>,
) -> Result<OverlayPlan> {
    let (rows, cols) = thermal.dim();
    let (sensor_w, sensor_h) = (cols as i32, rows as i32);
    let scale = session.display_scale();
    let (display_w, display_h) = scale.display_size(cols as u32, rows as u32);
    let (display_w, display_h) = (display_w as i32, display_h as i32);
    let unit = session.unit();
    let text_style = layout.text_style();

    let mut elements = Vec::new();
    let mut extremes = None;

    if session.crosshair_enabled() {
        let cx = display_w / 2;
        let cy = display_h / 2;
        let half = layout.crosshair_half_length as i32;
        elements.push(OverlayElement::new(
            Shape::Line {
                from: DisplayPoint::new(cx - half, cy),
                to: DisplayPoint::new(cx + half, cy),
            },
            StrokeStyle::single(RED),
        ));
        elements.push(OverlayElement::new(
            Shape::Line {
                from: DisplayPoint::new(cx, cy - half),
                to: DisplayPoint::new(cx, cy + half),
            },
            StrokeStyle::single(RED),
        ));

        let reading = decode(thermal, cols / 2, rows / 2, unit);
        elements.push(OverlayElement::new(
            Shape::Text {
                origin: DisplayPoint::new(
                    display_w - CENTER_TEXT_RIGHT_INSET,
                    display_h - CENTER_TEXT_BOTTOM_INSET,
                ),
                text: reading.to_string(),
            },
            text_style,
        ));
    }

    if session.hud_enabled() {
        let found = extremum::scan(thermal, session.border_inset())?;
        let markers = [
            (found.max, StrokeStyle::outlined(BLACK, layout.marker_outline_width, RED)),
            (found.min, StrokeStyle::outlined(BLUE, layout.marker_outline_width, WHITE)),
        ];

        for (point, style) in markers {
            elements.push(OverlayElement::new(
                Shape::Marker {
                    center: scale.to_display(point),
                    radius: layout.marker_radius,
                },
                style,
            ));

            if session.labels_enabled() {
                let reading = decode(thermal, point.x as usize, point.y as usize, unit);
                elements.push(OverlayElement::new(
                    Shape::Text {
                        origin: scale.to_display(point.offset(LABEL_OFFSET.0, LABEL_OFFSET.1)),
                        text: reading.to_string(),
                    },
                    text_style,
                ));
            }
        }

        extremes = Some(found);
    }

    if session.info_enabled() {
        elements.push(OverlayElement::new(
            Shape::Text {
                origin: DisplayPoint::new(0, TOP_TEXT_BASELINE),
                text: session.color_map().name().to_string(),
            },
            text_style,
        ));
        elements.push(search_area(scale, session.border_inset() as i32, sensor_w, sensor_h));
    }

    if let Some(label) = recording_label {
        elements.push(OverlayElement::new(
            Shape::Text {
                origin: DisplayPoint::new(
                    scale.scale(sensor_w) - REC_TEXT_RIGHT_INSET,
                    TOP_TEXT_BASELINE,
                ),
                text: label.to_string(),
            },
            text_style,
        ));
    }

    Ok(OverlayPlan { elements, extremes })
}

fn search_area(scale: DisplayScale, border: i32, sensor_w: i32, sensor_h: i32) -> OverlayElement {
    OverlayElement::new(
        Shape::Rect {
            top_left: scale.to_display(SensorPoint::new(border, border)),
            bottom_right: scale.to_display(SensorPoint::new(sensor_w - border, sensor_h - border)),
        },
        StrokeStyle::single(RED),
    )
}
