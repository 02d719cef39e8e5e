use crate::colormap::ColorMap;
use crate::config::OverlayConfig;
use crate::error::Result;
use crate::extremum::ExtremumResult;
use crate::frame::RawSensorFrame;
use crate::overlay::{plan_overlay, OverlayLayout, OverlayPainter};
use crate::session::SessionState;
use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::trace;

/// A composed display image plus what was measured while composing it
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub frame_id: u64,
    pub image: RgbImage,
    pub extremes: Option<ExtremumResult>,
}

/// Turns one sensor frame into the image that is shown, recorded and saved
pub struct FrameRenderer {
    layout: OverlayLayout,
    painter: OverlayPainter,
}

impl FrameRenderer {
    pub fn new(layout: OverlayLayout, painter: OverlayPainter) -> Self {
        Self { layout, painter }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(
            OverlayLayout::from_config(config),
            OverlayPainter::load(config),
        )
    }

    /// Colorized, upscaled visible plane without overlays
    pub fn compose_base(frame: &RawSensorFrame, color_map: ColorMap, size: (u32, u32)) -> RgbImage {
        let colored = color_map.apply(&frame.visible_luma());
        if colored.dimensions() == size {
            return colored;
        }
        imageops::resize(&colored, size.0, size.1, FilterType::CatmullRom)
    }

    /// Full composition: base image, then every enabled overlay
    pub fn render(
        &self,
        frame: &RawSensorFrame,
        session: &SessionState,
        recording_label: Option<&str>,
    ) -> Result<RenderedFrame> {
        let mut image = Self::compose_base(frame, session.color_map(), session.display_size());

        let thermal = frame.thermal();
        let plan = plan_overlay(session, &thermal, &self.layout, recording_label)?;
        self.painter.draw(&mut image, &plan.elements);

        trace!(
            "Rendered frame {} with {} overlay elements",
            frame.id,
            plan.elements.len()
        );

        Ok(RenderedFrame {
            frame_id: frame.id,
            image,
            extremes: plan.extremes,
        })
    }
}
