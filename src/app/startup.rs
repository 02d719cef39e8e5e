use super::builder::ThermalViewerBuilder;
use super::viewer::ThermalViewer;
use crate::camera::open_source;
use crate::config::ThermcamConfig;
use crate::display::open_presenter;
use crate::error::Result;
use crate::keyboard_input::InputSource;
use crate::recording::{default_sink_factory, RecordingController};
use crate::render::FrameRenderer;
use crate::session::SessionState;
use std::fs;
use std::time::Duration;
use tracing::info;

impl ThermalViewer {
    /// Wire every collaborator from configuration
    pub fn from_config(config: &ThermcamConfig, input: Box<dyn InputSource>) -> Result<Self> {
        info!("Initializing thermal viewer components");

        let session = SessionState::from_config(&config.session, config.camera.sensor_resolution)?;
        let source = open_source(&config.camera)?;
        let renderer = FrameRenderer::from_config(&config.overlay);

        fs::create_dir_all(&config.recording.output_dir)?;
        let recorder = RecordingController::new(
            default_sink_factory(),
            config.recording.output_dir.clone(),
            config.recording.fps,
        );

        let presenter = open_presenter(&config.display)?;

        let viewer = ThermalViewerBuilder::new()
            .session(session)
            .source(source)
            .renderer(renderer)
            .recorder(recorder)
            .presenter(presenter)
            .input(input)
            .poll_interval(Duration::from_millis(config.display.poll_interval_ms))
            .build()?;

        info!("All components initialized successfully");
        Ok(viewer)
    }
}
