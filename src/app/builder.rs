use super::viewer::ThermalViewer;
use crate::camera::FrameSource;
use crate::display::{HeadlessPresenter, Presenter};
use crate::error::{Result, ThermcamError};
use crate::keyboard_input::{InputSource, ScriptedInput};
use crate::overlay::{OverlayLayout, OverlayPainter};
use crate::recording::{RecordingController, UnavailableSinkFactory};
use crate::render::FrameRenderer;
use crate::session::SessionState;
use std::time::Duration;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(37);

/// Builder for [`ThermalViewer`]; session and frame source are required
pub struct ThermalViewerBuilder {
    session: Option<SessionState>,
    source: Option<Box<dyn FrameSource>>,
    renderer: Option<FrameRenderer>,
    recorder: Option<RecordingController>,
    presenter: Option<Box<dyn Presenter>>,
    input: Option<Box<dyn InputSource>>,
    poll_interval: Duration,
}

impl ThermalViewerBuilder {
    pub fn new() -> Self {
        Self {
            session: None,
            source: None,
            renderer: None,
            recorder: None,
            presenter: None,
            input: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn session(mut self, session: SessionState) -> Self {
        self.session = Some(session);
        self
    }

    pub fn source(mut self, source: Box<dyn FrameSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn renderer(mut self, renderer: FrameRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn recorder(mut self, recorder: RecordingController) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn input(mut self, input: Box<dyn InputSource>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn build(self) -> Result<ThermalViewer> {
        let session = self
            .session
            .ok_or_else(|| ThermcamError::system("Session state must be specified"))?;
        let source = self
            .source
            .ok_or_else(|| ThermcamError::system("Frame source must be specified"))?;

        Ok(ThermalViewer {
            session,
            source,
            renderer: self.renderer.unwrap_or_else(|| {
                FrameRenderer::new(OverlayLayout::default(), OverlayPainter::without_text(13.0))
            }),
            recorder: self.recorder.unwrap_or_else(|| {
                RecordingController::new(Box::new(UnavailableSinkFactory), ".", 25)
            }),
            presenter: self
                .presenter
                .unwrap_or_else(|| Box::new(HeadlessPresenter::new())),
            input: self
                .input
                .unwrap_or_else(|| Box::new(ScriptedInput::default())),
            poll_interval: self.poll_interval,
            last_frame: None,
            frames_rendered: 0,
            frames_dropped: 0,
        })
    }
}

impl Default for ThermalViewerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
