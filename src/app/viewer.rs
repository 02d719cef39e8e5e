use crate::camera::FrameSource;
use crate::display::Presenter;
use crate::keyboard_input::InputSource;
use crate::recording::RecordingController;
use crate::render::{FrameRenderer, RenderedFrame};
use crate::session::SessionState;
use std::time::Duration;

/// Single-threaded frame loop tying the session to its collaborators.
///
/// Each iteration captures one frame, composes it, records and presents it, then
/// polls for at most one key before moving on.
pub struct ThermalViewer {
    pub(super) session: SessionState,
    pub(super) source: Box<dyn FrameSource>,
    pub(super) renderer: FrameRenderer,
    pub(super) recorder: RecordingController,
    pub(super) presenter: Box<dyn Presenter>,
    pub(super) input: Box<dyn InputSource>,
    pub(super) poll_interval: Duration,

    pub(super) last_frame: Option<RenderedFrame>,
    pub(super) frames_rendered: u64,
    pub(super) frames_dropped: u64,
}

impl ThermalViewer {
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn recorder(&self) -> &RecordingController {
        &self.recorder
    }

    /// Most recently composed frame
    pub fn last_frame(&self) -> Option<&RenderedFrame> {
        self.last_frame.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
