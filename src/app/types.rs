/// Why the frame loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The frame source ran out of frames
    EndOfStream,
    /// Quit key pressed
    UserRequest,
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: ExitReason,
    pub frames_rendered: u64,
    pub frames_dropped: u64,
}
