use super::viewer::ThermalViewer;
use tracing::{error, info};

impl ThermalViewer {
    /// Release the recording sink if one is open
    pub fn shutdown(&mut self) {
        info!("Beginning graceful shutdown");

        if self.recorder.is_active() {
            match self.recorder.stop(&mut self.session) {
                Ok(Some(path)) => info!("Recording {} finalized", path.display()),
                Ok(None) => {}
                Err(e) => error!("Error finalizing recording: {}", e),
            }
        }

        info!(
            "Shutdown complete ({} frames rendered, {} dropped)",
            self.frames_rendered, self.frames_dropped
        );
    }
}
