use super::types::{ExitReason, RunSummary};
use super::viewer::ThermalViewer;
use crate::error::{Result, ThermcamError};
use crate::frame::RawSensorFrame;
use crate::session::{Effect, Outcome};
use chrono::Local;
use std::path::PathBuf;
use tracing::{debug, error, info, trace, warn};

impl ThermalViewer {
    /// Run the frame loop until the stream ends or the user quits
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Thermal viewer is running");

        let reason = loop {
            match self.source.next_frame() {
                Ok(Some(frame)) => {
                    if let Err(e) = self.process_frame(&frame) {
                        self.shutdown();
                        return Err(e);
                    }
                }
                Ok(None) => break ExitReason::EndOfStream,
                Err(ThermcamError::Frame(e)) => {
                    self.frames_dropped += 1;
                    warn!("Dropping malformed sensor frame: {}", e);
                }
                Err(e) => {
                    error!("Frame source failed: {}", e);
                    self.shutdown();
                    return Err(e);
                }
            }

            match self.poll_input() {
                Ok(Some(reason)) => break reason,
                Ok(None) => {}
                Err(e) => {
                    self.shutdown();
                    return Err(e);
                }
            }
        };

        info!("Frame loop ended: {:?}", reason);
        self.shutdown();

        Ok(RunSummary {
            reason,
            frames_rendered: self.frames_rendered,
            frames_dropped: self.frames_dropped,
        })
    }

    /// Compose, record and present one frame
    pub fn process_frame(&mut self, frame: &RawSensorFrame) -> Result<()> {
        let geometry = (frame.sensor_width() as u32, frame.sensor_height() as u32);
        if geometry != self.session.sensor_resolution() {
            self.frames_dropped += 1;
            let expected = self.session.sensor_resolution();
            warn!(
                "Dropping frame {}: planes are {}x{}, session expects {}x{}",
                frame.id, geometry.0, geometry.1, expected.0, expected.1
            );
            return Ok(());
        }

        if self.frames_rendered == 0 {
            debug!(
                "First frame: {}x{} stacked, {}x{} per plane, display {}x{}",
                frame.raw().ncols(),
                frame.raw().nrows(),
                geometry.0,
                geometry.1,
                self.session.display_size().0,
                self.session.display_size().1
            );
        }

        let label = self.recorder.elapsed_label(&self.session, Local::now());
        let rendered = self
            .renderer
            .render(frame, &self.session, label.as_deref())?;

        if let Err(e) = self.recorder.write(&mut self.session, &rendered.image) {
            error!("Recording stopped: {}", e);
        }

        self.presenter.present(&rendered.image)?;

        self.frames_rendered += 1;
        self.last_frame = Some(rendered);
        Ok(())
    }

    /// Wait for at most one key and act on it
    fn poll_input(&mut self) -> Result<Option<ExitReason>> {
        let Some(key) = self.input.poll_key(self.poll_interval)? else {
            return Ok(None);
        };

        match self.session.handle_key(key) {
            Outcome::Changed => {
                debug!("Key '{}' applied", key);
                Ok(None)
            }
            Outcome::Rejected(rejection) => {
                debug!("Key '{}' rejected: {:?}", key, rejection);
                Ok(None)
            }
            Outcome::Ignored => {
                trace!("Key '{}' ignored", key);
                Ok(None)
            }
            Outcome::Effect(effect) => Ok(self.perform(effect)),
        }
    }

    fn perform(&mut self, effect: Effect) -> Option<ExitReason> {
        match effect {
            Effect::SaveStill => {
                match self.save_still() {
                    Ok(path) => info!("Saved still image {}", path.display()),
                    Err(e) => error!("Failed to save still image: {}", e),
                }
                None
            }
            Effect::StartRecording => {
                if let Err(e) = self.recorder.start(&mut self.session, Local::now()) {
                    error!("Failed to start recording: {}", e);
                }
                None
            }
            Effect::StopRecording => {
                match self.recorder.stop(&mut self.session) {
                    Ok(Some(path)) => info!("Saved recording {}", path.display()),
                    Ok(None) => {}
                    Err(e) => error!("Failed to finalize recording: {}", e),
                }
                None
            }
            Effect::Quit => {
                info!("Quit key pressed - requesting shutdown");
                Some(ExitReason::UserRequest)
            }
        }
    }

    /// Write the last composed frame as PNG into the output directory
    pub fn save_still(&self) -> Result<PathBuf> {
        let rendered = self
            .last_frame
            .as_ref()
            .ok_or_else(|| ThermcamError::component("still", "No frame has been rendered yet"))?;

        let path = self.recorder.still_path(&Local::now());
        rendered
            .image
            .save_with_format(&path, image::ImageFormat::Png)?;
        Ok(path)
    }
}
