use super::sink::{SinkFactory, VideoSink};
use crate::error::{RecordingError, Result, ThermcamError};
use crate::session::{RecordingState, SessionState};
use chrono::{DateTime, Local, TimeZone};
use image::RgbImage;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

const ELAPSED_PREFIX: &str = "Rec:";

/// File name for a capture taken at `at`: `YYYYMMDD_HHMMSS` followed by `suffix`.
///
/// Names only have one-second resolution; two captures within the same second collide.
pub fn timestamped_name<Tz>(at: &DateTime<Tz>, suffix: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("{}{}", at.format("%Y%m%d_%H%M%S"), suffix)
}

/// Zero-padded `HH:MM:SS`
pub fn format_hms(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Recording clock label, e.g. `Rec:01:02:05`
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{}{}", ELAPSED_PREFIX, format_hms(elapsed))
}

struct ActiveRecording {
    sink: Box<dyn VideoSink>,
    path: PathBuf,
    frame_size: (u32, u32),
    frames_written: u64,
}

/// Owns the video sink and drives the session's recording sub-state
pub struct RecordingController {
    factory: Box<dyn SinkFactory>,
    output_dir: PathBuf,
    fps: u32,
    active: Option<ActiveRecording>,
}

impl RecordingController {
    pub fn new(factory: Box<dyn SinkFactory>, output_dir: impl Into<PathBuf>, fps: u32) -> Self {
        Self {
            factory,
            output_dir: output_dir.into(),
            fps,
            active: None,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Path of the file currently being written
    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.path.as_path())
    }

    /// Still-image path for a save taken at `at`
    pub fn still_path(&self, at: &DateTime<Local>) -> PathBuf {
        self.output_dir.join(timestamped_name(at, ".png"))
    }

    /// Idle -> Active. Opens a sink sized to the current display resolution.
    ///
    /// If the sink cannot be opened the session stays idle and the error is returned
    /// for the caller to report.
    pub fn start(&mut self, session: &mut SessionState, now: DateTime<Local>) -> Result<PathBuf> {
        if self.active.is_some() || session.is_recording() {
            return Err(ThermcamError::component(
                "recording",
                "Recording already in progress",
            ));
        }

        let frame_size = session.display_size();
        let path = self.output_dir.join(timestamped_name(&now, ".avi"));
        let sink = self.factory.open(&path, self.fps, frame_size)?;

        session.begin_recording(now);
        info!(
            "Recording started: {} ({}x{} @ {}fps)",
            path.display(),
            frame_size.0,
            frame_size.1,
            self.fps
        );

        self.active = Some(ActiveRecording {
            sink,
            path: path.clone(),
            frame_size,
            frames_written: 0,
        });
        Ok(path)
    }

    /// Append a composed frame. A failing sink is released and the session returns to idle.
    pub fn write(&mut self, session: &mut SessionState, frame: &RgbImage) -> Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };

        let result = if frame.dimensions() != active.frame_size {
            Err(RecordingError::Write {
                details: format!(
                    "frame is {:?}, recording started at {:?}",
                    frame.dimensions(),
                    active.frame_size
                ),
            }
            .into())
        } else {
            active.sink.write_frame(frame)
        };

        match result {
            Ok(()) => {
                if let Some(active) = self.active.as_mut() {
                    active.frames_written += 1;
                }
                Ok(())
            }
            Err(e) => {
                error!("Recording write failed, stopping recording: {}", e);
                if let Err(stop_err) = self.stop(session) {
                    warn!("Failed to release video sink: {}", stop_err);
                }
                Err(e)
            }
        }
    }

    /// Active -> Idle. Releases the sink; the session is idle even if finalizing fails.
    pub fn stop(&mut self, session: &mut SessionState) -> Result<Option<PathBuf>> {
        session.end_recording();

        let Some(active) = self.active.take() else {
            return Ok(None);
        };

        let ActiveRecording {
            sink,
            path,
            frames_written,
            ..
        } = active;
        sink.finish()?;

        info!(
            "Recording stopped: {} ({} frames)",
            path.display(),
            frames_written
        );
        Ok(Some(path))
    }

    /// Elapsed-time label while recording
    pub fn elapsed_label(&self, session: &SessionState, now: DateTime<Local>) -> Option<String> {
        match session.recording() {
            RecordingState::Active { started_at } => {
                let elapsed = (now - started_at).to_std().unwrap_or_default();
                Some(format_elapsed(elapsed))
            }
            RecordingState::Idle => None,
        }
    }
}

impl Drop for RecordingController {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            warn!(
                "Recording {} still open at shutdown; finalizing",
                active.path.display()
            );
            if let Err(e) = active.sink.finish() {
                error!("Failed to finalize {}: {}", active.path.display(), e);
            }
        }
    }
}
