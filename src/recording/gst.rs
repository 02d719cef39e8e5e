use super::sink::{SinkFactory, VideoSink};
use crate::error::{RecordingError, Result};
use gstreamer::prelude::*;
use gstreamer::{ClockTime, MessageView, Pipeline};
use gstreamer_app::AppSrc;
use image::RgbImage;
use std::path::Path;
use tracing::{debug, info, warn};

const FINALIZE_TIMEOUT_SECS: u64 = 5;

/// MJPEG-in-AVI encoder built on a GStreamer appsrc pipeline
#[derive(Debug, Default, Clone, Copy)]
pub struct AviSinkFactory;

impl SinkFactory for AviSinkFactory {
    fn open(&self, path: &Path, fps: u32, frame_size: (u32, u32)) -> Result<Box<dyn VideoSink>> {
        let path_str = path.to_string_lossy().to_string();
        let open_error = |details: String| RecordingError::SinkOpen {
            path: path_str.clone(),
            details,
        };

        gstreamer::init().map_err(|e| open_error(format!("GStreamer init failed: {}", e)))?;

        let (width, height) = frame_size;
        let pipeline_desc = format!(
            "appsrc name=src format=time is-live=false do-timestamp=false \
             caps=video/x-raw,format=RGB,width={},height={},framerate={}/1 ! \
             videoconvert ! jpegenc ! avimux ! filesink name=file",
            width, height, fps
        );
        debug!("Recording pipeline: {}", pipeline_desc);

        let pipeline = gstreamer::parse::launch(&pipeline_desc)
            .map_err(|e| open_error(format!("Failed to create pipeline: {}", e)))?
            .downcast::<Pipeline>()
            .map_err(|_| open_error("Failed to downcast to Pipeline".to_string()))?;

        let filesink = pipeline
            .by_name("file")
            .ok_or_else(|| open_error("Failed to get filesink element".to_string()))?;
        filesink.set_property("location", &path_str);

        let appsrc = pipeline
            .by_name("src")
            .ok_or_else(|| open_error("Failed to get appsrc element".to_string()))?
            .downcast::<AppSrc>()
            .map_err(|_| open_error("Failed to downcast to AppSrc".to_string()))?;
        appsrc.set_property("format", gstreamer::Format::Time);

        pipeline
            .set_state(gstreamer::State::Playing)
            .map_err(|e| open_error(format!("Failed to start pipeline: {}", e)))?;

        info!(
            "Opened AVI sink {} ({}x{} @ {}fps)",
            path_str, width, height, fps
        );

        Ok(Box::new(AviSink {
            pipeline,
            appsrc,
            fps: u64::from(fps),
            frame_size,
            frame_index: 0,
        }))
    }
}

pub struct AviSink {
    pipeline: Pipeline,
    appsrc: AppSrc,
    fps: u64,
    frame_size: (u32, u32),
    frame_index: u64,
}

impl VideoSink for AviSink {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()> {
        if frame.dimensions() != self.frame_size {
            return Err(RecordingError::Write {
                details: format!(
                    "frame is {:?}, sink expects {:?}",
                    frame.dimensions(),
                    self.frame_size
                ),
            }
            .into());
        }

        let frame_duration = 1_000_000_000 / self.fps;
        let mut buffer = gstreamer::Buffer::from_slice(frame.as_raw().clone());
        if let Some(buffer) = buffer.get_mut() {
            buffer.set_pts(ClockTime::from_nseconds(self.frame_index * frame_duration));
            buffer.set_duration(ClockTime::from_nseconds(frame_duration));
        }

        self.appsrc
            .push_buffer(buffer)
            .map_err(|e| RecordingError::Write {
                details: format!("appsrc push failed: {:?}", e),
            })?;
        self.frame_index += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.appsrc
            .end_of_stream()
            .map_err(|e| RecordingError::Finalize {
                details: format!("Failed to signal end of stream: {:?}", e),
            })?;

        let mut result = Ok(());
        if let Some(bus) = self.pipeline.bus() {
            let message = bus.timed_pop_filtered(
                ClockTime::from_seconds(FINALIZE_TIMEOUT_SECS),
                &[gstreamer::MessageType::Eos, gstreamer::MessageType::Error],
            );
            match message.as_ref().map(|m| m.view()) {
                Some(MessageView::Eos(..)) => {
                    debug!("Recording pipeline drained ({} frames)", self.frame_index);
                }
                Some(MessageView::Error(err)) => {
                    result = Err(RecordingError::Finalize {
                        details: err.error().to_string(),
                    }
                    .into());
                }
                _ => {
                    warn!(
                        "Recording pipeline did not drain within {}s",
                        FINALIZE_TIMEOUT_SECS
                    );
                }
            }
        }

        self.pipeline
            .set_state(gstreamer::State::Null)
            .map_err(|e| RecordingError::Finalize {
                details: format!("Failed to stop pipeline: {}", e),
            })?;

        result
    }
}
