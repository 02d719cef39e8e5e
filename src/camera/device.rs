use super::source::FrameSource;
use crate::config::CameraConfig;
use crate::error::{CameraError, Result};
use crate::frame::RawSensorFrame;
use gstreamer::prelude::*;
use gstreamer::Pipeline;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::time::SystemTime;
use tracing::{debug, info, trace, warn};

/// Capture pipeline for a UVC thermal camera that delivers both planes as one YUY2 image
pub fn default_pipeline(index: u32, sensor_width: u32, sensor_height: u32) -> String {
    format!(
        "v4l2src device=/dev/video{} ! \
         video/x-raw,format=YUY2,width={},height={} ! \
         appsink name=sink sync=false max-buffers=1 drop=true",
        index,
        sensor_width,
        sensor_height * 2
    )
}

/// Live camera read through a GStreamer appsink
pub struct DeviceFrameSource {
    pipeline: Pipeline,
    appsink: AppSink,
    device: String,
    sensor_resolution: (u32, u32),
    frame_counter: u64,
}

impl DeviceFrameSource {
    pub fn open(config: &CameraConfig) -> Result<Self> {
        let device = format!("/dev/video{}", config.index);
        let (width, height) = config.sensor_resolution;

        gstreamer::init().map_err(|e| CameraError::Configuration {
            details: format!("Failed to initialize GStreamer: {}", e),
        })?;

        let pipeline_desc = config
            .pipeline
            .clone()
            .unwrap_or_else(|| default_pipeline(config.index, width, height));
        info!("Creating GStreamer pipeline: {}", pipeline_desc);

        let pipeline = gstreamer::parse::launch(&pipeline_desc)
            .map_err(|e| CameraError::Configuration {
                details: format!("Failed to create pipeline: {}", e),
            })?
            .downcast::<Pipeline>()
            .map_err(|_| CameraError::Configuration {
                details: "Failed to downcast to Pipeline".to_string(),
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| CameraError::Configuration {
                details: "Pipeline has no element named 'sink'".to_string(),
            })?
            .downcast::<AppSink>()
            .map_err(|_| CameraError::Configuration {
                details: "Element 'sink' is not an appsink".to_string(),
            })?;

        pipeline
            .set_state(gstreamer::State::Playing)
            .map_err(|e| CameraError::DeviceOpen {
                device: device.clone(),
                details: format!("Failed to start pipeline: {}", e),
            })?;

        info!(
            "Opened {} ({}x{} per plane, stacked {}x{})",
            device,
            width,
            height,
            width,
            height * 2
        );

        Ok(Self {
            pipeline,
            appsink,
            device,
            sensor_resolution: (width, height),
            frame_counter: 0,
        })
    }
}

impl FrameSource for DeviceFrameSource {
    fn next_frame(&mut self) -> Result<Option<RawSensorFrame>> {
        let sample = match self.appsink.pull_sample() {
            Ok(sample) => sample,
            Err(e) => {
                if self.appsink.is_eos() {
                    info!("Camera stream ended");
                    return Ok(None);
                }
                return Err(CameraError::CaptureStream {
                    details: format!("Failed to pull sample: {}", e),
                }
                .into());
            }
        };

        let buffer = sample.buffer().ok_or_else(|| CameraError::CaptureStream {
            details: "No buffer in sample".to_string(),
        })?;

        if let Some(caps) = sample.caps() {
            if let Ok(video_info) = VideoInfo::from_caps(caps) {
                let (width, height) = self.sensor_resolution;
                if video_info.width() != width || video_info.height() != height * 2 {
                    warn!(
                        "Negotiated {}x{}, expected {}x{}",
                        video_info.width(),
                        video_info.height(),
                        width,
                        height * 2
                    );
                }
            }
        }

        let map = buffer
            .map_readable()
            .map_err(|e| CameraError::CaptureStream {
                details: format!("Failed to map buffer: {}", e),
            })?;

        let frame_id = self.frame_counter;
        self.frame_counter += 1;

        let (width, height) = self.sensor_resolution;
        let frame = RawSensorFrame::from_le_bytes(
            frame_id,
            SystemTime::now(),
            map.as_slice(),
            width as usize,
            height as usize,
        )?;

        trace!(
            "Captured sensor frame {} ({} bytes)",
            frame_id,
            map.len()
        );
        Ok(Some(frame))
    }

    fn describe(&self) -> String {
        format!("GStreamer device {}", self.device)
    }
}

impl Drop for DeviceFrameSource {
    fn drop(&mut self) {
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            warn!("Failed to stop capture pipeline: {}", e);
        } else {
            debug!("Capture pipeline stopped");
        }
    }
}
