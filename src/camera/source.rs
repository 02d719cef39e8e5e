use super::mock::MockFrameSource;
use super::replay::ReplayFrameSource;
use crate::config::{CameraConfig, SourceKind};
use crate::error::{CameraError, Result};
use crate::frame::RawSensorFrame;
use tracing::info;

/// Blocking producer of stacked sensor frames
pub trait FrameSource {
    /// Next frame, or `None` once the stream has ended
    fn next_frame(&mut self) -> Result<Option<RawSensorFrame>>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Open the frame source selected by the camera configuration
pub fn open_source(config: &CameraConfig) -> Result<Box<dyn FrameSource>> {
    let (width, height) = config.sensor_resolution;
    let source: Box<dyn FrameSource> = match config.source {
        SourceKind::Device => open_device(config)?,
        SourceKind::Mock => Box::new(MockFrameSource::new(width as usize, height as usize)),
        SourceKind::Replay => {
            let path = config
                .replay_path
                .as_ref()
                .ok_or_else(|| CameraError::Configuration {
                    details: "replay source requires camera.replay_path".to_string(),
                })?;
            Box::new(ReplayFrameSource::open(
                path,
                width as usize,
                height as usize,
            )?)
        }
    };

    info!("Frame source: {}", source.describe());
    Ok(source)
}

#[cfg(all(feature = "gstreamer", target_os = "linux"))]
fn open_device(config: &CameraConfig) -> Result<Box<dyn FrameSource>> {
    Ok(Box::new(super::device::DeviceFrameSource::open(config)?))
}

#[cfg(not(all(feature = "gstreamer", target_os = "linux")))]
fn open_device(_config: &CameraConfig) -> Result<Box<dyn FrameSource>> {
    Err(CameraError::Unavailable {
        source_name: "device".to_string(),
    }
    .into())
}
