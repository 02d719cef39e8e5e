use crate::error::{RecordingError, Result};
use image::RgbImage;
use std::path::Path;

/// An open video file accepting composed display frames
pub trait VideoSink: Send {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()>;

    /// Flush and close the file. A sink that is dropped without this may leave an
    /// unplayable file behind.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Opens video sinks of a fixed frame size and rate
pub trait SinkFactory: Send {
    fn open(&self, path: &Path, fps: u32, frame_size: (u32, u32)) -> Result<Box<dyn VideoSink>>;
}

/// Factory used when the build has no video encoder
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSinkFactory;

impl SinkFactory for UnavailableSinkFactory {
    fn open(
        &self,
        _path: &Path,
        _fps: u32,
        _frame_size: (u32, u32),
    ) -> Result<Box<dyn VideoSink>> {
        Err(RecordingError::Unavailable.into())
    }
}

/// Best encoder available in this build
pub fn default_sink_factory() -> Box<dyn SinkFactory> {
    #[cfg(all(feature = "gstreamer", target_os = "linux"))]
    {
        Box::new(super::gst::AviSinkFactory)
    }

    #[cfg(not(all(feature = "gstreamer", target_os = "linux")))]
    {
        Box::new(UnavailableSinkFactory)
    }
}
