mod controller;
#[cfg(all(feature = "gstreamer", target_os = "linux"))]
mod gst;
mod sink;
#[cfg(test)]
mod tests;

pub use controller::{format_elapsed, format_hms, timestamped_name, RecordingController};
#[cfg(all(feature = "gstreamer", target_os = "linux"))]
pub use gst::{AviSink, AviSinkFactory};
pub use sink::{default_sink_factory, SinkFactory, UnavailableSinkFactory, VideoSink};
