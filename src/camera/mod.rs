#[cfg(all(feature = "gstreamer", target_os = "linux"))]
mod device;
mod mock;
mod replay;
mod source;

#[cfg(all(feature = "gstreamer", target_os = "linux"))]
pub use device::{default_pipeline, DeviceFrameSource};
pub use mock::MockFrameSource;
pub use replay::ReplayFrameSource;
pub use source::{open_source, FrameSource};
