use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThermcamError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Recording error: {0}")]
    Recording(#[from] RecordingError),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    #[error("System error: {message}")]
    System { message: String },

    #[error("Component error in {component}: {message}")]
    Component { component: String, message: String },
}

/// Raw sensor buffer shape problems, detected at ingestion
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Sensor frame is empty")]
    Empty,

    #[error("Sensor frame has {rows} rows; expected an even number of stacked rows")]
    OddHeight { rows: usize },

    #[error("Sensor buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Border inset {border} leaves no interior in a {width}x{height} thermal plane")]
    EmptyInterior {
        border: u32,
        width: usize,
        height: usize,
    },
}

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera configuration error: {details}")]
    Configuration { details: String },

    #[error("Failed to open camera device {device}: {details}")]
    DeviceOpen { device: String, details: String },

    #[error("Capture stream error: {details}")]
    CaptureStream { details: String },

    #[error("Camera source '{source_name}' is not available in this build")]
    Unavailable { source_name: String },
}

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("Failed to open video sink '{path}': {details}")]
    SinkOpen { path: String, details: String },

    #[error("Failed to write video frame: {details}")]
    Write { details: String },

    #[error("Failed to finalize video file: {details}")]
    Finalize { details: String },

    #[error("Video recording is not available in this build")]
    Unavailable,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to present frame: {details}")]
    Presentation { details: String },

    #[error("Failed to load font '{path}': {details}")]
    FontLoad { path: String, details: String },
}

impl ThermcamError {
    pub fn system<S: Into<String>>(message: S) -> Self {
        Self::System {
            message: message.into(),
        }
    }

    pub fn component<S: Into<String>>(component: S, message: S) -> Self {
        Self::Component {
            component: component.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThermcamError>;
