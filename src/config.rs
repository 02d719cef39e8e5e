use crate::colormap::ColorMap;
use crate::extremum::interior_is_non_empty;
use crate::radiometry::TemperatureUnit;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ThermcamConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where frames come from
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Live v4l2 device through GStreamer
    Device,
    /// Synthetic frames
    Mock,
    /// Raw frame dump on disk
    Replay,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CameraConfig {
    /// Camera device index (e.g., 0 for /dev/video0)
    #[serde(default = "default_camera_index")]
    pub index: u32,

    /// Size of ONE sensor plane (width, height); the device delivers two stacked planes
    #[serde(default = "default_sensor_resolution")]
    pub sensor_resolution: (u32, u32),

    /// Frame source selection
    #[serde(default = "default_source")]
    pub source: SourceKind,

    /// Custom GStreamer pipeline; must end in an appsink named `sink`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,

    /// Raw dump to read when `source = "replay"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SessionConfig {
    /// Temperature unit shown at startup
    #[serde(default = "default_unit")]
    pub unit: TemperatureUnit,

    /// Color maps in cycle order
    #[serde(default = "default_colormaps")]
    pub colormaps: Vec<ColorMap>,

    /// Edge pixels excluded from the hot/cold search
    #[serde(default = "default_border_inset")]
    pub border_inset: u32,

    #[serde(default = "default_border_min")]
    pub border_min: u32,

    #[serde(default = "default_border_max")]
    pub border_max: u32,

    /// Display-to-sensor ratio
    #[serde(default = "default_display_scale")]
    pub display_scale: f64,

    #[serde(default = "default_scale_min")]
    pub scale_min: f64,

    #[serde(default = "default_scale_max")]
    pub scale_max: f64,

    #[serde(default = "default_scale_step")]
    pub scale_step: f64,

    #[serde(default = "default_true")]
    pub crosshair: bool,

    /// High/low point markers
    #[serde(default = "default_true")]
    pub hud: bool,

    /// Temperature labels next to the markers
    #[serde(default = "default_true")]
    pub labels: bool,

    /// Color map name and search-area outline
    #[serde(default = "default_true")]
    pub info: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Path to TrueType font file for overlay text
    #[serde(default = "default_font_path")]
    pub font_path: String,

    /// Font size in pixels
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Dark outline thickness behind text
    #[serde(default = "default_text_outline_width")]
    pub text_outline_width: u32,

    /// Outline thickness behind hot/cold markers
    #[serde(default = "default_marker_outline_width")]
    pub marker_outline_width: u32,

    #[serde(default = "default_marker_radius")]
    pub marker_radius: u32,

    #[serde(default = "default_crosshair_half_length")]
    pub crosshair_half_length: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RecordingConfig {
    /// Directory for stills and videos
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Video frame rate
    #[serde(default = "default_recording_fps")]
    pub fps: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,

    /// Run without presenting frames
    #[serde(default)]
    pub headless: bool,

    /// How long each iteration waits for a key press
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl ThermcamConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("thermcam.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            .add_source(File::with_name(&path_str).required(false))
            // THERMCAM_SESSION__BORDER_INSET=10
            .add_source(
                Environment::with_prefix("THERMCAM")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: ThermcamConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.camera.sensor_resolution;
        if width == 0 || height == 0 {
            return Err(ConfigError::Message(
                "Sensor resolution must be greater than 0".to_string(),
            ));
        }

        if self.camera.source == SourceKind::Replay && self.camera.replay_path.is_none() {
            return Err(ConfigError::Message(
                "Replay source requires camera.replay_path".to_string(),
            ));
        }

        self.session.validate_bounds()?;

        let session = &self.session;
        if !interior_is_non_empty(session.border_max, width as usize, height as usize) {
            return Err(ConfigError::Message(format!(
                "border_max {} leaves no search area in a {}x{} sensor",
                session.border_max, width, height
            )));
        }

        if self.overlay.font_size <= 0.0 {
            return Err(ConfigError::Message(
                "Overlay font_size must be greater than 0".to_string(),
            ));
        }

        if self.recording.fps == 0 {
            return Err(ConfigError::Message(
                "Recording fps must be greater than 0".to_string(),
            ));
        }

        if self.display.poll_interval_ms == 0 {
            return Err(ConfigError::Message(
                "Display poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ThermcamConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            session: SessionConfig::default(),
            overlay: OverlayConfig::default(),
            recording: RecordingConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: default_camera_index(),
            sensor_resolution: default_sensor_resolution(),
            source: default_source(),
            pipeline: None,
            replay_path: None,
        }
    }
}

impl SessionConfig {
    /// Check the border and scale ranges the session relies on
    pub fn validate_bounds(&self) -> Result<(), ConfigError> {
        if self.colormaps.is_empty() {
            return Err(ConfigError::Message(
                "At least one color map must be configured".to_string(),
            ));
        }

        if self.border_min > self.border_max {
            return Err(ConfigError::Message(format!(
                "border_min ({}) must not exceed border_max ({})",
                self.border_min, self.border_max
            )));
        }

        if self.border_inset < self.border_min || self.border_inset > self.border_max {
            return Err(ConfigError::Message(format!(
                "border_inset {} is outside [{}, {}]",
                self.border_inset, self.border_min, self.border_max
            )));
        }

        if ![self.display_scale, self.scale_min, self.scale_max, self.scale_step]
            .iter()
            .all(|value| value.is_finite())
        {
            return Err(ConfigError::Message(
                "Scale settings must be finite numbers".to_string(),
            ));
        }

        if self.scale_min < 1.0 {
            return Err(ConfigError::Message("scale_min must be at least 1".to_string()));
        }

        if self.scale_min > self.scale_max {
            return Err(ConfigError::Message(format!(
                "scale_min ({}) must not exceed scale_max ({})",
                self.scale_min, self.scale_max
            )));
        }

        if self.display_scale < self.scale_min || self.display_scale > self.scale_max {
            return Err(ConfigError::Message(format!(
                "display_scale {} is outside [{}, {}]",
                self.display_scale, self.scale_min, self.scale_max
            )));
        }

        if self.scale_step <= 0.0 {
            return Err(ConfigError::Message(
                "scale_step must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            colormaps: default_colormaps(),
            border_inset: default_border_inset(),
            border_min: default_border_min(),
            border_max: default_border_max(),
            display_scale: default_display_scale(),
            scale_min: default_scale_min(),
            scale_max: default_scale_max(),
            scale_step: default_scale_step(),
            crosshair: true,
            hud: true,
            labels: true,
            info: true,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_path: default_font_path(),
            font_size: default_font_size(),
            text_outline_width: default_text_outline_width(),
            marker_outline_width: default_marker_outline_width(),
            marker_radius: default_marker_radius(),
            crosshair_half_length: default_crosshair_half_length(),
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            fps: default_recording_fps(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            headless: false,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

// Default value functions
fn default_camera_index() -> u32 {
    0
}
fn default_sensor_resolution() -> (u32, u32) {
    (256, 192)
}
fn default_source() -> SourceKind {
    SourceKind::Device
}

fn default_unit() -> TemperatureUnit {
    TemperatureUnit::Fahrenheit
}
fn default_colormaps() -> Vec<ColorMap> {
    ColorMap::ALL.to_vec()
}
fn default_border_inset() -> u32 {
    20
}
fn default_border_min() -> u32 {
    2
}
fn default_border_max() -> u32 {
    80
}
fn default_display_scale() -> f64 {
    2.5
} // 256x192 -> 640x480
fn default_scale_min() -> f64 {
    1.0
}
fn default_scale_max() -> f64 {
    6.0
}
fn default_scale_step() -> f64 {
    0.5
}
fn default_true() -> bool {
    true
}

fn default_font_path() -> String {
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string()
}
fn default_font_size() -> f32 {
    13.0
}
fn default_text_outline_width() -> u32 {
    3
}
fn default_marker_outline_width() -> u32 {
    2
}
fn default_marker_radius() -> u32 {
    1
}
fn default_crosshair_half_length() -> u32 {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_recording_fps() -> u32 {
    25
}

fn default_window_title() -> String {
    format!("thermcam v{}", env!("CARGO_PKG_VERSION"))
}
fn default_poll_interval_ms() -> u64 {
    37
}
