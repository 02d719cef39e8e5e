pub mod app;
pub mod camera;
pub mod colormap;
pub mod config;
pub mod display;
pub mod error;
pub mod extremum;
pub mod frame;
pub mod keyboard_input;
pub mod mapping;
pub mod overlay;
pub mod radiometry;
pub mod recording;
pub mod render;
pub mod session;

pub use app::{ExitReason, RunSummary, ThermalViewer, ThermalViewerBuilder};
pub use camera::{open_source, FrameSource, MockFrameSource, ReplayFrameSource};
pub use colormap::ColorMap;
pub use config::ThermcamConfig;
pub use display::{HeadlessPresenter, Presenter};
pub use error::{Result, ThermcamError};
pub use extremum::{scan, ExtremumResult};
pub use frame::RawSensorFrame;
pub use mapping::{DisplayPoint, DisplayScale, SensorPoint};
pub use radiometry::{decode, Temperature, TemperatureReading, TemperatureUnit, ThermalSample};
pub use recording::RecordingController;
pub use render::{FrameRenderer, RenderedFrame};
pub use session::{InputCommand, Outcome, SessionState};
