use super::input::InputCommand;
use crate::colormap::ColorMap;
use crate::config::SessionConfig;
use crate::error::{FrameError, Result};
use crate::extremum::interior_is_non_empty;
use crate::mapping::DisplayScale;
use crate::radiometry::TemperatureUnit;
use chrono::{DateTime, Local};
use tracing::{debug, info};

/// Recording sub-state; the start time exists only while active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Active { started_at: DateTime<Local> },
}

/// Side effects the frame loop performs on behalf of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartRecording,
    StopRecording,
    SaveStill,
    Quit,
}

/// Why a command left the state unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    BorderAtLimit,
    ScaleAtLimit,
    ScaleLockedWhileRecording,
    AlreadyRecording,
    NotRecording,
}

/// Result of feeding one input symbol to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State was mutated
    Changed,
    /// Clamped or disallowed; state is exactly as before
    Rejected(Rejection),
    /// Caller must perform an external action
    Effect(Effect),
    /// Unrecognized symbol
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    border_min: u32,
    border_max: u32,
    scale_min: f64,
    scale_max: f64,
    scale_step: f64,
}

/// All interactive state of a viewing session.
///
/// Created once at startup and mutated only through [`SessionState::apply`] and the
/// recording transitions driven by the recording controller.
#[derive(Debug, Clone)]
pub struct SessionState {
    unit: TemperatureUnit,
    catalog: Vec<ColorMap>,
    color_map_index: usize,
    border_inset: u32,
    display_scale: DisplayScale,
    crosshair: bool,
    hud: bool,
    labels: bool,
    info: bool,
    recording: RecordingState,
    sensor_resolution: (u32, u32),
    bounds: Bounds,
}

impl SessionState {
    pub fn from_config(config: &SessionConfig, sensor_resolution: (u32, u32)) -> Result<Self> {
        let (width, height) = sensor_resolution;

        config.validate_bounds()?;

        if !interior_is_non_empty(config.border_inset, width as usize, height as usize) {
            return Err(FrameError::EmptyInterior {
                border: config.border_inset,
                width: width as usize,
                height: height as usize,
            }
            .into());
        }

        Ok(Self {
            unit: config.unit,
            catalog: config.colormaps.clone(),
            color_map_index: 0,
            border_inset: config.border_inset,
            display_scale: DisplayScale::new(config.display_scale),
            crosshair: config.crosshair,
            hud: config.hud,
            labels: config.labels,
            info: config.info,
            recording: RecordingState::Idle,
            sensor_resolution,
            bounds: Bounds {
                border_min: config.border_min,
                border_max: config.border_max,
                scale_min: config.scale_min,
                scale_max: config.scale_max,
                scale_step: config.scale_step,
            },
        })
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn color_map_index(&self) -> usize {
        self.color_map_index
    }

    pub fn color_map(&self) -> ColorMap {
        self.catalog[self.color_map_index]
    }

    pub fn catalog(&self) -> &[ColorMap] {
        &self.catalog
    }

    pub fn border_inset(&self) -> u32 {
        self.border_inset
    }

    pub fn display_scale(&self) -> DisplayScale {
        self.display_scale
    }

    pub fn sensor_resolution(&self) -> (u32, u32) {
        self.sensor_resolution
    }

    /// Current display resolution derived from the sensor size and scale
    pub fn display_size(&self) -> (u32, u32) {
        let (width, height) = self.sensor_resolution;
        self.display_scale.display_size(width, height)
    }

    pub fn crosshair_enabled(&self) -> bool {
        self.crosshair
    }

    pub fn hud_enabled(&self) -> bool {
        self.hud
    }

    pub fn labels_enabled(&self) -> bool {
        self.labels
    }

    pub fn info_enabled(&self) -> bool {
        self.info
    }

    pub fn recording(&self) -> RecordingState {
        self.recording
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.recording, RecordingState::Active { .. })
    }

    /// Feed a raw key symbol; unknown symbols are ignored
    pub fn handle_key(&mut self, key: char) -> Outcome {
        match InputCommand::from_key(key) {
            Some(command) => self.apply(command),
            None => {
                debug!("Ignoring unmapped key {:?}", key);
                Outcome::Ignored
            }
        }
    }

    /// Apply one command. Rejected commands leave every field untouched.
    pub fn apply(&mut self, command: InputCommand) -> Outcome {
        let outcome = match command {
            InputCommand::CycleColorMap => {
                self.color_map_index = (self.color_map_index + 1) % self.catalog.len();
                info!("Color map: {}", self.color_map());
                Outcome::Changed
            }
            InputCommand::ToggleCrosshair => {
                self.crosshair = !self.crosshair;
                Outcome::Changed
            }
            InputCommand::ToggleHud => {
                self.hud = !self.hud;
                Outcome::Changed
            }
            InputCommand::ToggleLabels => {
                self.labels = !self.labels;
                Outcome::Changed
            }
            InputCommand::ToggleInfo => {
                self.info = !self.info;
                Outcome::Changed
            }
            InputCommand::ToggleUnit => {
                self.unit = self.unit.toggled();
                Outcome::Changed
            }
            InputCommand::IncreaseBorder => self.adjust_border(1),
            InputCommand::DecreaseBorder => self.adjust_border(-1),
            InputCommand::IncreaseScale => self.adjust_scale(self.bounds.scale_step),
            InputCommand::DecreaseScale => self.adjust_scale(-self.bounds.scale_step),
            InputCommand::StartRecording => {
                if self.is_recording() {
                    Outcome::Rejected(Rejection::AlreadyRecording)
                } else {
                    Outcome::Effect(Effect::StartRecording)
                }
            }
            InputCommand::StopRecording => {
                if self.is_recording() {
                    Outcome::Effect(Effect::StopRecording)
                } else {
                    Outcome::Rejected(Rejection::NotRecording)
                }
            }
            InputCommand::SaveStill => Outcome::Effect(Effect::SaveStill),
            InputCommand::Quit => Outcome::Effect(Effect::Quit),
        };

        if let Outcome::Rejected(reason) = outcome {
            debug!("{:?} rejected: {:?}", command, reason);
        }

        outcome
    }

    fn adjust_border(&mut self, delta: i64) -> Outcome {
        let requested = i64::from(self.border_inset) + delta;
        let (width, height) = self.sensor_resolution;

        if requested < i64::from(self.bounds.border_min)
            || requested > i64::from(self.bounds.border_max)
        {
            return Outcome::Rejected(Rejection::BorderAtLimit);
        }

        let requested = requested as u32;
        if !interior_is_non_empty(requested, width as usize, height as usize) {
            return Outcome::Rejected(Rejection::BorderAtLimit);
        }

        self.border_inset = requested;
        info!("Border inset: {}", self.border_inset);
        Outcome::Changed
    }

    fn adjust_scale(&mut self, delta: f64) -> Outcome {
        if self.is_recording() {
            return Outcome::Rejected(Rejection::ScaleLockedWhileRecording);
        }

        let current = self.display_scale.ratio();
        let requested = (current + delta).clamp(self.bounds.scale_min, self.bounds.scale_max);
        if (requested - current).abs() < f64::EPSILON {
            return Outcome::Rejected(Rejection::ScaleAtLimit);
        }

        self.display_scale = DisplayScale::new(requested);
        let (width, height) = self.display_size();
        info!(
            "Display scale: {:.2} ({}x{})",
            self.display_scale.ratio(),
            width,
            height
        );
        Outcome::Changed
    }

    /// Idle -> Active, called once the video sink is open
    pub(crate) fn begin_recording(&mut self, started_at: DateTime<Local>) {
        self.recording = RecordingState::Active { started_at };
    }

    /// Active -> Idle, called once the video sink is released
    pub(crate) fn end_recording(&mut self) {
        self.recording = RecordingState::Idle;
    }
}
