use serde::{Deserialize, Serialize};

/// Integer pixel coordinate in sensor space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorPoint {
    pub x: i32,
    pub y: i32,
}

impl SensorPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Integer pixel coordinate in display space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayPoint {
    pub x: i32,
    pub y: i32,
}

impl DisplayPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Ratio of display resolution to sensor resolution.
///
/// Integer multipliers are the special case of a whole-number ratio.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DisplayScale(f64);

impl DisplayScale {
    pub fn new(ratio: f64) -> Self {
        Self(ratio)
    }

    /// Ratio of an output dimension to the matching sensor dimension
    pub fn from_dimensions(output: u32, sensor: u32) -> Self {
        Self(f64::from(output) / f64::from(sensor))
    }

    pub fn ratio(&self) -> f64 {
        self.0
    }

    /// Scale a single sensor-space length, rounding half away from zero
    pub fn scale(&self, value: i32) -> i32 {
        (f64::from(value) * self.0).round() as i32
    }

    pub fn to_display(&self, point: SensorPoint) -> DisplayPoint {
        DisplayPoint::new(self.scale(point.x), self.scale(point.y))
    }

    /// Display resolution for a sensor plane of the given size
    pub fn display_size(&self, sensor_width: u32, sensor_height: u32) -> (u32, u32) {
        let width = (f64::from(sensor_width) * self.0).round().max(1.0) as u32;
        let height = (f64::from(sensor_height) * self.0).round().max(1.0) as u32;
        (width, height)
    }
}
