//! Radiometric decoding of thermal-plane samples.
//!
//! Each thermal pixel is stored as two consecutive 16-bit words. Their average is a
//! raw value in 1/64 Kelvin, which converts to Celsius as `raw / 64 - 273.15`.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fmt;

const KELVIN_OFFSET: f64 = 273.15;
const RAW_UNITS_PER_KELVIN: f64 = 64.0;

/// Display unit for decoded temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

/// Raw radiometric value of one thermal pixel, before unit conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermalSample {
    pub low: u16,
    pub high: u16,
}

impl ThermalSample {
    pub fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    /// Read the two words that make up the pixel at `(x, y)`.
    ///
    /// The second word is the next one in row-major order. The final pixel of the
    /// plane has no partner word and is paired with itself.
    pub fn at(thermal: &ArrayView2<'_, u16>, x: usize, y: usize) -> Self {
        let low = thermal[[y, x]];
        let high = if x + 1 < thermal.ncols() {
            thermal[[y, x + 1]]
        } else if y + 1 < thermal.nrows() {
            thermal[[y + 1, 0]]
        } else {
            low
        };
        Self { low, high }
    }

    /// Truncating average of both words
    pub fn raw(&self) -> u32 {
        (u32::from(self.low) + u32::from(self.high)) / 2
    }

    pub fn temperature(&self) -> Temperature {
        let celsius = f64::from(self.raw()) / RAW_UNITS_PER_KELVIN - KELVIN_OFFSET;
        Temperature {
            celsius: celsius as f32,
        }
    }
}

/// A decoded physical temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    celsius: f32,
}

impl Temperature {
    pub fn from_celsius(celsius: f32) -> Self {
        Self { celsius }
    }

    pub fn celsius(&self) -> f32 {
        self.celsius
    }

    pub fn fahrenheit(&self) -> f32 {
        self.celsius * 9.0 / 5.0 + 32.0
    }

    pub fn value_in(&self, unit: TemperatureUnit) -> f32 {
        match unit {
            TemperatureUnit::Celsius => self.celsius(),
            TemperatureUnit::Fahrenheit => self.fahrenheit(),
        }
    }

    pub fn reading(&self, unit: TemperatureUnit) -> TemperatureReading {
        TemperatureReading {
            value: self.value_in(unit),
            unit,
        }
    }
}

/// A temperature bound to a unit, formatted as fixed-point with two decimals (`"23.45 C"`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub value: f32,
    pub unit: TemperatureUnit,
}

impl fmt::Display for TemperatureReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit.symbol())
    }
}

/// Decode the pixel at `(x, y)` of a thermal plane into the requested unit.
///
/// Sensor words are trusted as-is; garbage input yields a garbage temperature.
pub fn decode(
    thermal: &ArrayView2<'_, u16>,
    x: usize,
    y: usize,
    unit: TemperatureUnit,
) -> TemperatureReading {
    ThermalSample::at(thermal, x, y).temperature().reading(unit)
}
