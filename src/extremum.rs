use crate::error::{FrameError, Result};
use crate::mapping::SensorPoint;
use ndarray::{s, ArrayView2};
use tracing::trace;

/// Hottest and coldest raw samples of one thermal plane, in sensor coordinates.
///
/// Valid only for the frame it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtremumResult {
    pub max: SensorPoint,
    pub min: SensorPoint,
    pub max_value: u16,
    pub min_value: u16,
}

/// Check that `border` leaves at least one pixel to search in a `width` x `height` plane
pub fn interior_is_non_empty(border: u32, width: usize, height: usize) -> bool {
    (border as usize).saturating_mul(2) < width.min(height)
}

/// Locate the minimum and maximum raw words, skipping `border` pixels on every edge.
///
/// Pixels are visited in row-major order and replaced only on a strict improvement,
/// so among equal extremes the first one visited is kept.
pub fn scan(thermal: &ArrayView2<'_, u16>, border: u32) -> Result<ExtremumResult> {
    let (height, width) = thermal.dim();
    if !interior_is_non_empty(border, width, height) {
        return Err(FrameError::EmptyInterior {
            border,
            width,
            height,
        }
        .into());
    }

    let b = border as usize;
    let interior = thermal.slice(s![b..height - b, b..width - b]);

    let origin = SensorPoint::new(b as i32, b as i32);
    let first = interior[[0, 0]];
    let mut result = ExtremumResult {
        max: origin,
        min: origin,
        max_value: first,
        min_value: first,
    };

    for ((row, col), &value) in interior.indexed_iter() {
        if value < result.min_value {
            result.min_value = value;
            result.min = SensorPoint::new((col + b) as i32, (row + b) as i32);
        }
        if value > result.max_value {
            result.max_value = value;
            result.max = SensorPoint::new((col + b) as i32, (row + b) as i32);
        }
    }

    trace!(
        "Extremum scan (border {}): max {} at {:?}, min {} at {:?}",
        border,
        result.max_value,
        result.max,
        result.min_value,
        result.min
    );

    Ok(result)
}
