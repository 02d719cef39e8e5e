use super::source::FrameSource;
use crate::error::Result;
use crate::frame::RawSensorFrame;
use ndarray::Array2;
use std::time::SystemTime;
use tracing::trace;

/// Raw thermal word for roughly 22 C
const AMBIENT_RAW: u16 = 18890;
/// Roughly 47 C
const HOT_RAW: u16 = 20500;
/// Roughly -7 C
const COLD_RAW: u16 = 17000;
const SPOT_RADIUS: usize = 6;
/// Neutral chroma in the high byte of each visible word
const NEUTRAL_CHROMA: u16 = 0x80 << 8;

/// Deterministic synthetic camera: a luma gradient, a warm spot drifting
/// horizontally and a fixed cold spot.
pub struct MockFrameSource {
    sensor_width: usize,
    sensor_height: usize,
    frame_limit: Option<u64>,
    frame_counter: u64,
}

impl MockFrameSource {
    pub fn new(sensor_width: usize, sensor_height: usize) -> Self {
        Self {
            sensor_width,
            sensor_height,
            frame_limit: None,
            frame_counter: 0,
        }
    }

    /// End the stream after `limit` frames
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Center of the warm spot in frame `id`
    pub fn hot_spot(&self, id: u64) -> (usize, usize) {
        let span = (self.sensor_width / 2).max(1);
        let x = self.sensor_width / 4 + (id as usize * 3) % span;
        (x, self.sensor_height / 2)
    }

    /// Center of the cold spot
    pub fn cold_spot(&self) -> (usize, usize) {
        (self.sensor_width * 3 / 4, self.sensor_height / 3)
    }

    fn synthesize(&self, id: u64) -> Array2<u16> {
        let (w, h) = (self.sensor_width, self.sensor_height);
        let hot = self.hot_spot(id);
        let cold = self.cold_spot();
        let shift = (id as usize * 2) % 256;

        Array2::from_shape_fn((h * 2, w), |(row, x)| {
            if row < h {
                let luma = ((x + row + shift) % 256) as u16;
                NEUTRAL_CHROMA | luma
            } else {
                let y = row - h;
                if within(x, y, hot) {
                    HOT_RAW
                } else if within(x, y, cold) {
                    COLD_RAW
                } else {
                    AMBIENT_RAW + ((x + y) % 4) as u16
                }
            }
        })
    }
}

fn within(x: usize, y: usize, center: (usize, usize)) -> bool {
    let dx = x.abs_diff(center.0);
    let dy = y.abs_diff(center.1);
    dx * dx + dy * dy <= SPOT_RADIUS * SPOT_RADIUS
}

impl FrameSource for MockFrameSource {
    fn next_frame(&mut self) -> Result<Option<RawSensorFrame>> {
        if let Some(limit) = self.frame_limit {
            if self.frame_counter >= limit {
                return Ok(None);
            }
        }

        let frame_id = self.frame_counter;
        self.frame_counter += 1;

        let frame = RawSensorFrame::new(frame_id, SystemTime::now(), self.synthesize(frame_id))?;
        trace!("Generated mock sensor frame {}", frame_id);
        Ok(Some(frame))
    }

    fn describe(&self) -> String {
        format!(
            "mock source ({}x{} per plane)",
            self.sensor_width, self.sensor_height
        )
    }
}
