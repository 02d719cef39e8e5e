use crate::error::{FrameError, Result};
use image::{GrayImage, Luma};
use ndarray::{s, Array2, ArrayView2};
use std::time::SystemTime;
use tracing::trace;

/// One captured sensor buffer: a visible plane stacked on top of a thermal plane.
///
/// Both planes share the same width and height. The buffer is read-only once
/// constructed and is dropped after the frame it belongs to has been rendered.
#[derive(Debug, Clone)]
pub struct RawSensorFrame {
    /// Capture sequence number
    pub id: u64,
    /// Timestamp when the frame was acquired
    pub timestamp: SystemTime,
    data: Array2<u16>,
}

impl RawSensorFrame {
    /// Wrap a `(2 * height, width)` word buffer
    pub fn new(id: u64, timestamp: SystemTime, data: Array2<u16>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(FrameError::Empty.into());
        }
        if rows % 2 != 0 {
            return Err(FrameError::OddHeight { rows }.into());
        }

        Ok(Self {
            id,
            timestamp,
            data,
        })
    }

    /// Build a frame from little-endian 16-bit words as delivered by the capture pipeline.
    ///
    /// `sensor_width` and `sensor_height` describe one plane; the buffer must hold
    /// exactly two of them.
    pub fn from_le_bytes(
        id: u64,
        timestamp: SystemTime,
        bytes: &[u8],
        sensor_width: usize,
        sensor_height: usize,
    ) -> Result<Self> {
        if bytes.is_empty() {
            return Err(FrameError::Empty.into());
        }

        let expected = Self::byte_len(sensor_width, sensor_height);
        if bytes.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: bytes.len(),
            }
            .into());
        }

        let words: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        let data = Array2::from_shape_vec((sensor_height * 2, sensor_width), words).map_err(
            |_| FrameError::SizeMismatch {
                expected,
                actual: bytes.len(),
            },
        )?;

        trace!(
            "Ingested sensor frame {} ({}x{} per plane)",
            id,
            sensor_width,
            sensor_height
        );

        Self::new(id, timestamp, data)
    }

    /// Number of bytes in a full stacked buffer for the given plane size
    pub fn byte_len(sensor_width: usize, sensor_height: usize) -> usize {
        sensor_width * sensor_height * 2 * std::mem::size_of::<u16>()
    }

    /// Width of one plane
    pub fn sensor_width(&self) -> usize {
        self.data.ncols()
    }

    /// Height of one plane (half of the stacked buffer)
    pub fn sensor_height(&self) -> usize {
        self.data.nrows() / 2
    }

    /// Demultiplex the buffer into `(visible, thermal)` views
    pub fn split(&self) -> (ArrayView2<'_, u16>, ArrayView2<'_, u16>) {
        let height = self.sensor_height();
        (
            self.data.slice(s![..height, ..]),
            self.data.slice(s![height.., ..]),
        )
    }

    pub fn visible(&self) -> ArrayView2<'_, u16> {
        self.split().0
    }

    pub fn thermal(&self) -> ArrayView2<'_, u16> {
        self.split().1
    }

    /// The whole stacked buffer
    pub fn raw(&self) -> ArrayView2<'_, u16> {
        self.data.view()
    }

    /// Extract the luma channel of the packed YUY2 visible plane.
    ///
    /// Luma is the low byte of every 16-bit word.
    pub fn visible_luma(&self) -> GrayImage {
        let visible = self.visible();
        GrayImage::from_fn(
            self.sensor_width() as u32,
            self.sensor_height() as u32,
            |x, y| Luma([(visible[[y as usize, x as usize]] & 0x00FF) as u8]),
        )
    }
}
