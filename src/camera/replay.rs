use super::source::FrameSource;
use crate::error::{CameraError, Result};
use crate::frame::RawSensorFrame;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Frames read back from a dump of concatenated little-endian stacked buffers.
///
/// A trailing partial frame is treated as the end of the stream.
pub struct ReplayFrameSource {
    reader: BufReader<File>,
    path: PathBuf,
    sensor_width: usize,
    sensor_height: usize,
    buffer: Vec<u8>,
    frame_counter: u64,
    finished: bool,
}

impl ReplayFrameSource {
    pub fn open(path: impl AsRef<Path>, sensor_width: usize, sensor_height: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| CameraError::DeviceOpen {
            device: path.display().to_string(),
            details: e.to_string(),
        })?;

        debug!(
            "Opened replay file {} ({}x{} per plane)",
            path.display(),
            sensor_width,
            sensor_height
        );

        Ok(Self {
            reader: BufReader::new(file),
            path,
            sensor_width,
            sensor_height,
            buffer: vec![0; RawSensorFrame::byte_len(sensor_width, sensor_height)],
            frame_counter: 0,
            finished: false,
        })
    }

    /// Fill the frame buffer; returns how many bytes were read before end of file
    fn fill_buffer(&mut self) -> Result<usize> {
        let mut filled = 0;
        while filled < self.buffer.len() {
            match self.reader.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl FrameSource for ReplayFrameSource {
    fn next_frame(&mut self) -> Result<Option<RawSensorFrame>> {
        if self.finished {
            return Ok(None);
        }

        let filled = self.fill_buffer()?;
        if filled < self.buffer.len() {
            self.finished = true;
            if filled > 0 {
                warn!(
                    "Ignoring {} trailing bytes in {} (partial frame)",
                    filled,
                    self.path.display()
                );
            }
            info!(
                "Replay of {} finished after {} frames",
                self.path.display(),
                self.frame_counter
            );
            return Ok(None);
        }

        let frame_id = self.frame_counter;
        self.frame_counter += 1;

        RawSensorFrame::from_le_bytes(
            frame_id,
            SystemTime::now(),
            &self.buffer,
            self.sensor_width,
            self.sensor_height,
        )
        .map(Some)
    }

    fn describe(&self) -> String {
        format!("replay file {}", self.path.display())
    }
}
