// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Where frames go once they are rendered.

use image::png::PNGEncoder;
use image::ColorType;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use errors::ZoomError;
use frame::FrameBuffer;

/// The identifier of frame `index`: five zero-padded digits, so that
/// the frames of a zoom sort in order.
pub fn frame_name(index: usize) -> String {
    format!("{:05}", index)
}

/// The file name frame `index` is written to.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{}.png", frame_name(index))
}

/// Receives rendered frames, in order.  An error stops the zoom; no
/// further frames are rendered or offered.
pub trait FrameSink {
    /// Persist one frame.
    fn write_frame(&mut self, index: usize, frame: &FrameBuffer) -> Result<(), ZoomError>;
}

/// Writes each frame as an RGBA PNG into a directory.
#[derive(Debug)]
pub struct PngDirectory {
    dir: PathBuf,
}

impl PngDirectory {
    /// Uses `dir` for output, creating it if it does not exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<PngDirectory, ZoomError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(PngDirectory { dir })
    }

    /// The full path frame `index` is written to.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(frame_file_name(index))
    }

    fn encode(&self, path: &Path, frame: &FrameBuffer) -> Result<(), io::Error> {
        let mut output = BufWriter::new(File::create(path)?);
        PNGEncoder::new(&mut output).encode(
            frame.as_bytes(),
            frame.width() as u32,
            frame.height() as u32,
            ColorType::RGBA(8),
        )?;
        output.flush()
    }
}

impl FrameSink for PngDirectory {
    fn write_frame(&mut self, index: usize, frame: &FrameBuffer) -> Result<(), ZoomError> {
        let path = self.path_for(index);
        debug!("writing {}", path.display());
        self.encode(&path, frame)
            .map_err(|cause| ZoomError::Encoding { index, cause })
    }
}

/// Keeps frames in memory, optionally failing on a chosen frame.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Frames written so far, with their indexes.
    pub frames: Vec<(usize, FrameBuffer)>,
    /// Frame to refuse with an encoding error.
    pub fail_at: Option<usize>,
}

#[cfg(test)]
impl FrameSink for MemorySink {
    fn write_frame(&mut self, index: usize, frame: &FrameBuffer) -> Result<(), ZoomError> {
        if self.fail_at == Some(index) {
            return Err(ZoomError::Encoding {
                index,
                cause: io::Error::new(io::ErrorKind::Other, "refused"),
            });
        }
        self.frames.push((index, frame.clone()));
        Ok(())
    }
}
