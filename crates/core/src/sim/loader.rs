//! Binary program image loader.
//!
//! A program image is a headerless sequence of 12-byte little-endian frames,
//! one per cell address starting at 0. Each frame packs one f64 data word and
//! one u32 instruction word, with the field order alternating by frame
//! parity: even frames are `[f64][u32]`, odd frames are `[u32][f64]`. The
//! alternation is the wire format produced by the toolchain that emits these
//! images and must be preserved exactly.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::common::constants::{FRAME_SIZE, MEMORY_CELLS};
use crate::common::error::LoadError;
use crate::machine::Machine;

impl Machine {
    /// Loads a packed program image into the data and program arrays.
    ///
    /// Both arrays are zeroed first, so a short image leaves trailing cells
    /// at zero. A short final frame (fewer than 12 bytes, including a file
    /// length that is not a multiple of 12) ends the load silently at that
    /// frame count; a streaming producer may not pad the final frame.
    ///
    /// # Errors
    ///
    /// [`LoadError::TooManyFrames`] if the image holds more frames than the
    /// machine has cells; [`LoadError::Io`] on any underlying read failure.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        self.bank.clear_image();

        let mut reader = BufReader::new(File::open(path)?);
        let mut frame = 0usize;

        while let Some(buf) = read_frame(&mut reader)? {
            if frame >= MEMORY_CELLS {
                return Err(LoadError::TooManyFrames);
            }

            let (datum, word) = if frame % 2 == 0 {
                (f64_at(&buf, 0), u32_at(&buf, 8))
            } else {
                (f64_at(&buf, 4), u32_at(&buf, 0))
            };

            self.bank.set_data(frame, datum);
            self.bank.set_program(frame, u64::from(word));
            frame += 1;
        }

        debug!(frames = frame, path = %path.display(), "loaded program image");
        Ok(())
    }
}

/// Reads one whole frame, or `None` once the image runs out.
///
/// A partial frame at end of file is treated the same as a clean end.
fn read_frame<R: Read>(reader: &mut R) -> io::Result<Option<[u8; FRAME_SIZE]>> {
    let mut buf = [0u8; FRAME_SIZE];
    let mut filled = 0;
    while filled < FRAME_SIZE {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Ok(None),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(Some(buf))
}

fn f64_at(buf: &[u8; FRAME_SIZE], offset: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[offset..offset + 8]);
    f64::from_le_bytes(bytes)
}

fn u32_at(buf: &[u8; FRAME_SIZE], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}
