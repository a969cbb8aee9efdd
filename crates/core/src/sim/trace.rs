//! Input trace recording and serialization.
//!
//! Every externally-injected input is recorded as an action `{iteration,
//! address, value}`. Actions accumulate in memory for the whole run and are
//! serialized in one pass on demand; the wire format is little-endian:
//!
//! ```text
//! u32 magic = 0xCAFEBABE
//! u32 format_version = 668
//! i32 configuration
//! repeated:
//!   i32 iteration_timestamp
//!   i32 record_count           // > 0
//!   record_count x { i32 address, f64 value }
//! terminator:
//!   i32 iteration_timestamp = final iteration + 1
//!   i32 record_count = 0
//! ```
//!
//! Actions sharing an iteration are coalesced into one group in insertion
//! order; iterations only move forward, so equal timestamps are always
//! adjacent in the log.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::common::constants::{TRACE_MAGIC, TRACE_VERSION};
use crate::machine::Machine;

/// One externally-injected input, timestamped with its iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputAction {
    /// Iteration current when the input was written.
    pub iteration: u32,
    /// Input cell address written.
    pub addr: usize,
    /// Value written.
    pub value: f64,
}

/// In-memory accumulator for a run's input actions.
#[derive(Debug, Default)]
pub struct TraceLog {
    actions: Vec<InputAction>,
}

impl TraceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one action.
    pub fn record(&mut self, iteration: u32, addr: usize, value: f64) {
        self.actions.push(InputAction {
            iteration,
            addr,
            value,
        });
    }

    /// Discards all recorded actions.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Returns the recorded actions in insertion order.
    pub fn actions(&self) -> &[InputAction] {
        &self.actions
    }

    /// Serializes the log in the binary trace format.
    ///
    /// Groups consecutive actions sharing an iteration, then writes the
    /// zero-count terminator at `end_iteration`. Writing an empty log is
    /// valid and produces a header plus the terminator only.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        configuration: i32,
        end_iteration: u32,
    ) -> io::Result<()> {
        writer.write_all(&TRACE_MAGIC.to_le_bytes())?;
        writer.write_all(&TRACE_VERSION.to_le_bytes())?;
        writer.write_all(&configuration.to_le_bytes())?;

        let mut rest = &self.actions[..];
        while let Some(first) = rest.first() {
            let count = rest
                .iter()
                .take_while(|a| a.iteration == first.iteration)
                .count();
            let (group, tail) = rest.split_at(count);
            writer.write_all(&(first.iteration as i32).to_le_bytes())?;
            writer.write_all(&(count as i32).to_le_bytes())?;
            for action in group {
                writer.write_all(&(action.addr as i32).to_le_bytes())?;
                writer.write_all(&action.value.to_le_bytes())?;
            }
            rest = tail;
        }

        writer.write_all(&(end_iteration as i32).to_le_bytes())?;
        writer.write_all(&0i32.to_le_bytes())?;
        Ok(())
    }
}

impl Machine {
    /// Writes the current run's input trace to `path`.
    ///
    /// The terminator timestamp is the current iteration plus one. Safe to
    /// call with no recorded actions.
    ///
    /// # Errors
    ///
    /// Any underlying write failure.
    pub fn emit_trace(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.trace
            .write_to(&mut writer, self.configuration, self.iteration + 1)?;
        writer.flush()?;
        debug!(
            actions = self.trace.actions().len(),
            path = %path.display(),
            "wrote input trace"
        );
        Ok(())
    }
}

/// Deterministic trace file name for a halted run.
pub fn trace_filename(configuration: i32, score: f64) -> String {
    format!("{configuration}-{score}.trace")
}

/// One parsed trace group: the actions injected during one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFrame {
    /// Iteration the group's actions were recorded at.
    pub iteration: u32,
    /// `(address, value)` pairs in recorded order.
    pub actions: Vec<(usize, f64)>,
}

/// A fully parsed trace file.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFile {
    /// Configuration value of the recorded run.
    pub configuration: i32,
    /// Record groups in timestamp order.
    pub frames: Vec<TraceFrame>,
    /// Terminator timestamp (final iteration of the recorded run plus one).
    pub end_iteration: u32,
}

impl TraceFile {
    /// Parses a trace file written by [`Machine::emit_trace`].
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::InvalidData`] error on a bad magic number or format
    /// version, or any underlying read failure.
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);

        let magic = read_u32(&mut reader)?;
        if magic != TRACE_MAGIC {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("bad trace magic {magic:#010x}"),
            ));
        }
        let version = read_u32(&mut reader)?;
        if version != TRACE_VERSION {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("unsupported trace version {version}"),
            ));
        }
        let configuration = read_u32(&mut reader)? as i32;

        let mut frames = Vec::new();
        loop {
            let iteration = read_u32(&mut reader)?;
            let count = read_u32(&mut reader)?;
            if count == 0 {
                return Ok(Self {
                    configuration,
                    frames,
                    end_iteration: iteration,
                });
            }
            let mut actions = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let addr = read_u32(&mut reader)? as usize;
                let value = read_f64(&mut reader)?;
                actions.push((addr, value));
            }
            frames.push(TraceFrame { iteration, actions });
        }
    }
}

fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_f64<R: Read>(reader: &mut R) -> io::Result<f64> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes)?;
    Ok(f64::from_le_bytes(bytes))
}
