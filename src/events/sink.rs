//! Event sinks
//!
//! Turn events are handed to a sink the moment they are generated. The JSONL
//! writer streams them to `logs.jsonl`; a plain `Vec` collects them in memory.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::events::TurnEvent;
use crate::simulation::SimulationResult;

/// Destination for turn events
pub trait EventSink {
    /// Accept one event
    fn emit(&mut self, event: &TurnEvent) -> SimulationResult<()>;

    /// Push buffered events to their destination
    fn flush(&mut self) -> SimulationResult<()> {
        Ok(())
    }
}

impl EventSink for Vec<TurnEvent> {
    fn emit(&mut self, event: &TurnEvent) -> SimulationResult<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Discards events; used when only the relational tables are wanted
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &TurnEvent) -> SimulationResult<()> {
        Ok(())
    }
}

/// Compact JSON with a space after each `,` and `:` separator
#[derive(Debug, Default, Clone, Copy)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

/// Writes one JSON object per line, `{"key": value, ...}`
#[derive(Debug)]
pub struct JsonlEventWriter<W: Write> {
    writer: W,
    lines_written: usize,
}

impl JsonlEventWriter<BufWriter<File>> {
    /// Create (truncating) a JSONL file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> SimulationResult<Self> {
        let path = path.as_ref();
        debug!("Opening event log {}", path.display());
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlEventWriter<W> {
    /// Wrap an arbitrary writer
    pub fn new(writer: W) -> Self {
        Self { writer, lines_written: 0 }
    }

    /// Number of events written so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Flush and return the inner writer
    pub fn into_inner(mut self) -> SimulationResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> EventSink for JsonlEventWriter<W> {
    fn emit(&mut self, event: &TurnEvent) -> SimulationResult<()> {
        let mut serializer = serde_json::Serializer::with_formatter(&mut self.writer, SpacedFormatter);
        event.serialize(&mut serializer)?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> SimulationResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
