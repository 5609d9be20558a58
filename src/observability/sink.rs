//! Event sinks.
//!
//! A sink receives one serialized event per call and is responsible for
//! framing it (all built-in sinks write newline-delimited records).
//! Sinks are shared between request tasks, so implementations must be
//! safe for concurrent writers.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Destination for serialized events.
pub trait Sink: Send + Sync {
    /// Write one serialized event.
    fn write(&self, data: &[u8]) -> io::Result<()>;
}

/// Newline-delimited records on standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&self, data: &[u8]) -> io::Result<()> {
        // The lock keeps concurrent records from interleaving.
        let mut out = io::stdout().lock();
        out.write_all(data)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// Newline-delimited records on standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write(&self, data: &[u8]) -> io::Result<()> {
        let mut out = io::stderr().lock();
        out.write_all(data)?;
        out.write_all(b"\n")
    }
}

/// Newline-delimited records appended to a file.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) `path` for appending.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl Sink for FileSink {
    fn write(&self, data: &[u8]) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "file sink lock poisoned"))?;
        let mut line = Vec::with_capacity(data.len() + 1);
        line.extend_from_slice(data);
        line.push(b'\n');
        file.write_all(&line)
    }
}

/// Keeps every record in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// All records written so far, parsed as JSON. Unparseable records are skipped.
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

impl Sink for MemorySink {
    fn write(&self, data: &[u8]) -> io::Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory sink lock poisoned"))?;
        lines.push(String::from_utf8_lossy(data).into_owned());
        Ok(())
    }
}
