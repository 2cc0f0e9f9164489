use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::event::ResponseRecord;

/// Append-only sink for accepted responses
pub trait ResponseLogger {
    fn log(&mut self, record: &ResponseRecord) -> io::Result<()>;
}

/// Writes one tab-separated line per response, flushed as it is written
#[derive(Debug)]
pub struct TsvLogger<W: Write> {
    out: W,
}

impl TsvLogger<BufWriter<File>> {
    /// Creates (or truncates) the log file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TsvLogger<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResponseLogger for TsvLogger<W> {
    fn log(&mut self, record: &ResponseRecord) -> io::Result<()> {
        writeln!(self.out, "{}", record.to_tsv())?;
        self.out.flush()
    }
}

/// Keeps records in memory; for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    pub records: Vec<ResponseRecord>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseLogger for MemoryLogger {
    fn log(&mut self, record: &ResponseRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

impl<L: ResponseLogger + ?Sized> ResponseLogger for &mut L {
    fn log(&mut self, record: &ResponseRecord) -> io::Result<()> {
        (**self).log(record)
    }
}
