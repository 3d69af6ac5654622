//! File logger for the terminal binary.
//!
//! The game owns the terminal, so log records cannot go to stdout or stderr.
//! When a log file is given, records are appended there one per line as
//! `<ms since start> <LEVEL> <target>: <message>`. Without one, logging stays
//! off.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub struct FileLogger<W: Write + Send = BufWriter<File>> {
    level: LevelFilter,
    started: Instant,
    out: Mutex<W>,
}

impl<W: Write + Send> FileLogger<W> {
    pub fn new(out: W, level: LevelFilter) -> Self {
        Self {
            level,
            started: Instant::now(),
            out: Mutex::new(out),
        }
    }

    /// Consume the logger and return its writer.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Log for FileLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_millis();
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(
                out,
                "{:>8} {:<5} {}: {}",
                elapsed,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

/// Install the global logger.
///
/// With no path the max level is set to `Off` and nothing is installed.
pub fn init(path: Option<&Path>, level: LevelFilter) -> Result<()> {
    let Some(path) = path else {
        log::set_max_level(LevelFilter::Off);
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    log::set_boxed_logger(Box::new(FileLogger::new(BufWriter::new(file), level)))
        .context("logger already installed")?;
    log::set_max_level(level);
    Ok(())
}
