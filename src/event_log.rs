//! JSONL session log.
//!
//! One JSON object per line, appended to the file named by
//! `BLOCKFALL_LOG_PATH`. A failed write disables the log for the rest of the
//! session; the game keeps running and the error is kept for the caller to
//! report once the terminal is back.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::EngineConfig;
use crate::types::LockEvent;

/// One log line.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord<'a> {
    Start { config: &'a EngineConfig },
    Restart { seed: u32 },
    Lock(LockEvent),
}

pub struct EventLog {
    path: PathBuf,
    file: Option<File>,
    buf: Vec<u8>,
    failure: Option<String>,
}

impl EventLog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self {
            path,
            file: Some(file),
            buf: Vec::with_capacity(256),
            failure: None,
        })
    }

    /// Open the log named by `BLOCKFALL_LOG_PATH`, if set.
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var("BLOCKFALL_LOG_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::open(path.trim()).map(Some),
            _ => Ok(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append one record. No-op once the log is disabled.
    pub fn record(&mut self, record: &LogRecord<'_>) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        self.buf.clear();
        let written = serde_json::to_writer(&mut self.buf, record)
            .map_err(anyhow::Error::from)
            .and_then(|()| {
                self.buf.push(b'\n');
                file.write_all(&self.buf)?;
                Ok(())
            });

        if let Err(err) = written {
            self.file = None;
            self.failure = Some(format!(
                "event log {} disabled: {err}",
                self.path.display()
            ));
        }
    }

    /// The error that disabled the log, if any. Reported once.
    pub fn take_failure(&mut self) -> Option<String> {
        self.failure.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rotation, Shape};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blockfall-{}-{name}.jsonl", std::process::id()))
    }

    #[test]
    fn records_one_json_object_per_line() {
        let path = temp_path("lines");
        let _ = std::fs::remove_file(&path);

        let config = EngineConfig::default();
        let mut log = EventLog::open(&path).unwrap();
        log.record(&LogRecord::Start { config: &config });
        log.record(&LogRecord::Lock(LockEvent {
            shape: Shape::T,
            rotation: Rotation::East,
            anchor: (21, 4),
            lines_cleared: 1,
            total_lines: 3,
            top_out: false,
        }));
        log.record(&LogRecord::Restart { seed: 7 });
        assert!(log.is_enabled());
        assert_eq!(log.path(), path.as_path());
        drop(log);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let _ = std::fs::remove_file(&path);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "start");
        assert_eq!(lines[0]["config"]["width"], 10);
        assert_eq!(lines[1]["type"], "lock");
        assert_eq!(lines[1]["shape"], "T");
        assert_eq!(lines[1]["lines_cleared"], 1);
        assert_eq!(lines[2]["seed"], 7);
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let path = std::env::temp_dir()
            .join("blockfall-no-such-dir")
            .join("log.jsonl");
        assert!(EventLog::open(path).is_err());
    }
}
