//! Submission recording back ends.
//!
//! A proposed transcript edit is a `{id, transcript}` record appended as raw
//! JSON text to one shared log file. Successive records are concatenated with
//! no delimiter and no locking; whatever consumes the log is expected to
//! re-split the stream. The [`SubmissionSink`] trait exists so tests can
//! capture records in memory instead of touching the filesystem.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One proposed transcript edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Identifier of the comic being transcribed
    pub id: String,
    /// Proposed transcript text
    pub transcript: String,
}

/// Core trait for submission recording implementations
pub trait SubmissionSink {
    /// Persist one proposed edit.
    fn record_submission(&self, id: &str, transcript: &str) -> Result<()>;
}

/// Appends JSON records to a shared log file
///
/// The file is opened in append mode on every call and created if absent.
/// Records are written back to back; no separator is inserted before or
/// after, matching the raw concatenated shape of the log.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SubmissionSink for FileSink {
    fn record_submission(&self, id: &str, transcript: &str) -> Result<()> {
        let record = SubmissionRecord {
            id: id.to_string(),
            transcript: transcript.to_string(),
        };
        let encoded = serde_json::to_string(&record)
            .map_err(|e| Error::SubmissionError(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                Error::SubmissionError(format!("{}: {}", self.path.display(), e))
            })?;
        file.write_all(encoded.as_bytes())
            .map_err(|e| Error::SubmissionError(e.to_string()))?;

        log::info!("recorded transcript submission for comic {}", id);
        Ok(())
    }
}

/// Captures records in memory
///
/// Test double in the spirit of the filesystem sink: call order is preserved
/// and nothing is written to disk.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records captured so far, in submission order.
    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().expect("sink lock poisoned").clone()
    }
}

impl SubmissionSink for MemorySink {
    fn record_submission(&self, id: &str, transcript: &str) -> Result<()> {
        self.records
            .lock()
            .expect("sink lock poisoned")
            .push(SubmissionRecord {
                id: id.to_string(),
                transcript: transcript.to_string(),
            });
        Ok(())
    }
}
