//! JSONL file writer for the envelope trace.
//!
//! Each [`EnvelopeRecord`] is serialized as a single JSON line with
//! `direction`, `timestamp` and `envelope` fields, appended to the file via a
//! buffered writer.

use openfloor_application::ports::envelope_logger::{EnvelopeLogger, EnvelopeRecord};
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL envelope logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEnvelopeLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEnvelopeLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create envelope log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open envelope log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EnvelopeLogger for JsonlEnvelopeLogger {
    fn log(&self, record: EnvelopeRecord) {
        let timestamp = record
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let line = json!({
            "direction": record.direction,
            "timestamp": timestamp,
            "envelope": record.envelope,
        });

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // JSONL is append-only; flush each record so a crash loses nothing
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlEnvelopeLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
