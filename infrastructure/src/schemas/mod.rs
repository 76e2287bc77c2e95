//! Static schema documents: envelope, dialog event and manifest.
//!
//! The documents ship inside the binary ([`SchemaSet::builtin`]) and can be
//! swapped for copies on disk ([`SchemaSet::from_dir`]). They only use the
//! keywords the structural validator understands, so either engine can run
//! them. The envelope document describes the whole wire payload
//! (`{"openFloor": ...}`).

use crate::config::FileValidationConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const ENVELOPE_FILE: &str = "envelope.json";
const DIALOG_EVENT_FILE: &str = "dialog-event.json";
const MANIFEST_FILE: &str = "manifest.json";

const BUILTIN_ENVELOPE: &str = include_str!("../../schemas/envelope.json");
const BUILTIN_DIALOG_EVENT: &str = include_str!("../../schemas/dialog-event.json");
const BUILTIN_MANIFEST: &str = include_str!("../../schemas/manifest.json");

/// Errors raised while loading schema documents.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("Could not read schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema {name} is not valid JSON: {message}")]
    Parse { name: String, message: String },
}

/// The three schema documents.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSet {
    envelope: Value,
    dialog_event: Value,
    manifest: Value,
}

impl SchemaSet {
    /// Documents embedded at build time.
    pub fn builtin() -> Result<Self, SchemaLoadError> {
        Ok(Self {
            envelope: parse(ENVELOPE_FILE, BUILTIN_ENVELOPE)?,
            dialog_event: parse(DIALOG_EVENT_FILE, BUILTIN_DIALOG_EVENT)?,
            manifest: parse(MANIFEST_FILE, BUILTIN_MANIFEST)?,
        })
    }

    /// Documents read from `dir`, using the built-in file names.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let dir = dir.as_ref();
        debug!("Loading schema documents from {}", dir.display());
        Ok(Self {
            envelope: read(dir, ENVELOPE_FILE)?,
            dialog_event: read(dir, DIALOG_EVENT_FILE)?,
            manifest: read(dir, MANIFEST_FILE)?,
        })
    }

    /// `schema_dir` when configured, the built-in documents otherwise.
    pub fn from_config(config: &FileValidationConfig) -> Result<Self, SchemaLoadError> {
        match &config.schema_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    pub fn envelope(&self) -> &Value {
        &self.envelope
    }

    pub fn dialog_event(&self) -> &Value {
        &self.dialog_event
    }

    pub fn manifest(&self) -> &Value {
        &self.manifest
    }
}

fn parse(name: &str, text: &str) -> Result<Value, SchemaLoadError> {
    serde_json::from_str(text).map_err(|e| SchemaLoadError::Parse {
        name: name.to_string(),
        message: e.to_string(),
    })
}

fn read(dir: &Path, name: &str) -> Result<Value, SchemaLoadError> {
    let path = dir.join(name);
    let text = std::fs::read_to_string(&path).map_err(|source| SchemaLoadError::Io {
        path: path.clone(),
        source,
    })?;
    parse(name, &text)
}
