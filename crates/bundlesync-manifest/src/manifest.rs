//! Library manifest document - loading and merging
//!
//! The manifest is a YAML mapping of library identifiers to descriptors.
//! Only one entry is rewritten per run; every other entry keeps its content
//! and position.

use crate::errors::SyncError;
use crate::types::LibraryDescriptor;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// In-memory manifest, top-level key order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestDocument {
    entries: Mapping,
}

impl ManifestDocument {
    /// Load and parse the manifest at `path`
    pub fn load_from_path(path: &Path) -> Result<Self, SyncError> {
        debug!("Reading manifest from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| SyncError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse manifest text; `path` is only used for error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self, SyncError> {
        if content.trim().is_empty() {
            return Ok(ManifestDocument::default());
        }

        let value: Value =
            serde_yaml::from_str(content).map_err(|source| SyncError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        match value {
            Value::Null => Ok(ManifestDocument::default()),
            Value::Mapping(entries) => Ok(ManifestDocument { entries }),
            other => Err(SyncError::InvalidManifest {
                path: path.to_path_buf(),
                reason: format!(
                    "expected a mapping of library entries, found {}",
                    value_kind(&other)
                ),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Library identifiers in document order
    pub fn library_names(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key_label(key)).collect()
    }

    /// Raw descriptor of a library entry
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Replace the descriptor of the target entry with `descriptor`.
    ///
    /// `target` names the entry explicitly; an unknown name is appended at the
    /// end. Without a target the first entry in document order is used.
    /// Returns the identifier of the entry that was written.
    pub fn replace_entry(
        &mut self,
        target: Option<&str>,
        descriptor: &LibraryDescriptor,
    ) -> Result<String, SyncError> {
        let key = match target {
            Some(name) => Value::String(name.to_string()),
            None => self
                .entries
                .iter()
                .next()
                .map(|(key, _)| key.clone())
                .ok_or(SyncError::NoLibraryEntry)?,
        };
        let label = key_label(&key);

        if !self.entries.contains_key(&key) {
            info!("Library '{}' not in manifest, appending it", label);
        }

        // Insert on an existing key keeps its position
        self.entries.insert(key, descriptor.to_value()?);
        Ok(label)
    }

    /// Render the document as YAML
    pub fn to_yaml_string(&self) -> Result<String, SyncError> {
        Ok(serde_yaml::to_string(&self.entries)?)
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| value_kind(other).to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
