//! Inliner configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::TransformError;

/// The TEI P5 namespace.
pub const TEI_NAMESPACE: &str = "http://www.tei-c.org/ns/1.0";

/// Name of the configuration file looked up by [`InlineConfig::discover`].
pub const CONFIG_FILE_NAME: &str = ".teinote.json";

/// What to do when two endnotes in one document share an `xml:id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIdPolicy {
    /// Fail the document.
    #[default]
    Error,
    /// Keep the note that comes last in document order and log a warning.
    LastWins,
}

/// Configuration for the inliner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InlineConfig {
    /// Namespace of every structural element (`text`, `back`, `div`,
    /// `note`, `ref`).
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// `type` attribute value identifying a notes division.
    #[serde(default = "default_notes_type")]
    pub notes_type: String,

    /// `place` attribute value written on created notes.
    #[serde(default = "default_inline_place")]
    pub inline_place: String,

    /// Duplicate note id handling.
    #[serde(default)]
    pub duplicate_ids: DuplicateIdPolicy,

    /// File patterns to include. Empty means every file the XML parser
    /// accepts by extension.
    #[serde(default)]
    pub include: Vec<String>,

    /// File patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to descend into sub-directories of the input directory.
    #[serde(default)]
    pub recursive: bool,
}

fn default_namespace() -> String {
    TEI_NAMESPACE.to_string()
}

fn default_notes_type() -> String {
    "notes".to_string()
}

fn default_inline_place() -> String {
    "inline".to_string()
}

impl InlineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            namespace: default_namespace(),
            notes_type: default_notes_type(),
            inline_place: default_inline_place(),
            duplicate_ids: DuplicateIdPolicy::default(),
            include: Vec::new(),
            exclude: Vec::new(),
            recursive: false,
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TransformError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TransformError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TransformError::config(format!("Invalid config: {}", e)))?;

        if config.notes_type.is_empty() {
            return Err(TransformError::config("notesType must not be empty"));
        }
        if config.inline_place.is_empty() {
            return Err(TransformError::config("inlinePlace must not be empty"));
        }

        Ok(config)
    }

    /// Looks for [`CONFIG_FILE_NAME`] in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self::new()
    }
}
