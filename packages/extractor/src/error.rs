//! Error types for the extractor.
//!
//! Two kinds of problems are distinguished. Archive, I/O and well-formedness
//! problems abort an extraction and surface as [`ExtractorError`]. Content-shape
//! anomalies (unknown elements, unknown qualifier values, unknown identifier
//! schemes) never abort; they are collected as [`Diagnostics`] and logged.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Invalid specification number.
    #[error("Invalid specification number: '{0}'. Expected letters, digits, '-' or '_' (e.g., 02002)")]
    InvalidSpecNumber(String),

    /// The source is not a readable zip container.
    #[error("Failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The specification document is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Unknown XML element encountered.
    #[error("No handler for element <{tag_name}>{}", .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    UnknownElement {
        tag_name: String,
        context: Option<String>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// Output location exists but is not a directory.
    #[error("Output path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

/// Recoverable diagnostics collected during one extraction run.
///
/// Every message is logged at warning level when recorded.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.messages.push(message);
    }

    /// Recorded messages in order of occurrence.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Take ownership of the recorded messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}
