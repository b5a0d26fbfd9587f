//! Output generation for extracted specifications.
//!
//! The extractor hands its [`SpecSummary`](crate::summary::SpecSummary) to a
//! [`SpecWriter`]. The default [`YamlSpecWriter`] dumps the schema as YAML and
//! adds a plain-text report next to it.

mod report;
mod writer;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::summary::SpecSummary;

pub use report::render_report;
pub use writer::{generate_yaml, YamlSpecWriter};

/// Files produced by one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    /// The schema document.
    pub schema: PathBuf,
    /// The human-readable statistics report.
    pub report: PathBuf,
}

/// Consumer of extraction results.
pub trait SpecWriter {
    /// Write `summary` into the directory `target`.
    ///
    /// # Errors
    /// Returns an error if the output cannot be generated or stored.
    fn write(&self, summary: &SpecSummary, target: &Path) -> Result<WrittenFiles>;
}
