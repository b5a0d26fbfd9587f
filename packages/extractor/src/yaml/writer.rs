//! YAML writer for extracted specifications.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::report::render_report;
use super::{SpecWriter, WrittenFiles};
use crate::error::{ExtractorError, Result};
use crate::summary::SpecSummary;

/// Document header followed by the flattened summary.
#[derive(Debug, Serialize)]
struct YamlDocument<'a> {
    generator: String,
    generated: String,
    #[serde(flatten)]
    summary: &'a SpecSummary,
}

/// Writes `<spec>.yaml` and `<spec>.txt` into the target directory.
#[derive(Debug, Clone, Default)]
pub struct YamlSpecWriter {
    date: Option<String>,
}

impl YamlSpecWriter {
    /// Writer stamping documents with today's date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer stamping documents with a fixed date (YYYY-MM-DD).
    #[must_use]
    pub fn with_date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
        }
    }

    fn date(&self) -> String {
        self.date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string())
    }
}

impl SpecWriter for YamlSpecWriter {
    fn write(&self, summary: &SpecSummary, target: &Path) -> Result<WrittenFiles> {
        if target.exists() && !target.is_dir() {
            return Err(ExtractorError::NotADirectory(target.to_path_buf()));
        }
        fs::create_dir_all(target)?;

        let spec_number = summary.spec_number();
        let schema = write_atomic(
            target,
            &format!("{spec_number}.yaml"),
            &generate_yaml(summary, &self.date())?,
        )?;
        let report = write_atomic(target, &format!("{spec_number}.txt"), &render_report(summary))?;

        tracing::info!(schema = %schema.display(), report = %report.display(), "Wrote specification");
        Ok(WrittenFiles { schema, report })
    }
}

/// Indent YAML sequences under their parent key.
///
/// serde_yaml_ng places sequence items (`- `) at the same indent as their
/// parent key; yamllint's `indent-sequences: true` wants them nested:
///
/// ```yaml
/// # Before:          # After:
/// types:             types:
/// - short_name: A      - short_name: A
///   kind: submodel       kind: submodel
/// ```
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut seq_indents: Vec<usize> = Vec::new();

    for line in yaml.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            result.push(line.to_string());
            continue;
        }

        let indent = line.len() - trimmed.len();
        let is_item = trimmed.starts_with("- ") || trimmed == "-";

        // Leave sequences we have moved out of
        while let Some(&seq_indent) = seq_indents.last() {
            if indent < seq_indent || (indent == seq_indent && !is_item) {
                seq_indents.pop();
            } else {
                break;
            }
        }

        if is_item && seq_indents.last() != Some(&indent) {
            seq_indents.push(indent);
        }

        let extra = seq_indents.len() * 2;
        if extra > 0 {
            result.push(format!("{}{trimmed}", " ".repeat(indent + extra)));
        } else {
            result.push(line.to_string());
        }
    }

    result.join("\n")
}

/// Generate the YAML document for a summary.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn generate_yaml(summary: &SpecSummary, date: &str) -> Result<String> {
    let document = YamlDocument {
        generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        generated: date.to_string(),
        summary,
    };
    let yaml = serde_yaml_ng::to_string(&document)?;
    let yaml = indent_yaml_sequences(&yaml);

    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Write `content` to `dir/file_name` through a synced temp file and a rename.
fn write_atomic(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let output_file = dir.join(file_name);
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;
    Ok(output_file)
}
