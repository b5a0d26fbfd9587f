//! Command-line interface for the extractor.

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{spec_number_from_path, validate_spec_number};
use crate::error::{ExtractorError, Result};
use crate::extractor::{extract, extract_and_write};
use crate::types::AasElement;

/// AASX Extractor - Extract a type schema from AAS submodel template packages.
#[derive(Parser)]
#[command(name = "aasx-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a package and write the schema as YAML.
    Extract {
        /// Path of the .aasx package
        source: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Specification number (default: name of the package's directory)
        #[arg(short, long)]
        spec_number: Option<String>,

        /// Prefix for all type and enumeration names
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Print statistics of a package without writing anything.
    Stats {
        /// Path of the .aasx package
        source: PathBuf,

        /// Specification number (default: name of the package's directory)
        #[arg(short, long)]
        spec_number: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            source,
            output,
            spec_number,
            prefix,
        } => extract_command(
            &source,
            output.as_deref(),
            spec_number.as_deref(),
            prefix.as_deref(),
        ),
        Commands::Stats {
            source,
            spec_number,
        } => stats_command(&source, spec_number.as_deref()),
    }
}

/// Use the given specification number or derive it from the source path.
fn resolve_spec_number(source: &Path, spec_number: Option<&str>) -> Result<String> {
    let spec_number = spec_number.map_or_else(|| spec_number_from_path(source), str::to_string);
    validate_spec_number(&spec_number)?;
    Ok(spec_number)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the extract command.
fn extract_command(
    source: &Path,
    output: Option<&Path>,
    spec_number: Option<&str>,
    prefix: Option<&str>,
) -> Result<()> {
    let spec_number = resolve_spec_number(source, spec_number)?;
    let output = output.unwrap_or(Path::new("."));
    if output.exists() && !output.is_dir() {
        return Err(ExtractorError::NotADirectory(output.to_path_buf()));
    }

    println!(
        "{} {} as specification {}",
        style("Extracting").bold(),
        style(source.display()).cyan(),
        style(&spec_number).green()
    );
    println!();

    let pb = spinner("Reading package...");
    let written = match extract_and_write(source, output, &spec_number, prefix) {
        Ok(written) => written,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    match written {
        Some(files) => {
            println!(
                "{} {}",
                style("Saved to:").green().bold(),
                files.schema.display()
            );
            println!(
                "{} {}",
                style("Report:").green().bold(),
                files.report.display()
            );
        }
        None => println!(
            "{} no specification document in {}",
            style("Skipped:").yellow().bold(),
            source.display()
        ),
    }

    Ok(())
}

/// Execute the stats command.
fn stats_command(source: &Path, spec_number: Option<&str>) -> Result<()> {
    let spec_number = resolve_spec_number(source, spec_number)?;

    let pb = spinner("Reading package...");
    let summary = match extract(source, &spec_number) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    let Some(summary) = summary else {
        println!(
            "{} no specification document in {}",
            style("Skipped:").yellow().bold(),
            source.display()
        );
        return Ok(());
    };

    summary.print_statistics(&mut io::stdout().lock())?;
    if let Some(submodel) = summary.main_submodel() {
        println!("Submodel:   {}", style(submodel.short_name()).green());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_extract() {
        let cli = Cli::parse_from(["aasx-extractor", "extract", "2002/Nameplate.aasx"]);

        let Commands::Extract {
            source,
            output,
            spec_number,
            prefix,
        } = cli.command
        else {
            panic!("expected extract command");
        };
        assert_eq!(source, PathBuf::from("2002/Nameplate.aasx"));
        assert!(output.is_none());
        assert!(spec_number.is_none());
        assert!(prefix.is_none());
    }

    #[test]
    fn test_cli_parse_extract_with_options() {
        let cli = Cli::parse_from([
            "aasx-extractor",
            "extract",
            "Nameplate.aasx",
            "-o",
            "out",
            "--spec-number",
            "02006",
            "-p",
            "Idta",
        ]);

        let Commands::Extract {
            output,
            spec_number,
            prefix,
            ..
        } = cli.command
        else {
            panic!("expected extract command");
        };
        assert_eq!(output, Some(PathBuf::from("out")));
        assert_eq!(spec_number.as_deref(), Some("02006"));
        assert_eq!(prefix.as_deref(), Some("Idta"));
    }

    #[test]
    fn test_cli_parse_stats() {
        let cli = Cli::parse_from(["aasx-extractor", "stats", "x.aasx", "-s", "7"]);

        let Commands::Stats {
            source,
            spec_number,
        } = cli.command
        else {
            panic!("expected stats command");
        };
        assert_eq!(source, PathBuf::from("x.aasx"));
        assert_eq!(spec_number.as_deref(), Some("7"));
    }

    #[test]
    fn test_resolve_spec_number() {
        assert_eq!(
            resolve_spec_number(Path::new("2002/Nameplate.aasx"), None).unwrap(),
            "2002"
        );
        assert_eq!(
            resolve_spec_number(Path::new("2002/Nameplate.aasx"), Some("02006")).unwrap(),
            "02006"
        );
        assert!(matches!(
            resolve_spec_number(Path::new("x.aasx"), Some("../x")),
            Err(ExtractorError::InvalidSpecNumber(_))
        ));
    }
}
