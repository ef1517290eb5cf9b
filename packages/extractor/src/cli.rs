//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ExtractionConfig;
use crate::error::{ExtractorError, Result};
use crate::extractor::{process_methodology, Extractor, MethodologyOptions, MethodologyRun};

/// Methodology Extractor - Derive sections and obligation rules from methodology text.
#[derive(Parser)]
#[command(name = "methodology-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract sections and rules for one methodology directory.
    Extract {
        /// Methodology directory containing META.json and txt/
        method_dir: PathBuf,

        /// Whole-document text file (default: txt/source.txt)
        #[arg(long, conflicts_with = "pages")]
        text: Option<PathBuf>,

        /// Directory with one text file per page (default: txt/)
        #[arg(long)]
        pages: Option<PathBuf>,

        /// YAML extraction configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (default: the methodology directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source document name recorded in each rule
        #[arg(long)]
        source: Option<String>,

        /// Use the permissive preset
        #[arg(long, conflicts_with = "config")]
        permissive: bool,
    },

    /// Extract several methodology directories as isolated runs.
    Batch {
        /// Methodology directories
        #[arg(required = true)]
        method_dirs: Vec<PathBuf>,

        /// YAML extraction configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Use the permissive preset
        #[arg(long, conflicts_with = "config")]
        permissive: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            method_dir,
            text,
            pages,
            config,
            output,
            source,
            permissive,
        } => {
            let extractor = build_extractor(config.as_deref(), permissive)?;
            let options = MethodologyOptions {
                text,
                pages,
                output,
                source,
            };
            extract_command(&extractor, &method_dir, &options)
        }
        Commands::Batch {
            method_dirs,
            config,
            permissive,
        } => {
            let extractor = build_extractor(config.as_deref(), permissive)?;
            batch_command(&extractor, &method_dirs)
        }
    }
}

/// Load the requested configuration and compile it.
fn build_extractor(config: Option<&Path>, permissive: bool) -> Result<Extractor> {
    let config = match config {
        Some(path) => ExtractionConfig::from_file(path)?,
        None if permissive => ExtractionConfig::permissive(),
        None => ExtractionConfig::default(),
    };
    Extractor::new(&config)
}

/// Execute the extract command.
fn extract_command(
    extractor: &Extractor,
    method_dir: &Path,
    options: &MethodologyOptions,
) -> Result<()> {
    println!(
        "{} {}",
        style("Extracting").bold(),
        style(method_dir.display()).cyan()
    );
    println!();

    let run = process_methodology(extractor, method_dir, options)?;
    print_summary(&run);

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        run.sections_path.display()
    );
    println!("          {}", run.rules_path.display());

    Ok(())
}

fn print_summary(run: &MethodologyRun) {
    println!(
        "  Methodology: {} {}",
        style(&run.meta.id).green(),
        style(&run.meta.version).green()
    );
    println!("  Sections: {}", run.extraction.sections.len());
    if run.extraction.is_placeholder_only() {
        println!(
            "  Rules: {}",
            style("none found, placeholder written").yellow().bold()
        );
    } else {
        println!("  Rules: {}", run.extraction.rules.len());
    }
}

/// Execute the batch command.
fn batch_command(extractor: &Extractor, method_dirs: &[PathBuf]) -> Result<()> {
    let total = method_dirs.len();
    let pb = ProgressBar::new(total as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut failed = 0usize;
    for method_dir in method_dirs {
        pb.set_message(method_dir.display().to_string());

        match process_methodology(extractor, method_dir, &MethodologyOptions::default()) {
            Ok(run) => {
                let placeholder = if run.extraction.is_placeholder_only() {
                    style(" (placeholder)").yellow().to_string()
                } else {
                    String::new()
                };
                pb.suspend(|| {
                    println!(
                        "{} {} {}: {} sections, {} rules{placeholder}",
                        style("ok").green().bold(),
                        run.meta.id,
                        run.meta.version,
                        run.extraction.sections.len(),
                        run.extraction.rules.len(),
                    );
                });
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(dir = %method_dir.display(), error = %e, "Methodology failed");
                pb.suspend(|| {
                    println!(
                        "{} {}: {e}",
                        style("failed").red().bold(),
                        method_dir.display()
                    );
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    println!();
    println!(
        "{} {} of {} methodologies",
        style("Processed").bold(),
        style(total - failed).green(),
        total
    );

    if failed > 0 {
        return Err(ExtractorError::BatchFailed { failed, total });
    }
    Ok(())
}
