//! The weft trait composer CLI.
//!
//! Provides the `weftc` command with the following subcommands:
//!
//! - `weftc build <dir>` - Compose a project's traits and write the
//!   generated documents next to their compilation units
//! - `weftc check <dir>` - Run the composition without writing anything

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

mod discovery;
mod pipeline;
mod staging;

#[derive(Parser)]
#[command(name = "weftc", version, about = "The weft trait composer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a project's traits and write the generated documents
    Build {
        /// Path to the project directory (must contain *.types.json units)
        dir: PathBuf,
    },
    /// Run the composition without writing any artifacts
    Check {
        /// Path to the project directory (must contain *.types.json units)
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { dir } => run(&dir, true),
        Commands::Check { dir } => run(&dir, false),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Execute the pipeline: discover units -> compose -> stage documents.
///
/// Generated documents are written even when some declarations failed, so a
/// cyclic pair never blocks the artifacts of unrelated types; the failures
/// are reported afterwards and fail the run.
fn run(dir: &Path, write: bool) -> Result<(), String> {
    // Validate the project directory
    if !dir.exists() {
        return Err(format!(
            "Project directory '{}' does not exist",
            dir.display()
        ));
    }
    if !dir.is_dir() {
        return Err(format!("'{}' is not a directory", dir.display()));
    }

    let units = discovery::load_units(dir)?;
    if units.is_empty() {
        return Err(format!(
            "No '*{}' units found in '{}'",
            discovery::UNIT_SUFFIX,
            dir.display()
        ));
    }

    let output = pipeline::compose(&units)?;

    if write {
        for doc in &output.documents {
            let written = staging::stage(dir, doc)?;
            eprintln!("  Generated: {}", written.display());
        }
    } else {
        eprintln!(
            "  Checked: {} units, {} documents",
            units.len(),
            output.documents.len()
        );
    }

    for failure in &output.failures {
        eprintln!("error: {}: {}", failure.id, failure.error);
    }
    if !output.failures.is_empty() {
        return Err("Composition failed due to errors above.".to_string());
    }

    Ok(())
}
