///
/// This module implements the CLI interface for zxdb-export: command parsing, config loading,
/// wiring the SQLite row source into the core pipeline and printing the run summary.
///
/// All catalog logic (aggregation, index, pages, bundles) lives in the [`zxdb-export-core`] crate.
/// This module is strictly CLI glue.
///
/// ## How To Use
/// - For command-line users: run the `zxdb-export` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`zxdb-export-core`]: ../../zxdb-export-core/
use crate::load_config::load_config;
use crate::sqlite::{SqliteRowSource, DEFAULT_SCORE_QUERY};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zxdb_export_core::generate::{generate, GenerateReport};

/// CLI for zxdb-export: build the static game catalog from a ZXDB database.
#[derive(Parser)]
#[clap(
    name = "zxdb-export",
    version,
    about = "Generate the paginated, letter-bucketed static game catalog from a ZXDB SQLite database"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Regenerate the whole dataset from the database described in the config file
    Generate {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Override the ZXDB SQLite database path
        #[clap(long)]
        database: Option<PathBuf>,
        /// Override the output directory
        #[clap(long)]
        output: Option<PathBuf>,
    },
}

fn print_report(report: &GenerateReport) {
    println!(
        "Generated {} entries into {}",
        report.entries,
        report.output_dir.display()
    );
    for bucket in &report.buckets {
        println!(
            "  {}/ with {} pages ({} entries)",
            bucket.bucket, bucket.pages, bucket.entries
        );
    }
    for c in &report.compression {
        println!(
            "  {}: {} -> {} bytes ({:.1}% smaller)",
            c.name, c.uncompressed, c.compressed, c.ratio
        );
    }
    println!("Wrote {} files.", report.files_written);
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            config,
            database,
            output,
        } => {
            let mut config = load_config(config)?;
            if let Some(database) = database {
                config.source.database = database;
            }
            if let Some(output) = output {
                config.generate.output_dir = output;
            }
            config.trace_loaded();

            let score_query = config.source.scores.then(|| {
                config
                    .source
                    .score_query
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SCORE_QUERY.to_string())
            });
            let source = SqliteRowSource::new(config.source.database.clone(), score_query);

            println!("Generating catalog from {}...", source.database().display());
            tracing::info!(command = "generate", "Starting catalog generation");
            match generate(&config.generate, &source).await {
                Ok(report) => {
                    tracing::info!(command = "generate", ?report, "Generation complete");
                    print_report(&report);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "generate", error = %e, "Generation failed");
                    Err(anyhow::Error::new(e).context("Generation failed"))
                }
            }
        }
    }
}
