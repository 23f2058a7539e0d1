//! CLI glue for readme-sync: argument parsing, the `sync` subcommand and user-facing output.
//!
//! All extraction, rewriting and orchestration lives in `readme-sync-core`; this module
//! resolves paths, loads the configuration, wires up a [`GithubSource`] and prints the
//! run summary.

use crate::load_config::load_config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use readme_sync_core::download::GithubSource;
use readme_sync_core::synchronise::{synchronise, write_manifest, SynchroniseReport};
use readme_sync_core::SyncError;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "readme-sync-config.yml";
pub const DEFAULT_MANIFEST_FILE: &str = "readme-sync-manifest.txt";

/// Exit status for configuration errors (sysexits `EX_CONFIG`).
pub const EXIT_CONFIG: u8 = 78;
pub const EXIT_FAILURE: u8 = 1;

/// CLI for readme-sync: mirror README sections into documentation pages.
#[derive(Parser)]
#[clap(
    name = "readme-sync",
    version,
    about = "Fetch upstream READMEs and regenerate documentation pages from configured sections"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every configured README and write its pages and the manifest
    Sync {
        /// Path to the YAML config file, relative to --base-dir unless absolute
        #[clap(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Directory that output directories and the manifest are resolved against
        #[clap(long, default_value = ".")]
        base_dir: PathBuf,
        /// Manifest listing generated pages, relative to --base-dir unless absolute
        #[clap(long, default_value = DEFAULT_MANIFEST_FILE)]
        manifest: PathBuf,
    },
}

/// Async entrypoint shared by main() and integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sync {
            config,
            base_dir,
            manifest,
        } => {
            let config_path = base_dir.join(config);
            println!("Loading configuration from: {}", config_path.display());
            let loaded = load_config(&config_path)?;

            if loaded.sync.repositories.is_empty() {
                println!("No repositories configured.");
                return Ok(());
            }
            println!(
                "Found {} repositories to sync",
                loaded.sync.repositories.len()
            );
            tracing::info!(command = "sync", "Starting synchronisation process");

            let source =
                GithubSource::with_base_url(&loaded.sync.defaults.api_base_url, loaded.token);
            let report = synchronise(&loaded.sync, &source, &base_dir).await?;
            print_report(&report);

            let files = report.generated_files();
            let manifest_path = base_dir.join(manifest);
            write_manifest(&manifest_path, &files)?;
            println!("\nManifest written to: {}", manifest_path.display());

            tracing::info!(
                command = "sync",
                generated = files.len(),
                failed_sources = report.failed_sources().count(),
                "Synchronisation complete"
            );
            Ok(())
        }
    }
}

fn print_report(report: &SynchroniseReport) {
    for source in &report.sources {
        println!("\nProcessed {}", source.name);
        if let Some(error) = &source.error {
            println!("  Error fetching README: {error}");
        }
        for skipped in &source.skipped_pages {
            println!("  Warning: No content extracted for {skipped}");
        }
        for path in &source.generated {
            println!("  Generated: {}", path.display());
        }
    }

    let files = report.generated_files();
    println!("\n{}", "=".repeat(50));
    println!("Sync complete! Generated {} files:", files.len());
    for file in &files {
        println!("  - {}", file.display());
    }
}

/// Maps a failed run to the process exit status.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SyncError>() {
        Some(e) if e.is_configuration() => EXIT_CONFIG,
        _ => EXIT_FAILURE,
    }
}
