//! High-level pipeline: fetch → assemble → write for every configured repository.
//!
//! This module provides the orchestration of a sync run as described by a loaded
//! [`SyncConfig`]:
//!   - Fetches each repository's README through a [`DocumentSource`]
//!   - Assembles one page per configured [`crate::config::PageDescriptor`]
//!   - Writes pages below the run's base directory and reports what was generated
//!
//! # Responsibilities
//! - Sequential processing, in configuration order, one fetch per repository
//! - A failed fetch skips that repository only; the run continues with the next one
//! - A page whose extraction selected nothing is skipped with a warning
//! - Filesystem errors abort the run
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]
//! - Supporting types: [`SynchroniseReport`], [`SourceReport`]; manifest via [`write_manifest`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::assemble::{assemble, Assembled};
use crate::config::{RepositoryDescriptor, SyncConfig};
use crate::contract::DocumentSource;
use crate::error::SyncError;

/// Outcome of a whole run.
#[derive(Debug, Default, Serialize)]
pub struct SynchroniseReport {
    pub sources: Vec<SourceReport>,
}

impl SynchroniseReport {
    /// Every generated path, relative to the base directory, in generation order.
    pub fn generated_files(&self) -> Vec<PathBuf> {
        self.sources
            .iter()
            .flat_map(|s| s.generated.iter().cloned())
            .collect()
    }

    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| s.error.is_some())
    }
}

#[derive(Debug, Serialize)]
pub struct SourceReport {
    /// `owner/repo`
    pub name: String,
    pub generated: Vec<PathBuf>,
    /// Filenames of pages whose extraction came back empty.
    pub skipped_pages: Vec<String>,
    /// Why the README could not be fetched, if it could not.
    pub error: Option<String>,
}

impl SourceReport {
    fn new(repo: &RepositoryDescriptor) -> Self {
        Self {
            name: repo.name(),
            generated: Vec::new(),
            skipped_pages: Vec::new(),
            error: None,
        }
    }
}

pub async fn synchronise<S>(
    config: &SyncConfig,
    source: &S,
    base_dir: &Path,
) -> Result<SynchroniseReport, SyncError>
where
    S: DocumentSource + ?Sized,
{
    info!(
        repositories = config.repositories.len(),
        base_dir = %base_dir.display(),
        "[SYNC] Starting synchronisation"
    );

    let mut report = SynchroniseReport::default();

    for repo in &config.repositories {
        info!(repo = %repo.name(), "[SYNC] Processing repository");
        let mut source_report = SourceReport::new(repo);

        let document = match source.fetch(repo).await {
            Ok(text) => {
                info!(repo = %repo.name(), chars = text.len(), "[SYNC] Fetched README");
                text
            }
            Err(e) => {
                error!(repo = %repo.name(), error = %e, "[SYNC][ERROR] Fetch failed, skipping repository");
                source_report.error = Some(e.to_string());
                report.sources.push(source_report);
                continue;
            }
        };

        let output_dir = base_dir.join(&repo.output_dir);
        fs::create_dir_all(&output_dir).map_err(|e| {
            error!(error = ?e, path = %output_dir.display(), "[SYNC][ERROR] Failed to create output directory");
            SyncError::io(&output_dir, e)
        })?;

        for page in &repo.pages {
            debug!(filename = %page.filename, rule = %page.extraction_rule, "[SYNC] Extracting page");

            let assembled = match assemble(&document, page, repo, &config.defaults) {
                Assembled::Page(assembled) => assembled,
                Assembled::Empty => {
                    warn!(
                        repo = %repo.name(),
                        filename = %page.filename,
                        rule = %page.extraction_rule,
                        "[SYNC] No content extracted, skipping page"
                    );
                    source_report.skipped_pages.push(page.filename.clone());
                    continue;
                }
            };

            let target = output_dir.join(&assembled.filename);
            fs::write(&target, &assembled.content).map_err(|e| {
                error!(error = ?e, path = %target.display(), "[SYNC][ERROR] Failed to write page");
                SyncError::io(&target, e)
            })?;

            let relative = repo.output_dir.join(&assembled.filename);
            info!(path = %relative.display(), bytes = assembled.content.len(), "[SYNC] Generated page");
            source_report.generated.push(relative);
        }

        report.sources.push(source_report);
    }

    match serde_json::to_string_pretty(&report) {
        Ok(json) => debug!(json = %json, "[SYNC][DEBUG] Report as JSON"),
        Err(e) => error!(error = ?e, "[SYNC][DEBUG] Failed to serialize report as JSON"),
    }

    Ok(report)
}

/// Writes one path per line, replacing any previous manifest.
pub fn write_manifest(path: &Path, files: &[PathBuf]) -> Result<(), SyncError> {
    let body = files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }
    fs::write(path, body).map_err(|e| {
        error!(error = ?e, path = %path.display(), "Failed to write manifest");
        SyncError::io(path, e)
    })?;
    info!(path = %path.display(), entries = files.len(), "Manifest written");
    Ok(())
}
