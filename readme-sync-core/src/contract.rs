//! # contract: seam between the sync pipeline and where documents come from
//!
//! This module defines the [`DocumentSource`] trait. The orchestrator in
//! [`crate::synchronise`] only ever talks to a document source through it,
//! so the HTTP client in [`crate::download`] can be swapped for a mock in
//! tests or for another hosting service.
//!
//! ## Interface
//! - One async method, [`DocumentSource::fetch`], returning the raw README text
//!   of a configured repository.
//! - Errors use [`SyncError`]; the orchestrator recovers from every fetch error
//!   by skipping the repository.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; `MockDocumentSource` is exported with the
//!   `test-export-mocks` feature so integration tests can script fetch results.

use async_trait::async_trait;
use mockall::automock;

use crate::config::RepositoryDescriptor;
use crate::error::SyncError;

/// Supplies the raw README text of a repository.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch `repo.readme_path` from `repo.origin`. Called exactly once per repository per run.
    async fn fetch(&self, repo: &RepositoryDescriptor) -> Result<String, SyncError>;
}
