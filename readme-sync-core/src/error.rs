//! Error taxonomy shared by the core pipeline and the CLI.
//!
//! Configuration problems are fatal for a run. Fetch problems are recovered
//! per source by the orchestrator. Filesystem problems abort the run.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration exists but is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A private repository was configured but no token is available.
    #[error("GITHUB_TOKEN required for private repo: {owner}/{repo}")]
    MissingCredential { owner: String, repo: String },

    /// The document source answered with a non-success status.
    #[error("fetching {url} failed with status {status}")]
    Fetch { url: String, status: u16 },

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error belongs to the configuration class (fatal before any fetch).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. } | Self::Config(_))
    }
}
