//! GitHub contents API implementation of [`DocumentSource`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::{RepositoryDescriptor, DEFAULT_API_BASE_URL, DEFAULT_BRANCH};
use crate::contract::DocumentSource;
use crate::error::SyncError;

/// Asks the contents API for the file body instead of the JSON envelope.
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// Environment variable holding the optional API token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

pub struct GithubSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubSource {
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, token)
    }

    /// Points the source at another API host (GitHub Enterprise, test servers).
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let token = token.filter(|t| !t.is_empty());
        info!(
            base_url = %base_url,
            token_set = token.is_some(),
            "Initialized GithubSource"
        );
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    /// Without `?ref=` the API serves the default branch, so it is only added for other branches.
    pub fn contents_url(&self, repo: &RepositoryDescriptor) -> String {
        let mut url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url,
            repo.origin.owner,
            repo.origin.repo,
            repo.readme_path.trim_start_matches('/')
        );
        if repo.origin.branch != DEFAULT_BRANCH {
            url.push_str("?ref=");
            url.push_str(&repo.origin.branch);
        }
        url
    }
}

#[async_trait]
impl DocumentSource for GithubSource {
    async fn fetch(&self, repo: &RepositoryDescriptor) -> Result<String, SyncError> {
        if repo.private && self.token.is_none() {
            error!(repo = %repo.name(), "Private repository configured without a token");
            return Err(SyncError::MissingCredential {
                owner: repo.origin.owner.clone(),
                repo: repo.origin.repo.clone(),
            });
        }

        let url = self.contents_url(repo);
        debug!(url = %url, "Fetching README");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .header(USER_AGENT, concat!("readme-sync/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, url = %url, "README request failed");
            SyncError::Request {
                url: url.clone(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Contents API returned error");
            return Err(SyncError::Fetch {
                url,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| {
            error!(error = ?e, url = %url, "Failed to read README body");
            SyncError::Request {
                url: url.clone(),
                source: e,
            }
        })?;
        info!(repo = %repo.name(), chars = text.len(), "Fetched README");
        Ok(text)
    }
}
