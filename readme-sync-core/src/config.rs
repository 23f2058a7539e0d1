//! Domain descriptors for a sync run.
//!
//! These are built once by the configuration loader and only read afterwards.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::extract::ExtractionRule;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_README_PATH: &str = "README.md";
pub const DEFAULT_PAGE_FILENAME: &str = "index.mdx";
pub const DEFAULT_PAGE_TITLE: &str = "Untitled";
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Owner/repository/branch triple used to build absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginContext {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl OriginContext {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }
}

/// One output page of a repository.
#[derive(Debug, Clone)]
pub struct PageDescriptor {
    pub filename: String,
    pub extraction_rule: ExtractionRule,
    pub title: String,
    pub subtitle: Option<String>,
}

impl PageDescriptor {
    pub fn new(filename: impl Into<String>, extraction_rule: ExtractionRule) -> Self {
        Self {
            filename: filename.into(),
            extraction_rule,
            title: DEFAULT_PAGE_TITLE.to_string(),
            subtitle: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// A configured upstream repository and the pages generated from its README.
#[derive(Debug, Clone)]
pub struct RepositoryDescriptor {
    pub origin: OriginContext,
    pub readme_path: String,
    /// Output directory, relative to the base directory of the run.
    pub output_dir: PathBuf,
    pub private: bool,
    pub pages: Vec<PageDescriptor>,
}

impl RepositoryDescriptor {
    /// Descriptor with the defaults of the configuration format:
    /// `README.md`, `fern/docs/pages/<repo>`, public, no pages.
    pub fn new(origin: OriginContext) -> Self {
        let output_dir = PathBuf::from("fern/docs/pages").join(&origin.repo);
        Self {
            origin,
            readme_path: DEFAULT_README_PATH.to_string(),
            output_dir,
            private: false,
            pages: Vec::new(),
        }
    }

    /// `owner/repo`, used in diagnostics.
    pub fn name(&self) -> String {
        format!("{}/{}", self.origin.owner, self.origin.repo)
    }
}

#[derive(Debug, Clone)]
pub struct Defaults {
    /// Banner template with `{owner}` and `{repo}` placeholders.
    pub notice_template: Option<String>,
    pub strip_emoji_headers: bool,
    pub api_base_url: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            notice_template: None,
            strip_emoji_headers: false,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Everything a run needs besides credentials.
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    pub defaults: Defaults,
    pub repositories: Vec<RepositoryDescriptor>,
}

impl SyncConfig {
    pub fn trace_loaded(&self) {
        info!(
            repositories = self.repositories.len(),
            notice = self.defaults.notice_template.is_some(),
            "Loaded SyncConfig"
        );
        for repo in &self.repositories {
            info!(
                repo = %repo.name(),
                branch = %repo.origin.branch,
                pages = repo.pages.len(),
                private = repo.private,
                "Loaded repository"
            );
        }
        debug!(?self, "SyncConfig loaded (full debug)");
    }
}
