//! `load_config` module: Loads the YAML sync configuration and injects the API token from the environment.
//!
//! This module is the only place where untrusted YAML is parsed and mapped to the
//! strongly-typed descriptors of [`readme_sync_core::config`].
//!
//! # Responsibilities
//! - Parse the `defaults` and `repositories` sections into YAML-side structs
//! - Apply the defaults of the configuration format (branch, README path, output directory, titles)
//! - Reject malformed extraction rules here, before anything is fetched
//! - Read `GITHUB_TOKEN` so secrets never live in the YAML file
//!
//! # Errors
//! A missing file is reported as [`SyncError::ConfigNotFound`] and malformed content as
//! [`SyncError::Config`], both wrapped in `anyhow::Error` so the binary can map them to
//! its configuration exit status.

use anyhow::Result;
use readme_sync_core::config::{
    Defaults, OriginContext, PageDescriptor, RepositoryDescriptor, SyncConfig,
    DEFAULT_PAGE_FILENAME,
};
use readme_sync_core::download::TOKEN_ENV_VAR;
use readme_sync_core::extract::ExtractionRule;
use readme_sync_core::SyncError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Extension appended to page filenames that have none.
const DEFAULT_PAGE_EXTENSION: &str = "mdx";

/// A loaded configuration plus the credential taken from the environment.
#[derive(Debug)]
pub struct CliConfig {
    pub sync: SyncConfig,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    defaults: Option<DefaultsSection>,
    #[serde(default)]
    repositories: Option<Vec<RepositorySection>>,
}

#[derive(Debug, Default, Deserialize)]
struct DefaultsSection {
    #[serde(default)]
    notice: Option<String>,
    #[serde(default)]
    strip_emoji_headers: bool,
    #[serde(default)]
    api_base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositorySection {
    owner: String,
    repo: String,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    readme_path: Option<String>,
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    pages: Vec<PageSection>,
}

#[derive(Debug, Deserialize)]
struct PageSection {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    extract: ExtractionRule,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
}

/// Loads a YAML config file and reads the optional token from the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    if !path_ref.exists() {
        error!(config_path = ?path_ref, "Configuration file not found");
        return Err(SyncError::ConfigNotFound {
            path: path_ref.to_path_buf(),
        }
        .into());
    }

    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
        SyncError::io(path_ref, e)
    })?;

    let sync = parse_config(&config_content).map_err(|e| {
        error!(error = %e, config_path = ?path_ref, "Failed to load config YAML");
        e
    })?;
    sync.trace_loaded();

    let token = std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty());
    match &token {
        Some(_) => info!("{TOKEN_ENV_VAR} found in env"),
        None => {
            for repo in sync.repositories.iter().filter(|r| r.private) {
                warn!(
                    repo = %repo.name(),
                    "{TOKEN_ENV_VAR} not set; private repository will be skipped"
                );
            }
        }
    }

    Ok(CliConfig { sync, token })
}

/// Parses YAML text into a [`SyncConfig`], applying the format's defaults.
pub fn parse_config(content: &str) -> Result<SyncConfig, SyncError> {
    let raw: RawConfig = if content.trim().is_empty() {
        RawConfig {
            defaults: None,
            repositories: None,
        }
    } else {
        serde_yaml::from_str(content)
            .map_err(|e| SyncError::config(format!("failed to parse config YAML: {e}")))?
    };

    let defaults_section = raw.defaults.unwrap_or_default();
    let mut defaults = Defaults {
        notice_template: defaults_section.notice.filter(|n| !n.trim().is_empty()),
        strip_emoji_headers: defaults_section.strip_emoji_headers,
        ..Defaults::default()
    };
    if let Some(api_base_url) = defaults_section.api_base_url {
        defaults.api_base_url = api_base_url;
    }

    let repositories = raw
        .repositories
        .unwrap_or_default()
        .into_iter()
        .map(into_repository)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SyncConfig {
        defaults,
        repositories,
    })
}

fn into_repository(section: RepositorySection) -> Result<RepositoryDescriptor, SyncError> {
    if section.owner.trim().is_empty() || section.repo.trim().is_empty() {
        return Err(SyncError::config(
            "every repository needs a non-empty owner and repo",
        ));
    }

    let mut origin = OriginContext::new(section.owner, section.repo);
    if let Some(branch) = section.branch.filter(|b| !b.is_empty()) {
        origin = origin.with_branch(branch);
    }

    let mut repo = RepositoryDescriptor::new(origin);
    if let Some(readme_path) = section.readme_path {
        repo.readme_path = readme_path;
    }
    if let Some(output_dir) = section.output_dir {
        repo.output_dir = output_dir;
    }
    repo.private = section.private;

    for page in section.pages {
        let filename = page_filename(page.filename)
            .ok_or_else(|| SyncError::config(format!("empty page filename in {}", repo.name())))?;
        let mut descriptor = PageDescriptor::new(filename, page.extract);
        if let Some(title) = page.title {
            descriptor = descriptor.with_title(title);
        }
        if let Some(subtitle) = page.subtitle.filter(|s| !s.is_empty()) {
            descriptor = descriptor.with_subtitle(subtitle);
        }
        repo.pages.push(descriptor);
    }

    Ok(repo)
}

fn page_filename(filename: Option<String>) -> Option<String> {
    let filename = filename.unwrap_or_else(|| DEFAULT_PAGE_FILENAME.to_string());
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return None;
    }
    if Path::new(trimmed).extension().is_some() {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed}.{DEFAULT_PAGE_EXTENSION}"))
    }
}
