//! Generated blocks placed above the extracted content: front matter and an
//! optional notice banner.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{Defaults, PageDescriptor, RepositoryDescriptor};

/// Front matter with `title`, `subtitle` (when set) and `description`, in that order.
pub fn generate_header(page: &PageDescriptor, repo: &RepositoryDescriptor) -> String {
    let mut lines = vec!["---".to_string(), format!("title: \"{}\"", page.title)];

    if let Some(subtitle) = page.subtitle.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("subtitle: \"{subtitle}\""));
    }

    lines.push(format!(
        "description: \"Auto-synced from {} repository\"",
        repo.origin.repo
    ));
    lines.push("---".to_string());

    lines.join("\n")
}

/// Fills `{owner}` and `{repo}` into the configured notice. Empty when no notice is configured.
pub fn generate_notice(repo: &RepositoryDescriptor, defaults: &Defaults) -> String {
    match defaults.notice_template.as_deref() {
        Some(template) if !template.is_empty() => template
            .replace("{owner}", &repo.origin.owner)
            .replace("{repo}", &repo.origin.repo),
        _ => String::new(),
    }
}

/// `## 🚀 Install` becomes `## Install`.
pub fn strip_emoji_headers(text: &str) -> String {
    static EMOJI_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^(#{1,6})[ \t]*[\x{1F300}-\x{1F9FF}\x{2600}-\x{27BF}]+[ \t]*")
            .expect("valid regex")
    });

    EMOJI_HEADER_RE.replace_all(text, "$1 ").into_owned()
}
