//! Rewrites README-relative references so they keep working once the text
//! is published somewhere else.
//!
//! Images point at the raw content host, links at the browsable source view.
//! Images are rewritten before links.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::OriginContext;

pub const RAW_CONTENT_HOST: &str = "raw.githubusercontent.com";
pub const SOURCE_HOST: &str = "github.com";

/// Rewrites relative images, then relative links.
pub fn rewrite(text: &str, origin: &OriginContext) -> String {
    let text = rewrite_images(text, origin);
    rewrite_links(&text, origin)
}

/// `https://raw.githubusercontent.com/<owner>/<repo>/<branch>/<path>`
pub fn raw_url(origin: &OriginContext, path: &str) -> String {
    format!(
        "https://{RAW_CONTENT_HOST}/{}/{}/{}/{path}",
        origin.owner, origin.repo, origin.branch
    )
}

/// `https://github.com/<owner>/<repo>/blob/<branch>/<path><anchor>`
pub fn blob_url(origin: &OriginContext, path: &str, anchor: &str) -> String {
    format!(
        "https://{SOURCE_HOST}/{}/{}/blob/{}/{path}{anchor}",
        origin.owner, origin.repo, origin.branch
    )
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/')
}

/// Replaces every match for which `replacement` returns `Some`.
///
/// A match that is left alone is not consumed: scanning resumes one character
/// past its start, so a relative reference nested inside it is still found.
fn replace_relative<F>(re: &Regex, text: &str, mut replacement: F) -> String
where
    F: FnMut(&Captures) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = re.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else { break };
        match replacement(&caps) {
            Some(rewritten) => {
                out.push_str(&text[copied..whole.start()]);
                out.push_str(&rewritten);
                copied = whole.end();
                pos = whole.end();
            }
            None => {
                let step = text[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                pos = whole.start() + step;
            }
        }
    }

    out.push_str(&text[copied..]);
    out
}

/// Markdown `![alt](path)` and markup `src="path"` / `src='path'`.
pub fn rewrite_images(text: &str, origin: &OriginContext) -> String {
    static MD_IMAGE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"));
    static SRC_ATTR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"src=(["'])([^"']+)["']"#).expect("valid regex"));

    let text = replace_relative(&MD_IMAGE_RE, text, |caps| {
        let path = &caps[2];
        (!is_absolute(path)).then(|| format!("![{}]({})", &caps[1], raw_url(origin, path)))
    });

    replace_relative(&SRC_ATTR_RE, &text, |caps| {
        let path = &caps[2];
        let quote = &caps[1];
        (!is_absolute(path)).then(|| format!("src={quote}{}{quote}", raw_url(origin, path)))
    })
}

/// Markdown `[text](path#anchor)`; anchor-only links are left alone.
pub fn rewrite_links(text: &str, origin: &OriginContext) -> String {
    static MD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\[([^\]]+)\]\(([^)#]+)(#[^)]+)?\)").expect("valid regex")
    });

    replace_relative(&MD_LINK_RE, text, |caps| {
        let path = &caps[2];
        if is_absolute(path) {
            return None;
        }
        let anchor = caps.get(3).map_or("", |m| m.as_str());
        // .md/.mdx and other paths share the blob view
        Some(format!("[{}]({})", &caps[1], blob_url(origin, path, anchor)))
    })
}
