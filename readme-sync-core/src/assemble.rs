//! Builds the final text of one output page.

use tracing::debug;

use crate::config::{Defaults, PageDescriptor, RepositoryDescriptor};
use crate::extract::extract;
use crate::metadata::{generate_header, generate_notice, strip_emoji_headers};
use crate::rewrite::{rewrite_images, rewrite_links};

/// A page ready to be written to `<output_dir>/<filename>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPage {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    Page(AssembledPage),
    /// The extraction rule selected nothing; the page is skipped.
    Empty,
}

/// extract → rewrite images → rewrite links → header → notice → concatenate.
pub fn assemble(
    raw_document: &str,
    page: &PageDescriptor,
    repo: &RepositoryDescriptor,
    defaults: &Defaults,
) -> Assembled {
    let section = extract(raw_document, &page.extraction_rule);
    if section.is_empty() {
        return Assembled::Empty;
    }
    debug!(
        filename = %page.filename,
        rule = %page.extraction_rule,
        chars = section.len(),
        "Extracted section"
    );

    let section = rewrite_images(&section, &repo.origin);
    let mut section = rewrite_links(&section, &repo.origin);
    if defaults.strip_emoji_headers {
        section = strip_emoji_headers(&section);
    }

    let header = generate_header(page, repo);
    let notice = generate_notice(repo, defaults);

    let mut content = header;
    content.push_str("\n\n");
    let notice = notice.trim();
    if !notice.is_empty() {
        content.push_str(notice);
        content.push_str("\n\n");
    }
    content.push_str(&section);

    Assembled::Page(AssembledPage {
        filename: page.filename.clone(),
        content,
    })
}
