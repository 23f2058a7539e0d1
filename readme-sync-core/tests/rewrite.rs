use readme_sync_core::config::OriginContext;
use readme_sync_core::rewrite::{rewrite, rewrite_images, rewrite_links};

fn origin() -> OriginContext {
    OriginContext::new("acme", "widget")
}

#[test]
fn test_markdown_image_becomes_raw_url() {
    let out = rewrite("![logo](assets/logo.png)", &origin());
    assert_eq!(
        out,
        "![logo](https://raw.githubusercontent.com/acme/widget/main/assets/logo.png)"
    );
}

#[test]
fn test_image_with_empty_alt_is_rewritten() {
    let out = rewrite_images("![](docs/diagram.svg)", &origin());
    assert_eq!(
        out,
        "![](https://raw.githubusercontent.com/acme/widget/main/docs/diagram.svg)"
    );
}

#[test]
fn test_src_attribute_keeps_quote_style() {
    let double = rewrite_images(r#"<img src="img/a.png" width="80">"#, &origin());
    assert_eq!(
        double,
        r#"<img src="https://raw.githubusercontent.com/acme/widget/main/img/a.png" width="80">"#
    );

    let single = rewrite_images("<img src='img/b.png'>", &origin());
    assert_eq!(
        single,
        "<img src='https://raw.githubusercontent.com/acme/widget/main/img/b.png'>"
    );
}

#[test]
fn test_branch_is_used_in_urls() {
    let origin = origin().with_branch("develop");
    let out = rewrite("![x](x.png) [guide](docs/guide.md)", &origin);
    assert_eq!(
        out,
        "![x](https://raw.githubusercontent.com/acme/widget/develop/x.png) \
         [guide](https://github.com/acme/widget/blob/develop/docs/guide.md)"
    );
}

#[test]
fn test_relative_links_become_blob_urls() {
    let out = rewrite_links("See [contributing](CONTRIBUTING.md).", &origin());
    assert_eq!(
        out,
        "See [contributing](https://github.com/acme/widget/blob/main/CONTRIBUTING.md)."
    );
}

#[test]
fn test_link_anchor_is_reappended() {
    let out = rewrite_links("[setup](docs/setup.mdx#linux)", &origin());
    assert_eq!(
        out,
        "[setup](https://github.com/acme/widget/blob/main/docs/setup.mdx#linux)"
    );
}

#[test]
fn test_non_document_links_use_same_template() {
    let out = rewrite_links("[license](LICENSE) [src](src/)", &origin());
    assert_eq!(
        out,
        "[license](https://github.com/acme/widget/blob/main/LICENSE) \
         [src](https://github.com/acme/widget/blob/main/src/)"
    );
}

#[test]
fn test_absolute_and_root_relative_references_are_untouched() {
    let text = "![a](https://cdn.example.com/a.png) ![b](/static/b.png) \
                <img src=\"http://example.com/c.png\"> <img src='/d.png'> \
                [site](https://example.com) [root](/docs/intro) [plain](http://example.com/x#y)";
    assert_eq!(rewrite(text, &origin()), text);
}

#[test]
fn test_anchor_only_links_are_untouched() {
    let text = "Jump to [usage](#usage) or [faq](#faq).";
    assert_eq!(rewrite(text, &origin()), text);
}

#[test]
fn test_rewrite_is_idempotent() {
    let text = "# Widget\n![logo](assets/logo.png)\n<img src=\"img/a.png\">\n\
                Read [the guide](docs/guide.md#start) and [the code](src/lib.rs).\n\
                [top](#widget)";
    let once = rewrite(text, &origin());
    let twice = rewrite(&once, &origin());
    assert_eq!(once, twice);
    assert!(once.contains("https://raw.githubusercontent.com/acme/widget/main/assets/logo.png"));
    assert!(once.contains("https://github.com/acme/widget/blob/main/docs/guide.md#start"));
}

#[test]
fn test_link_text_is_preserved() {
    let out = rewrite_links("[**Bold** text `code`](a/b.md)", &origin());
    assert_eq!(
        out,
        "[**Bold** text `code`](https://github.com/acme/widget/blob/main/a/b.md)"
    );
}

#[test]
fn test_images_are_not_rewritten_as_links() {
    let out = rewrite("![shot](screens/one.png)", &origin());
    assert!(!out.contains("/blob/"), "image was rewritten as a link: {out}");
}

#[test]
fn test_relative_link_after_unclosed_absolute_link_is_rewritten() {
    let out = rewrite("[a](https://x.com/a [b](docs/b.md)", &origin());
    assert_eq!(
        out,
        "[a](https://x.com/a [b](https://github.com/acme/widget/blob/main/docs/b.md)"
    );
}

#[test]
fn test_relative_image_after_unclosed_absolute_image_is_rewritten() {
    let out = rewrite("![a](https://x.com/a ![b](img/b.png)", &origin());
    assert_eq!(
        out,
        "![a](https://x.com/a ![b](https://raw.githubusercontent.com/acme/widget/main/img/b.png)"
    );
}

#[test]
fn test_skipped_match_with_multibyte_text_keeps_scanning() {
    let out = rewrite_links("[ü](/ü [é](docs/é.md)", &origin());
    assert_eq!(
        out,
        "[ü](/ü [é](https://github.com/acme/widget/blob/main/docs/é.md)"
    );
}
