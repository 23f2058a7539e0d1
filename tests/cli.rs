use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, write};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const README: &str = "# Widget\n\n## Install\n\n![logo](assets/logo.png)\n\nSee [the guide](docs/guide.md#setup).\n\n## License\n\nMIT\n";

fn readme_sync() -> Command {
    let mut cmd = Command::cargo_bin("readme-sync").expect("Binary exists");
    cmd.env_remove("GITHUB_TOKEN").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn sync_cli_fails_with_config_status_when_config_is_missing() {
    let base = tempdir().unwrap();

    readme_sync()
        .arg("sync")
        .arg("--base-dir")
        .arg(base.path())
        .assert()
        .code(78)
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn sync_cli_succeeds_without_repositories() {
    let base = tempdir().unwrap();
    write(base.path().join("readme-sync-config.yml"), "defaults: {}\nrepositories: []\n").unwrap();

    readme_sync()
        .arg("sync")
        .arg("--base-dir")
        .arg(base.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No repositories configured."));

    assert!(!base.path().join("readme-sync-manifest.txt").exists());
}

#[test]
fn sync_cli_logs_only_warnings_by_default() {
    let base = tempdir().unwrap();
    write(base.path().join("readme-sync-config.yml"), "repositories: []\n").unwrap();

    readme_sync()
        .env_remove("RUST_LOG")
        .arg("sync")
        .arg("--base-dir")
        .arg(base.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO").not());
}

#[test]
fn sync_cli_rejects_malformed_rule_before_fetching() {
    let base = tempdir().unwrap();
    let config = base.path().join("sync.yml");
    write(
        &config,
        "repositories:\n  - owner: acme\n    repo: widget\n    pages:\n      - extract: sometimes\n",
    )
    .unwrap();

    readme_sync()
        .arg("sync")
        .arg("--config")
        .arg(&config)
        .arg("--base-dir")
        .arg(base.path())
        .assert()
        .code(78);
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_cli_happy_flow_writes_pages_and_manifest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widget/contents/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string(README))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/missing/contents/README.md"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let base = tempdir().unwrap();
    let config = format!(
        r###"
defaults:
  notice: "<Note>Synced from {{owner}}/{{repo}}</Note>"
  api_base_url: "{}"
repositories:
  - owner: acme
    repo: missing
    output_dir: pages/missing
    pages:
      - filename: index.mdx
  - owner: acme
    repo: widget
    output_dir: pages/widget
    pages:
      - filename: install.mdx
        title: Install
        extract:
          start: "## Install"
          end: "## License"
      - filename: faq.mdx
        extract:
          start: "## FAQ"
      - filename: license
        title: License
        extract:
          lines: [11, 11]
"###,
        server.uri()
    );
    write(base.path().join("readme-sync-config.yml"), config).unwrap();

    readme_sync()
        .arg("sync")
        .arg("--base-dir")
        .arg(base.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sync complete! Generated 2 files")
                .and(predicate::str::contains("Warning: No content extracted for faq.mdx"))
                .and(predicate::str::contains("Error fetching README")),
        );

    let install = fs::read_to_string(base.path().join("pages/widget/install.mdx")).unwrap();
    assert_eq!(
        install,
        "---\ntitle: \"Install\"\ndescription: \"Auto-synced from widget repository\"\n---\n\n\
         <Note>Synced from acme/widget</Note>\n\n\
         ## Install\n\n\
         ![logo](https://raw.githubusercontent.com/acme/widget/main/assets/logo.png)\n\n\
         See [the guide](https://github.com/acme/widget/blob/main/docs/guide.md#setup)."
    );

    let license = fs::read_to_string(base.path().join("pages/widget/license.mdx")).unwrap();
    assert!(license.ends_with("</Note>\n\nMIT"));
    assert!(!base.path().join("pages/widget/faq.mdx").exists());
    assert!(!base.path().join("pages/missing").exists());

    let manifest = fs::read_to_string(base.path().join("readme-sync-manifest.txt")).unwrap();
    assert_eq!(manifest, "pages/widget/install.mdx\npages/widget/license.mdx");
}
