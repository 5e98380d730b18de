//! End-to-end pipeline test: scan the fixture content, round-trip the
//! manifest through JSON the way the CLI does, generate, and inspect `dist/`.

use postpress::generate::{self, GenerateReport};
use postpress::scan::{self, Manifest};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

/// Scan → manifest.json → generate, as `postpress build` does.
fn build(out: &Path, temp: &Path) -> (Manifest, GenerateReport) {
    let source = fixtures();
    let manifest = scan::scan(&source).unwrap();
    let manifest_path = temp.join("manifest.json");
    fs::write(
        &manifest_path,
        serde_json::to_string_pretty(&manifest).unwrap(),
    )
    .unwrap();
    let report = generate::generate(&manifest_path, &source, out).unwrap();
    (manifest, report)
}

fn read(out: &Path, rel: &str) -> String {
    fs::read_to_string(out.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
}

/// The `<header class="site-header">` block of a page.
fn site_header(doc: &str) -> &str {
    let start = doc.find(r#"<header class="site-header">"#).unwrap();
    let end = start + doc[start..].find("</header>").unwrap();
    &doc[start..end]
}

#[test]
fn build_writes_every_page() {
    let out = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    let (manifest, report) = build(out.path(), temp.path());

    assert_eq!(manifest.posts.len(), 3);
    assert_eq!(report.post_count, 3);
    for rel in [
        "index.html",
        "posts/index.html",
        "posts/scala-101/index.html",
        "posts/type-classes/index.html",
        "posts/python-generators/index.html",
        "rss.xml",
        "assets/images/avatar.png",
        "assets/images/articles/scala-101-1.png",
    ] {
        assert!(out.path().join(rel).is_file(), "missing {rel}");
    }
    assert!(!out.path().join("posts/_draft-notes").exists());
}

#[test]
fn scala_101_page_carries_its_header() {
    let out = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    build(out.path(), temp.path());
    let doc = read(out.path(), "posts/scala-101/index.html");

    assert!(doc.contains("<title>Scala 101</title>"));
    assert!(doc.contains(r#"content="Learn the very basics of Scala 3""#));
    assert!(doc.contains(r#"content="2024-02-18""#));
    assert!(doc.contains(r#"src="/assets/images/articles/scala-101-1.png""#));
    assert!(doc.contains(r#"alt="Scala logo""#));
    assert!(doc.contains("Feb 18, 2024"));
    assert!(doc.contains("<table>"));
}

#[test]
fn navbar_is_the_same_everywhere() {
    let out = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    build(out.path(), temp.path());

    let home = read(out.path(), "index.html");
    let expected = site_header(&home).to_string();
    assert!(expected.contains(r#"src="/assets/icons/logo.svg""#));

    for rel in [
        "posts/index.html",
        "posts/scala-101/index.html",
        "posts/type-classes/index.html",
        "posts/python-generators/index.html",
    ] {
        let doc = read(out.path(), rel);
        assert_eq!(site_header(&doc), expected, "navbar differs on {rel}");
    }

    let blog = expected.find(">Blog<").unwrap();
    let github = expected.find(">GitHub<").unwrap();
    let twitter = expected.find(">Twitter<").unwrap();
    assert!(blog < github && github < twitter);
}

#[test]
fn landing_page_hero_and_recent_posts() {
    let out = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    build(out.path(), temp.path());
    let home = read(out.path(), "index.html");

    assert!(home.contains("Hello from Sam"));
    assert!(home.contains("I write about <em>Scala</em> and <em>Python</em>."));
    assert_eq!(home.matches(r#"class="social-button""#).count(), 3);
    assert!(home.contains(r#"src="/assets/icons/twitter.svg""#));

    // recent_posts = 2 in the fixture config
    assert!(home.contains("/posts/python-generators/"));
    assert!(home.contains("/posts/type-classes/"));
    assert!(!home.contains("/posts/scala-101/"));
    assert!(home.contains("All posts"));
}

#[test]
fn mdx_wiring_is_not_rendered() {
    let out = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    build(out.path(), temp.path());
    let doc = read(out.path(), "posts/python-generators/index.html");

    assert!(!doc.contains("import Callout"));
    assert!(!doc.contains("export const"));
    assert!(doc.contains("Generators produce values on demand"));
}

#[test]
fn feed_uses_base_url() {
    let out = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    build(out.path(), temp.path());
    let xml = read(out.path(), "rss.xml");

    assert!(xml.contains("<link>https://devnotes.example.com/posts/scala-101/</link>"));
    assert!(xml.contains("<lastBuildDate>Tue, 02 Apr 2024 00:00:00 +0000</lastBuildDate>"));
    assert_eq!(xml.matches("<item>").count(), 3);
}

#[test]
fn rebuilding_is_byte_identical() {
    let out = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    build(out.path(), temp.path());
    let first: Vec<String> = ["index.html", "posts/scala-101/index.html", "rss.xml"]
        .iter()
        .map(|rel| read(out.path(), rel))
        .collect();

    build(out.path(), temp.path());
    let second: Vec<String> = ["index.html", "posts/scala-101/index.html", "rss.xml"]
        .iter()
        .map(|rel| read(out.path(), rel))
        .collect();

    assert_eq!(first, second);
}
