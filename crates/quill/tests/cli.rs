use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

fn quill_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_quill"))
}

fn setup_site(dir: &Path) {
    std::fs::write(
        dir.join("quill.toml"),
        r#"
name = "Ann Example"
description = "Notes and drafts"

[[pages]]
name = "Blog"
url = "/blog/"
"#,
    )
    .unwrap();

    std::fs::write(
        dir.join("index.html"),
        "<title>{{ name }}</title>\n<ul>{{{ tabs }}}</ul>\n{{{ blog }}}",
    )
    .unwrap();
    std::fs::write(
        dir.join("stream.html"),
        "<div class='stream' data-url='{{ url }}'></div>",
    )
    .unwrap();

    let blog = dir.join("blog");
    std::fs::create_dir_all(&blog).unwrap();
    std::fs::write(
        blog.join("2024-03-01-hello.html"),
        "---\ntitle: Hello\ndate: 2024-03-01 10:00:00 UTC\nstate: post\n---\n<p>Hi there</p>\n",
    )
    .unwrap();
    std::fs::write(
        blog.join("2024-03-05-draft.html"),
        "---\ntitle: Work in progress\ndate: 2024-03-05 10:00:00 UTC\nstate: draft\n---\n<p>Soon</p>\n",
    )
    .unwrap();
}

fn quill(dir: &Path, args: &[&str]) -> Output {
    Command::new(quill_binary())
        .arg("--root")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Expected exit 0, got {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

#[test]
fn render_page() {
    let dir = tempfile::tempdir().unwrap();
    setup_site(dir.path());

    let output = quill(dir.path(), &["render", "index.html", "--host", "ann.example"]);
    assert_success(&output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<title>Ann Example</title>\n<ul><li class='tab'><a href='/blog/'>Blog</a></li></ul>\n"));
    assert!(stdout.contains("<h1><a href='/blog/2024-03-01-hello'>Hello</a></h1>"));
    assert!(!stdout.contains("Work in progress"));
}

#[test]
fn render_missing_page_fails() {
    let dir = tempfile::tempdir().unwrap();
    setup_site(dir.path());

    let output = quill(dir.path(), &["render", "missing.html"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to render missing.html"));
}

#[test]
fn list_posts() {
    let dir = tempfile::tempdir().unwrap();
    setup_site(dir.path());

    let output = quill(dir.path(), &["list"]);
    assert_success(&output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("<div class='date'>Mar 1, 2024</div>"));
    assert!(!stdout.contains("Work in progress"));

    let output = quill(dir.path(), &["list", "--drafts"]);
    assert_success(&output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Work in progress"));
}

#[test]
fn list_past_the_end_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    setup_site(dir.path());

    let output = quill(dir.path(), &["list", "--start", "10"]);
    assert_success(&output);
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = quill(&dir.path().join("nowhere"), &["list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not a directory"));
}
