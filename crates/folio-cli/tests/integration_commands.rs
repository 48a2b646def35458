//! Integration tests for the build, clean, check and status commands.
//!
//! Commands are called directly with `--cwd` pointing at a temporary site,
//! so the process working directory is never changed.

use folio_cli::cli::{BuildArgs, CheckArgs, CleanArgs, StatusArgs};
use folio_cli::commands::{build, check, clean, status};
use folio_cli::CliError;
use folio_build::MANIFEST_FILE;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="My portfolio">
    <title>Portfolio</title>
    <link rel="stylesheet" href="css/style.css">
  </head>
  <body>
    <!-- intro -->
    <h1>Hi,   I build things</h1>
    <img src="me.png" alt="Portrait">
    <script src="js/main.js"></script>
  </body>
</html>
"#;

fn create_site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("index.html"), INDEX).unwrap();
    fs::write(root.join("me.png"), [0x89, b'P', b'N', b'G']).unwrap();
    fs::create_dir(root.join("css")).unwrap();
    fs::write(root.join("css").join("style.css"), "/* main */\nbody {\n  margin: 0;\n}\n").unwrap();
    fs::create_dir(root.join("js")).unwrap();
    fs::write(
        root.join("js").join("main.js"),
        "// boot\nfunction boot() {\n  console.log('ready');\n}\nboot();\n",
    )
    .unwrap();
    temp
}

fn cwd(temp: &TempDir) -> Option<PathBuf> {
    Some(temp.path().to_path_buf())
}

#[tokio::test]
async fn test_build_writes_site() {
    let temp = create_site();

    build::execute(BuildArgs {
        cwd: cwd(&temp),
        ..Default::default()
    })
    .await
    .unwrap();

    let dist = temp.path().join("dist");
    assert!(dist.join("index.html").is_file());
    assert!(dist.join("me.png").is_file());
    assert!(dist.join("css").join("style.css").is_file());
    assert!(dist.join("js").join("main.js").is_file());
    assert!(dist.join(MANIFEST_FILE).is_file());

    let html = fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(!html.contains("intro"));
}

#[tokio::test]
async fn test_build_with_custom_dirs() {
    let temp = create_site();
    fs::write(
        temp.path().join("folio.config.json"),
        r#"{ "buildDir": "public" }"#,
    )
    .unwrap();

    build::execute(BuildArgs {
        cwd: cwd(&temp),
        ..Default::default()
    })
    .await
    .unwrap();
    assert!(temp.path().join("public").join("index.html").is_file());

    // CLI wins over the config file
    build::execute(BuildArgs {
        cwd: cwd(&temp),
        build: Some(PathBuf::from("out")),
        ..Default::default()
    })
    .await
    .unwrap();
    assert!(temp.path().join("out").join("index.html").is_file());
}

#[tokio::test]
async fn test_build_clean_only() {
    let temp = create_site();
    let dist = temp.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("stale.html"), "old").unwrap();

    build::execute(BuildArgs {
        cwd: cwd(&temp),
        clean_only: true,
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(dist.is_dir());
    assert_eq!(fs::read_dir(&dist).unwrap().count(), 0);
}

#[tokio::test]
async fn test_build_succeeds_with_broken_page() {
    let temp = create_site();
    fs::write(temp.path().join("broken.html"), "<div class=\"oops>").unwrap();

    build::execute(BuildArgs {
        cwd: cwd(&temp),
        ..Default::default()
    })
    .await
    .unwrap();

    let dist = temp.path().join("dist");
    assert!(dist.join("index.html").is_file());
    assert!(!dist.join("broken.html").exists());
}

#[tokio::test]
async fn test_build_refuses_to_clean_source() {
    let temp = create_site();

    let err = build::execute(BuildArgs {
        cwd: cwd(&temp),
        build: Some(PathBuf::from(".")),
        ..Default::default()
    })
    .await
    .unwrap_err();

    assert!(matches!(err, CliError::Build(_)));
    assert!(temp.path().join("index.html").is_file());
}

#[tokio::test]
async fn test_build_missing_source_dir() {
    let temp = create_site();

    let err = build::execute(BuildArgs {
        cwd: cwd(&temp),
        source: Some(PathBuf::from("site")),
        ..Default::default()
    })
    .await
    .unwrap_err();

    assert!(matches!(err, CliError::FileNotFound(p) if p.ends_with("site")));
}

#[tokio::test]
async fn test_clean_removes_artifacts_and_logs() {
    let temp = create_site();
    let root = temp.path();
    fs::create_dir_all(root.join("dist")).unwrap();
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("dev.log"), "log").unwrap();

    clean::execute(CleanArgs { cwd: cwd(&temp) }).await.unwrap();

    assert!(!root.join("dist").exists());
    assert!(!root.join("build").exists());
    assert!(!root.join("dev.log").exists());
    assert!(root.join("index.html").is_file());
}

#[tokio::test]
async fn test_check_passes_for_complete_site() {
    let temp = create_site();
    check::execute(CheckArgs {
        cwd: cwd(&temp),
        strict: true,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_check_reports_problems() {
    let temp = create_site();
    fs::write(temp.path().join("about.html"), "<html><body><img src=\"x.png\"></body></html>")
        .unwrap();
    fs::write(temp.path().join("js").join("main.js"), "let = ;").unwrap();

    let err = check::execute(CheckArgs {
        cwd: cwd(&temp),
        strict: false,
    })
    .await
    .unwrap_err();

    // about.html: title, charset, viewport, alt; main.js: syntax
    assert!(matches!(err, CliError::CheckFailed(5)));
}

#[tokio::test]
async fn test_status_without_build_output() {
    let temp = create_site();
    status::execute(StatusArgs { cwd: cwd(&temp) }).await.unwrap();
}
