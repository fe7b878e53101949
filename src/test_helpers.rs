//! Shared test utilities for the paker test suite.
//!
//! Provides fixture setup (an on-disk sample site and a minimal in-memory
//! one), a file-writing helper that creates parent directories, a pinned
//! build timestamp, and ready-made [`BuildContext`]s.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let ctx = demo_context(tmp.path());
//! let path = write_file(&ctx.paths.pages_dir(), "about.md", "title: About\n");
//! let rendered = page::generate_page(&ctx, &path).unwrap().unwrap();
//! ```

use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::context::{BuildContext, SitePaths};
use crate::fragment::Theme;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// The copy contains `_Input/`; builds write to `_Output/` beside it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `contents` to `dir/rel`, creating parent directories. Returns the path.
pub fn write_file(dir: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// The smallest buildable site: a config, a theme whose fragments hold only
/// their placeholder, and one page `about.md`.
pub fn minimal_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("_Input");
    write_file(
        &input,
        "config.json",
        r#"{"site_name":"Demo","description":"d","keywords":"k","author":"a"}"#,
    );
    write_file(&input, "_Theme/head.html", "{{ title }}");
    write_file(&input, "_Theme/menu.html", "{{ menu }}");
    write_file(&input, "_Theme/body.html", "{{ body }}");
    write_file(&input, "_Theme/post_body.html", "{{ post_body }}");
    write_file(&input, "_Theme/foot.html", "{{ version_info }}");
    write_file(&input, "_Contents/_pages/about.md", "title: About\n");
    tmp
}

/// `<root>/_Input` and `<root>/_Output`.
pub fn site_paths(root: &Path) -> SitePaths {
    SitePaths::new(root.join("_Input"), root.join("_Output"))
}

/// A fixed build-start time: 2024-01-02 03:04:05 local.
pub fn fixed_time() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .earliest()
        .unwrap()
}

// =========================================================================
// Contexts
// =========================================================================

/// A context over `root` with the given config and an empty theme. Tests set
/// the theme fragments they care about.
pub fn test_context(root: &Path, config: SiteConfig) -> BuildContext {
    BuildContext {
        paths: site_paths(root),
        config,
        theme: Theme::default(),
        started_at: fixed_time(),
    }
}

/// A context with site name "Demo" and a small, tagged theme:
///
/// ```text
/// head       <title>{{ title }}</title>
/// menu       <nav><ul>{{ menu }}</ul></nav>
/// body       <main>{{ body }}</main>
/// post_body  <article>{{ post_body }}</article>
/// foot       <footer>{{ version_info }}</footer>
/// ```
pub fn demo_context(root: &Path) -> BuildContext {
    let config = SiteConfig {
        site_name: Some("Demo".to_string()),
        description: Some("d".to_string()),
        keywords: Some("k".to_string()),
        author: Some("a".to_string()),
        ..SiteConfig::default()
    };
    let mut ctx = test_context(root, config);
    ctx.theme = Theme {
        head: vec!["<title>{{ title }}</title>".to_string()],
        menu: vec!["<nav><ul>{{ menu }}</ul></nav>".to_string()],
        body: vec!["<main>{{ body }}</main>".to_string()],
        post_body: vec!["<article>{{ post_body }}</article>".to_string()],
        foot: vec!["<footer>{{ version_info }}</footer>".to_string()],
    };
    ctx
}

// =========================================================================
// Output lookups — panics with a clear message on miss
// =========================================================================

/// Read a generated file relative to the output root. Panics if missing.
pub fn read_output(paths: &SitePaths, rel: &str) -> String {
    let path = paths.output.join(rel);
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        let existing: Vec<String> = walkdir::WalkDir::new(&paths.output)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().display().to_string())
            .collect();
        panic!("output '{rel}' not readable ({e}). Existing: {existing:?}")
    })
}
