//! Reading content, theme and configuration files.
//!
//! Two line-oriented read modes are offered because the pipeline needs both:
//!
//! - [`read_lines`] keeps each line's terminator, so page and post bodies are
//!   reproduced byte-for-byte when their lines are concatenated again.
//! - [`read_lines_trimmed`] drops terminators (`\n` and `\r\n`), which is what
//!   fragment substitution and positional metadata parsing want.
//!
//! A missing file is reported as [`ContentError::NotFound`] so callers can tell
//! "absent" apart from "present but unreadable". An empty file is not an error
//! here: it reads as zero lines, and the assemblers turn that into "no content".

use pulldown_cmark::{Parser, html as md_html};
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::naming;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Extensions whose bodies are rendered from Markdown to HTML.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

fn read_text(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ContentError::NotFound(path.to_path_buf()),
        _ => ContentError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Read a file as lines, each line keeping its terminator.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ContentError> {
    let text = read_text(path)?;
    Ok(text.split_inclusive('\n').map(String::from).collect())
}

/// Read a file as lines with terminators stripped.
pub fn read_lines_trimmed(path: &Path) -> Result<Vec<String>, ContentError> {
    let text = read_text(path)?;
    Ok(text.lines().map(String::from).collect())
}

/// Read and decode a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| ContentError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// List the content files of a directory, sorted by file name.
///
/// Only regular files are returned, and names containing `~` (editor backup
/// files) are skipped. A missing directory yields an empty list: a site
/// without posts or pages is valid.
pub fn list_content_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ContentError::Read {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .map(|n| !naming::is_excluded(&n.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Whether a content file's body is Markdown, judged by its extension.
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
        .unwrap_or(false)
}

/// Render a body for output: Markdown files go through pulldown-cmark, every
/// other format passes through untouched.
pub fn render_body(body: &str, markdown: bool) -> String {
    if !markdown {
        return body.to_string();
    }
    let parser = Parser::new(body);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[test]
    fn read_lines_keeps_terminators() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "a.txt", "one\ntwo\r\nthree");
        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["one\n", "two\r\n", "three"]);
    }

    #[test]
    fn read_lines_trimmed_strips_terminators() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "a.txt", "one\ntwo\r\nthree\n");
        let lines = read_lines_trimmed(&path).unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_file_reads_as_no_lines() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "empty.md", "");
        assert!(read_lines(&path).unwrap().is_empty());
        assert!(read_lines_trimmed(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = read_lines(&tmp.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn read_json_decodes() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "c.json", r#"{"name": "x"}"#);
        let sample: Sample = read_json(&path).unwrap();
        assert_eq!(sample.name, "x");
    }

    #[test]
    fn read_json_reports_decode_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "c.json", "{not json");
        let err = read_json::<Sample>(&path).unwrap_err();
        assert!(matches!(err, ContentError::Decode { .. }));
        assert!(err.to_string().contains("c.json"));
    }

    #[test]
    fn list_content_files_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "b.md", "b");
        write_file(tmp.path(), "a.md", "a");
        write_file(tmp.path(), "a.md~", "backup");
        std::fs::create_dir(tmp.path().join("subdir")).unwrap();

        let files = list_content_files(tmp.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn list_content_files_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(list_content_files(&tmp.path().join("none")).unwrap().is_empty());
    }

    #[test]
    fn markdown_detection_by_extension() {
        assert!(is_markdown(Path::new("about.md")));
        assert!(is_markdown(Path::new("about.MD")));
        assert!(is_markdown(Path::new("about.markdown")));
        assert!(!is_markdown(Path::new("about.html")));
        assert!(!is_markdown(Path::new("about")));
    }

    #[test]
    fn render_body_converts_markdown_only_when_asked() {
        assert_eq!(render_body("**hi**", false), "**hi**");
        assert!(render_body("**hi**", true).contains("<strong>hi</strong>"));
    }
}
