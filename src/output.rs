//! CLI output formatting for builds and checks.
//!
//! # Information-First Display
//!
//! Every generated document leads with its positional index and title,
//! followed by where it was written; the source file is secondary context
//! on an indented `Source:` line. This reads as a content inventory while
//! still letting users trace each page back to its file.
//!
//! # Output Format
//!
//! ```text
//! Pages
//! 001 About → about.html
//!     Source: about.md
//! 002 Posts → posts/index.html
//!     Source: posts.md
//!
//! Posts
//! 001 First Trip → posts/first-trip/index.html
//!     Source: first-trip.md
//!
//! Skipped
//!     Source: draft.md (no content)
//!
//! Generated 2 pages, 1 post, 3 static files in 12ms
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O, so they are unit
//! testable; `print_*` wrappers write to stdout.

use std::path::Path;
use std::time::Duration;

use crate::site::{BuildReport, GeneratedFile};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `2 pages`.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// `12ms` under a second, `1.25s` from there on.
fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// A path relative to `root` when possible, with `/` separators.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Header line + `Source:` context line for one generated document.
///
/// ```text
/// 001 About → about.html
///     Source: about.md
/// ```
fn entry_lines(index: usize, file: &GeneratedFile, output_root: &Path) -> [String; 2] {
    [
        format!(
            "{} {} → {}",
            format_index(index),
            file.title,
            relative(&file.output, output_root)
        ),
        format!("{}Source: {}", indent(1), file_name(&file.source)),
    ]
}

fn section(title: &str, files: &[GeneratedFile], output_root: &Path, lines: &mut Vec<String>) {
    if files.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(title.to_string());
    for (i, file) in files.iter().enumerate() {
        lines.extend(entry_lines(i + 1, file, output_root));
    }
}

/// Format the result of a build or check.
pub fn format_build_output(report: &BuildReport, output_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    section("Pages", &report.pages, output_root, &mut lines);
    section("Posts", &report.posts, output_root, &mut lines);

    if !report.skipped.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Skipped".to_string());
        for path in &report.skipped {
            lines.push(format!(
                "{}Source: {} (no content)",
                indent(1),
                file_name(path)
            ));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Generated {}, {}, {} in {}",
        count(report.pages.len(), "page", "pages"),
        count(report.posts.len(), "post", "posts"),
        count(report.static_files, "static file", "static files"),
        format_elapsed(report.elapsed),
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, output_root: &Path) {
    for line in format_build_output(report, output_root) {
        println!("{}", line);
    }
}
