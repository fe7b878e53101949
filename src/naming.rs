//! Filename conventions for content files.
//!
//! A content file's identity is its file name: the stem becomes the URL slug
//! (`about.md` → `about` → `/about.html`), and files whose name contains `~`
//! are editor backups that never reach the output.
//!
//! ## Display Labels
//!
//! When a page has no `title:` line, its menu label is derived from the slug
//! with dashes converted to spaces:
//! - `about-me.md` → "about me"
//! - `contact.md` → "contact"

use std::path::Path;

/// Whether a content file name is skipped (editor backups such as `post.md~`).
pub fn is_excluded(file_name: &str) -> bool {
    file_name.contains('~')
}

/// Slug for a content file: the file name without its extension.
pub fn slug(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Display label derived from a slug: dashes become spaces.
pub fn display_label(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Capitalise a network key: first character upper case, the rest lower
/// case (`github` → `Github`, `gitHub` → `Github`).
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
