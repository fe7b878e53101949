//! Post assembly and the post listing.
//!
//! A post source starts with a fixed, positional metadata header:
//!
//! ```text
//! title: Hello World              ← line 1
//! dateandtime: 2024-03-01 09:30   ← line 2
//! category: notes                 ← line 3
//! tags: rust, ssg                 ← line 4
//!                                 ← line 5, separator (ignored)
//! Body starts here...             ← line 6 onwards
//! ```
//!
//! Lines are matched by position, not by key lookup: the four metadata lines
//! must appear in exactly this order. A file with fewer than
//! [`HEADER_LINES`] lines, or whose metadata line does not start with the
//! expected key, is rejected as [`PostError::Malformed`]. An empty file is
//! "no content" and yields `Ok(None)`.
//!
//! Each post is written to `posts/<slug>/index.html` and is reachable at
//! `/posts/<slug>/`.
//!
//! ## Listing Order
//!
//! The post list is sorted by `dateandtime`, newest first. The value is read
//! as a date-time in one of [`TIMESTAMP_FORMATS`] (`2024-03-01 09:30`,
//! `2024-3-1 09:30:15`, `2024-03-01T09:30`, or a bare `2024-03-01` meaning
//! midnight); month, day and hour need not be zero-padded. Posts whose value
//! parses come first. The rest follow, ordered by their raw strings, newest
//! first. Posts with the same timestamp are ordered by slug. Directory order
//! is never used since it differs between filesystems.

use chrono::{NaiveDate, NaiveDateTime};
use maud::{Markup, PreEscaped, html};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::{self, ContentError};
use crate::context::{BuildContext, SitePaths};
use crate::fragment;
use crate::naming;
use crate::page::Rendered;

/// Minimum line count of a post: four metadata lines and a separator.
pub const HEADER_LINES: usize = 5;

/// Metadata keys, in their required order.
const META_KEYS: [&str; 4] = ["title", "dateandtime", "category", "tags"];

/// Accepted `dateandtime` layouts, tried in order.
pub const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layout; the time is midnight.
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum PostError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("Malformed post {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// The four metadata fields of a post, verbatim from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub dateandtime: String,
    pub category: String,
    pub tags: String,
}

/// A parsed post source.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub source: PathBuf,
    pub slug: String,
    pub meta: PostMeta,
    /// Raw body text (line 6 onwards), terminators preserved.
    pub body: String,
    pub markdown: bool,
}

/// What the post list shows for each post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub slug: String,
    pub url: String,
    pub title: String,
    pub dateandtime: String,
    pub category: String,
}

fn meta_value(line: &str, key: &str) -> Option<String> {
    line.trim_end()
        .strip_prefix(key)?
        .strip_prefix(':')
        .map(|value| value.trim().to_string())
}

impl Post {
    /// Parse a post from its lines (terminators kept).
    pub fn parse(source: &Path, lines: &[String]) -> Result<Option<Self>, PostError> {
        if lines.is_empty() {
            return Ok(None);
        }
        let malformed = |reason: String| PostError::Malformed {
            path: source.to_path_buf(),
            reason,
        };
        if lines.len() < HEADER_LINES {
            return Err(malformed(format!(
                "expected at least {HEADER_LINES} lines (4 metadata lines and a separator), found {}",
                lines.len()
            )));
        }

        let mut values = Vec::with_capacity(META_KEYS.len());
        for (idx, key) in META_KEYS.iter().enumerate() {
            let value = meta_value(&lines[idx], key)
                .ok_or_else(|| malformed(format!("line {} must start with `{key}:`", idx + 1)))?;
            values.push(value);
        }
        let [title, dateandtime, category, tags]: [String; 4] = values
            .try_into()
            .map_err(|_| malformed("incomplete metadata".to_string()))?;

        Ok(Some(Self {
            source: source.to_path_buf(),
            slug: naming::slug(source),
            meta: PostMeta {
                title,
                dateandtime,
                category,
                tags,
            },
            body: lines[HEADER_LINES..].concat(),
            markdown: content::is_markdown(source),
        }))
    }

    pub fn url(&self) -> String {
        format!("/posts/{}/", self.slug)
    }

    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            url: self.url(),
            title: self.meta.title.clone(),
            dateandtime: self.meta.dateandtime.clone(),
            category: self.meta.category.clone(),
        }
    }
}

/// Read and parse one post source.
pub fn read_post(path: &Path) -> Result<Option<Post>, PostError> {
    let lines = content::read_lines(path)?;
    Post::parse(path, &lines)
}

/// Info block (title, timestamp, category, tags) followed by the body.
///
/// Metadata is inserted as written, like every other substituted value.
pub fn render_post_block(meta: &PostMeta, body_html: &str) -> Markup {
    html! {
        div #post_extra_info {
            h1.post_title { (PreEscaped(&meta.title)) }
            div.post_infos {
                p { b { "Created At: " } (PreEscaped(&meta.dateandtime)) }
                p {
                    b { "Category: " } (PreEscaped(&meta.category))
                    " "
                    b { "Tags: " } (PreEscaped(&meta.tags))
                }
            }
        }
        div #post_body { (PreEscaped(body_html)) }
    }
}

/// Assemble a parsed post into its final HTML document.
pub fn render_post(ctx: &BuildContext, post: &Post) -> Result<Rendered, ContentError> {
    let body_html = content::render_body(&post.body, post.markdown);
    let block = render_post_block(&post.meta, &body_html).into_string();
    let assembled = fragment::assemble(ctx, Some(&post.meta.title), &block, true)?;
    Ok(Rendered {
        title: post.meta.title.clone(),
        source: post.source.clone(),
        output: ctx.paths.post_output(&post.slug),
        html: assembled.into_html(),
    })
}

/// Read and assemble one post source. `Ok(None)` when the file is empty.
pub fn generate_post(ctx: &BuildContext, path: &Path) -> Result<Option<Rendered>, PostError> {
    match read_post(path)? {
        Some(post) => Ok(Some(render_post(ctx, &post)?)),
        None => Ok(None),
    }
}

/// Read a `dateandtime` value in any of the accepted layouts.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Summaries of every listable post, newest first.
///
/// Files that cannot be read, are empty, or are malformed are left out of the
/// list; they do not stop the listing.
pub fn curated_list_of_posts(paths: &SitePaths) -> Result<Vec<PostSummary>, ContentError> {
    let mut summaries: Vec<PostSummary> = content::list_content_files(&paths.posts_dir())?
        .iter()
        .filter_map(|path| read_post(path).ok().flatten())
        .map(|post| post.summary())
        .collect();

    summaries.sort_by(|a, b| {
        let by_time = match (parse_timestamp(&a.dateandtime), parse_timestamp(&b.dateandtime)) {
            (Some(a_time), Some(b_time)) => b_time.cmp(&a_time),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.dateandtime.cmp(&a.dateandtime),
        };
        by_time.then_with(|| a.slug.cmp(&b.slug))
    });
    Ok(summaries)
}

/// The post list markup substituted for `{{ list }}`.
pub fn render_post_list(posts: &[PostSummary]) -> Markup {
    html! {
        div #post_list {
            ul {
                @for post in posts {
                    li {
                        h2 { a href=(post.url) { (PreEscaped(&post.title)) } }
                        div {
                            small {
                                strong { "Date&Time: " } (PreEscaped(&post.dateandtime))
                                ", "
                                strong { "Category: " } (PreEscaped(&post.category))
                            }
                        }
                    }
                }
            }
        }
    }
}
