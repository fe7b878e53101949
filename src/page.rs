//! Page assembly.
//!
//! A page source is a text file whose first line may carry its title:
//!
//! ```text
//! title: About
//! Everything after the first line is the body.
//! ```
//!
//! Without a `title:` line the whole file is body and the title falls back to
//! the slug's display label. `.md` bodies are rendered as Markdown; any other
//! extension is emitted as-is.
//!
//! ## Listing and Home Pages
//!
//! A page whose body contains `{{ list }}` is the *listing page*: each token
//! is replaced with the rendered post list after Markdown rendering, the
//! page is written to `posts/index.html`, and its menu entry points at
//! `/posts/`. A page whose title contains "index" (any case) is the home
//! page and shows the bare site name as its title.

use std::path::{Path, PathBuf};

use crate::content::{self, ContentError};
use crate::context::{BuildContext, SitePaths};
use crate::fragment::{self, Placeholder};
use crate::naming;
use crate::post;

/// Prefix of the title line.
const TITLE_KEY: &str = "title:";

/// A parsed page source.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Source file.
    pub source: PathBuf,
    /// URL slug (file stem).
    pub slug: String,
    /// From the `title:` line, or the slug's display label.
    pub title: String,
    /// Raw body text, line terminators preserved.
    pub body: String,
    /// Whether the body is Markdown.
    pub markdown: bool,
}

/// A page or post rendered to HTML, with the path it belongs at.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub title: String,
    pub source: PathBuf,
    pub output: PathBuf,
    pub html: String,
}

impl Page {
    /// Parse a page from its lines (terminators kept). Returns `None` for an
    /// empty file.
    pub fn parse(source: &Path, lines: &[String]) -> Option<Self> {
        let (first, rest) = lines.split_first()?;
        let slug = naming::slug(source);

        let (title, body) = match first.trim_end().strip_prefix(TITLE_KEY) {
            Some(title) => (title.trim().to_string(), rest.concat()),
            None => (naming::display_label(&slug), lines.concat()),
        };

        Some(Self {
            source: source.to_path_buf(),
            slug,
            title,
            body,
            markdown: content::is_markdown(source),
        })
    }

    /// Whether this page carries the post list.
    pub fn is_listing(&self) -> bool {
        self.body.contains(Placeholder::List.token())
    }

    /// Whether this is the home page.
    pub fn is_home(&self) -> bool {
        self.title.to_ascii_lowercase().contains("index")
    }

    /// The title passed to the header; the home page shows the bare site name.
    pub fn header_title(&self) -> Option<&str> {
        (!self.is_home()).then_some(self.title.as_str())
    }

    pub fn output_path(&self, paths: &SitePaths) -> PathBuf {
        if self.is_listing() {
            paths.listing_output()
        } else {
            paths.page_output(&self.slug)
        }
    }
}

/// Read and parse one page source. `Ok(None)` means the file is empty.
pub fn read_page(path: &Path) -> Result<Option<Page>, ContentError> {
    let lines = content::read_lines(path)?;
    Ok(Page::parse(path, &lines))
}

/// All readable, non-empty pages in file-name order.
///
/// Individual files that cannot be read are skipped; only a pages directory
/// that exists but cannot be listed is an error.
pub fn load_pages(paths: &SitePaths) -> Result<Vec<Page>, ContentError> {
    Ok(content::list_content_files(&paths.pages_dir())?
        .iter()
        .filter_map(|path| read_page(path).ok().flatten())
        .collect())
}

/// Body HTML for a page: Markdown rendered, then the post list injected.
///
/// The list goes in after rendering so the text around `{{ list }}` is still
/// Markdown. A token alone on its line renders as its own paragraph; that
/// wrapper is dropped so the list is not nested inside a `<p>`.
fn page_content(ctx: &BuildContext, page: &Page) -> Result<String, ContentError> {
    let html = content::render_body(&page.body, page.markdown);
    if !page.is_listing() {
        return Ok(html);
    }

    let token = Placeholder::List.token();
    let html = html.replace(&format!("<p>{token}</p>"), token);
    let mut lines = fragment::substitute(
        std::slice::from_ref(&html),
        &[Placeholder::List],
        |_| -> Result<Option<String>, ContentError> {
            let posts = post::curated_list_of_posts(&ctx.paths)?;
            Ok(Some(post::render_post_list(&posts).into_string()))
        },
    )?;
    Ok(lines.pop().unwrap_or_default())
}

/// Assemble a parsed page into its final HTML document.
pub fn render_page(ctx: &BuildContext, page: &Page) -> Result<Rendered, ContentError> {
    let content = page_content(ctx, page)?;
    let assembled = fragment::assemble(ctx, page.header_title(), &content, false)?;
    Ok(Rendered {
        title: page.title.clone(),
        source: page.source.clone(),
        output: page.output_path(&ctx.paths),
        html: assembled.into_html(),
    })
}

/// Read and assemble one page source. `Ok(None)` when the file is empty.
pub fn generate_page(ctx: &BuildContext, path: &Path) -> Result<Option<Rendered>, ContentError> {
    match read_page(path)? {
        Some(page) => render_page(ctx, &page).map(Some),
        None => Ok(None),
    }
}
