//! Directory layout and the per-build context.
//!
//! ## Input Layout
//!
//! ```text
//! _Input/
//! ├── config.json
//! ├── _Contents/
//! │   ├── _pages/ (or pages/)     # Page sources
//! │   ├── _posts/ (or posts/)     # Post sources
//! │   ├── static/ (or _static/)   # Copied verbatim to _Output/static/
//! │   └── robots.txt              # Optional, copied to _Output/robots.txt
//! └── _Theme/
//!     ├── head.html
//!     ├── menu.html
//!     ├── body.html
//!     ├── post_body.html
//!     └── foot.html
//! ```
//!
//! ## Output Layout
//!
//! ```text
//! _Output/
//! ├── .nojekyll
//! ├── robots.txt
//! ├── static/...
//! ├── <slug>.html                 # One per regular page
//! └── posts/
//!     ├── index.html              # The listing page
//!     └── <slug>/index.html       # One per post
//! ```

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use crate::config::{self, SiteConfig};
use crate::content::ContentError;
use crate::fragment::Theme;

/// Input and output roots, and every path derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for SitePaths {
    fn default() -> Self {
        Self::new("_Input", "_Output")
    }
}

/// First existing directory among the candidates, or the first candidate.
fn first_existing(base: &Path, candidates: &[&str]) -> PathBuf {
    candidates
        .iter()
        .map(|c| base.join(c))
        .find(|p| p.is_dir())
        .unwrap_or_else(|| base.join(candidates[0]))
}

impl SitePaths {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.input.join("config.json")
    }

    pub fn contents_dir(&self) -> PathBuf {
        self.input.join("_Contents")
    }

    pub fn theme_dir(&self) -> PathBuf {
        self.input.join("_Theme")
    }

    pub fn pages_dir(&self) -> PathBuf {
        first_existing(&self.contents_dir(), &["_pages", "pages"])
    }

    pub fn posts_dir(&self) -> PathBuf {
        first_existing(&self.contents_dir(), &["_posts", "posts"])
    }

    pub fn static_dir(&self) -> PathBuf {
        first_existing(&self.contents_dir(), &["static", "_static"])
    }

    pub fn robots_file(&self) -> PathBuf {
        self.contents_dir().join("robots.txt")
    }

    pub fn output_static_dir(&self) -> PathBuf {
        self.output.join("static")
    }

    pub fn output_posts_dir(&self) -> PathBuf {
        self.output.join("posts")
    }

    /// Where a regular page lands: `<out>/<slug>.html`.
    pub fn page_output(&self, slug: &str) -> PathBuf {
        self.output.join(format!("{slug}.html"))
    }

    /// Where the listing page lands: `<out>/posts/index.html`.
    pub fn listing_output(&self) -> PathBuf {
        self.output_posts_dir().join("index.html")
    }

    /// Where a post lands: `<out>/posts/<slug>/index.html`.
    pub fn post_output(&self, slug: &str) -> PathBuf {
        self.output_posts_dir().join(slug).join("index.html")
    }
}

/// Everything shared, read-only, by all steps of one build.
///
/// The build-start timestamp lives here rather than in a global so that
/// every footer of a build shows the same instant, and tests can pin it.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub paths: SitePaths,
    pub config: SiteConfig,
    pub theme: Theme,
    pub started_at: DateTime<Local>,
}

impl BuildContext {
    /// Load configuration and theme fragments. Either failing aborts the build.
    pub fn load(paths: SitePaths, started_at: DateTime<Local>) -> Result<Self, ContentError> {
        let config = config::load_config(&paths.config_file())?;
        let theme = Theme::load(&paths.theme_dir())?;
        Ok(Self {
            paths,
            config,
            theme,
            started_at,
        })
    }
}
