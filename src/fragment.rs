//! Theme fragments and placeholder substitution.
//!
//! A theme is five HTML fragments, each contributing one region of a page:
//!
//! | Fragment | File | Placeholders |
//! |----------|------|--------------|
//! | [`Fragment::Head`] | `head.html` | `{{ title }}`, `{{ logo-title }}`, `{{ description }}`, `{{ keywords }}`, `{{ author }}` |
//! | [`Fragment::Menu`] | `menu.html` | `{{ menu }}`, `{{ networks }}` |
//! | [`Fragment::Body`] | `body.html` | `{{ body }}` |
//! | [`Fragment::PostBody`] | `post_body.html` | `{{ post_body }}` |
//! | [`Fragment::Foot`] | `foot.html` | `{{ version_info }}` |
//!
//! There is no template language. Each fragment type has a closed set of
//! [`Placeholder`]s; a placeholder token is replaced literally, on every line
//! and at every occurrence, with the value its resolver computes. A resolver
//! that has no value (for example a config key that was never set) leaves the
//! token in place, so the gap shows up in the output instead of vanishing.
//!
//! A page is assembled as header → menu → body → footer ([`AssembledPage`]).

use chrono::{DateTime, Local};
use maud::{Markup, PreEscaped, html};
use std::path::Path;

use crate::config::{Network, SiteConfig};
use crate::content::{self, ContentError};
use crate::context::BuildContext;
use crate::naming;
use crate::page::{self, Page};

/// Product name shown in the footer's version line.
pub const PRODUCT_NAME: &str = env!("CARGO_PKG_NAME");
/// Product version shown in the footer's version line.
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Where the footer's product name links to.
pub const PRODUCT_URL: &str = "https://github.com/fahadahammed/Paker";

/// Format of the build-start timestamp in the footer.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A recognised placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Title,
    LogoTitle,
    Description,
    Keywords,
    Author,
    Menu,
    Networks,
    Body,
    PostBody,
    List,
    VersionInfo,
}

impl Placeholder {
    /// The literal token as it appears in templates and content.
    pub const fn token(self) -> &'static str {
        match self {
            Placeholder::Title => "{{ title }}",
            Placeholder::LogoTitle => "{{ logo-title }}",
            Placeholder::Description => "{{ description }}",
            Placeholder::Keywords => "{{ keywords }}",
            Placeholder::Author => "{{ author }}",
            Placeholder::Menu => "{{ menu }}",
            Placeholder::Networks => "{{ networks }}",
            Placeholder::Body => "{{ body }}",
            Placeholder::PostBody => "{{ post_body }}",
            Placeholder::List => "{{ list }}",
            Placeholder::VersionInfo => "{{ version_info }}",
        }
    }
}

/// One structural region of a page, backed by a theme file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Head,
    Menu,
    Body,
    PostBody,
    Foot,
}

impl Fragment {
    pub const ALL: [Fragment; 5] = [
        Fragment::Head,
        Fragment::Menu,
        Fragment::Body,
        Fragment::PostBody,
        Fragment::Foot,
    ];

    pub const fn file_name(self) -> &'static str {
        match self {
            Fragment::Head => "head.html",
            Fragment::Menu => "menu.html",
            Fragment::Body => "body.html",
            Fragment::PostBody => "post_body.html",
            Fragment::Foot => "foot.html",
        }
    }

    /// The placeholders this fragment type substitutes. Any other token in
    /// the fragment is left alone.
    pub const fn placeholders(self) -> &'static [Placeholder] {
        match self {
            Fragment::Head => &[
                Placeholder::Title,
                Placeholder::LogoTitle,
                Placeholder::Description,
                Placeholder::Keywords,
                Placeholder::Author,
            ],
            Fragment::Menu => &[Placeholder::Menu, Placeholder::Networks],
            Fragment::Body => &[Placeholder::Body],
            Fragment::PostBody => &[Placeholder::PostBody],
            Fragment::Foot => &[Placeholder::VersionInfo],
        }
    }
}

/// The five theme fragments, as lines without terminators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    pub head: Vec<String>,
    pub menu: Vec<String>,
    pub body: Vec<String>,
    pub post_body: Vec<String>,
    pub foot: Vec<String>,
}

impl Theme {
    /// Read every fragment from a theme directory. A missing fragment is fatal.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let mut theme = Theme::default();
        for fragment in Fragment::ALL {
            let path = dir.join(fragment.file_name());
            *theme.lines_mut(fragment) = content::read_lines_trimmed(&path)?;
        }
        Ok(theme)
    }

    pub fn lines(&self, fragment: Fragment) -> &[String] {
        match fragment {
            Fragment::Head => &self.head,
            Fragment::Menu => &self.menu,
            Fragment::Body => &self.body,
            Fragment::PostBody => &self.post_body,
            Fragment::Foot => &self.foot,
        }
    }

    fn lines_mut(&mut self, fragment: Fragment) -> &mut Vec<String> {
        match fragment {
            Fragment::Head => &mut self.head,
            Fragment::Menu => &mut self.menu,
            Fragment::Body => &mut self.body,
            Fragment::PostBody => &mut self.post_body,
            Fragment::Foot => &mut self.foot,
        }
    }
}

/// Replace placeholder tokens in `lines`.
///
/// Only placeholders that actually occur somewhere in `lines` are resolved,
/// so expensive values (the menu, the post list) are computed on demand.
/// Resolution happens once per placeholder, then every occurrence on every
/// line is replaced. A resolver returning `None` leaves its token untouched.
pub fn substitute<F, E>(
    lines: &[String],
    placeholders: &[Placeholder],
    mut resolve: F,
) -> Result<Vec<String>, E>
where
    F: FnMut(Placeholder) -> Result<Option<String>, E>,
{
    let mut values: Vec<(&'static str, String)> = Vec::new();
    for &placeholder in placeholders {
        let token = placeholder.token();
        if !lines.iter().any(|line| line.contains(token)) {
            continue;
        }
        if let Some(value) = resolve(placeholder)? {
            values.push((token, value));
        }
    }

    Ok(lines
        .iter()
        .map(|line| {
            values.iter().fold(line.clone(), |acc, (token, value)| {
                if acc.contains(token) {
                    acc.replace(token, value)
                } else {
                    acc
                }
            })
        })
        .collect())
}

/// Substitute with a resolver that cannot fail.
fn substitute_infallible<F>(lines: &[String], placeholders: &[Placeholder], resolve: F) -> Vec<String>
where
    F: Fn(Placeholder) -> Option<String>,
{
    match substitute::<_, std::convert::Infallible>(lines, placeholders, |p| Ok(resolve(p))) {
        Ok(lines) => lines,
        Err(never) => match never {},
    }
}

/// The `<title>` text: `"<title> | <site_name>"`, or the bare site name when
/// there is no page title.
pub fn resolve_title(config: &SiteConfig, title: Option<&str>) -> Option<String> {
    match (title, config.site_name.as_deref()) {
        (Some(title), Some(site)) => Some(format!("{title} | {site}")),
        (Some(title), None) => Some(title.to_string()),
        (None, Some(site)) => Some(site.to_string()),
        (None, None) => None,
    }
}

/// Build the head fragment for a page.
pub fn build_header(ctx: &BuildContext, title: Option<&str>) -> Vec<String> {
    let config = &ctx.config;
    substitute_infallible(
        ctx.theme.lines(Fragment::Head),
        Fragment::Head.placeholders(),
        |placeholder| match placeholder {
            Placeholder::Title => resolve_title(config, title),
            Placeholder::LogoTitle => config.site_name.clone(),
            Placeholder::Description => config.description.clone(),
            Placeholder::Keywords => config.keywords.clone(),
            Placeholder::Author => config.author.clone(),
            _ => None,
        },
    )
}

/// The footer's version line, stamped with the build start time.
pub fn version_info(started_at: &DateTime<Local>) -> String {
    format!(
        "<small>Site is generated by <a href=\"{PRODUCT_URL}\">{PRODUCT_NAME}-{PRODUCT_VERSION}</a> at {}.</small>",
        started_at.format(TIMESTAMP_FORMAT)
    )
}

/// Build the foot fragment.
pub fn build_footer(ctx: &BuildContext) -> Vec<String> {
    let info = version_info(&ctx.started_at);
    substitute_infallible(
        ctx.theme.lines(Fragment::Foot),
        Fragment::Foot.placeholders(),
        |placeholder| match placeholder {
            Placeholder::VersionInfo => Some(info.clone()),
            _ => None,
        },
    )
}

/// Where a page's menu entry points: the post index for the listing page,
/// `/<slug>.html` for everything else.
pub fn menu_href(page: &Page) -> String {
    if page.is_listing() {
        "/posts/".to_string()
    } else {
        format!("/{}.html", page.slug)
    }
}

/// Render one menu item per page.
pub fn render_menu_items(pages: &[Page]) -> Markup {
    html! {
        @for page in pages {
            li { a href=(menu_href(page)) { (PreEscaped(&page.title)) } }
        }
    }
}

/// Render one link per configured social network, labelled by its key.
pub fn render_networks<'a>(networks: impl IntoIterator<Item = (&'a String, &'a Network)>) -> Markup {
    html! {
        @for (key, network) in networks {
            li {
                a href=(network.url) title=(network.name) target="_blank" rel="noopener" {
                    (naming::capitalize(key))
                }
            }
        }
    }
}

/// Build the menu fragment. Pages are read fresh so the menu always reflects
/// the current page set.
pub fn build_menu(ctx: &BuildContext) -> Result<Vec<String>, ContentError> {
    substitute(
        ctx.theme.lines(Fragment::Menu),
        Fragment::Menu.placeholders(),
        |placeholder| -> Result<Option<String>, ContentError> {
            match placeholder {
                Placeholder::Menu => {
                    let pages = page::load_pages(&ctx.paths)?;
                    Ok(Some(render_menu_items(&pages).into_string()))
                }
                Placeholder::Networks => {
                    Ok(Some(render_networks(&ctx.config.networks).into_string()))
                }
                _ => Ok(None),
            }
        },
    )
}

/// Build the body fragment: `post_body.html` for posts, `body.html` otherwise.
pub fn build_body(ctx: &BuildContext, content: &str, is_post: bool) -> Vec<String> {
    let (fragment, wanted) = if is_post {
        (Fragment::PostBody, Placeholder::PostBody)
    } else {
        (Fragment::Body, Placeholder::Body)
    };
    substitute_infallible(
        ctx.theme.lines(fragment),
        fragment.placeholders(),
        |placeholder| (placeholder == wanted).then(|| content.to_string()),
    )
}

/// A fully composed page: header, menu, body and footer lines in order.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPage {
    lines: Vec<String>,
}

impl AssembledPage {
    pub fn new(
        header: Vec<String>,
        menu: Vec<String>,
        body: Vec<String>,
        footer: Vec<String>,
    ) -> Self {
        let mut lines = header;
        lines.extend(menu);
        lines.extend(body);
        lines.extend(footer);
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Flatten to the output document, every line newline-terminated.
    pub fn into_html(self) -> String {
        let mut html = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in self.lines {
            html.push_str(&line);
            html.push('\n');
        }
        html
    }
}

/// Assemble a page from its resolved header title and body content.
pub fn assemble(
    ctx: &BuildContext,
    title: Option<&str>,
    content: &str,
    is_post: bool,
) -> Result<AssembledPage, ContentError> {
    Ok(AssembledPage::new(
        build_header(ctx, title),
        build_menu(ctx)?,
        build_body(ctx, content, is_post),
        build_footer(ctx),
    ))
}
