//! # Paker
//!
//! A small static site generator. Pages and posts are plain text files, the
//! theme is five HTML fragments, and the only templating primitive is literal
//! placeholder replacement: `{{ title }}` in a fragment becomes the page's
//! title, `{{ body }}` its body, and so on.
//!
//! # Pipeline
//!
//! ```text
//! _Input/config.json ─┐
//! _Input/_Theme/*     ├─→ BuildContext ─→ pages ─→ _Output/<slug>.html
//! _Input/_Contents/*  ┘                  posts ─→ _Output/posts/<slug>/index.html
//! ```
//!
//! Every output page is the concatenation of four fragments, in order:
//! head → menu → body (or post body) → foot. Each fragment substitutes its
//! own fixed set of placeholders; see [`fragment`] for the table.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Full build: clear output, copy static assets, generate pages and posts |
//! | [`page`] | Page parsing, listing-page detection, page assembly |
//! | [`post`] | Positional post metadata, post assembly, the post list |
//! | [`fragment`] | Theme fragments, placeholders, substitution, header/menu/body/footer |
//! | [`context`] | Input/output directory layout and the per-build context |
//! | [`config`] | `config.json` loading |
//! | [`content`] | File reading (two line modes, JSON), content listing, Markdown |
//! | [`naming`] | Slugs, excluded files, display labels |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Build Context
//!
//! Configuration, theme fragments and the build-start timestamp are loaded
//! once into a [`context::BuildContext`] and passed to every constructor.
//! Every footer of a build carries the same timestamp.
//!
//! ## Closed Placeholder Set
//!
//! Placeholders are an enum, not free-form strings, and each fragment type
//! declares which ones it substitutes. An unresolved placeholder (say, a
//! config without `author`) stays in the output verbatim.
//!
//! ## Full Rebuilds Only
//!
//! There is no dependency tracking. Each build empties the output directory
//! and regenerates everything.
//!
//! ## Deterministic Ordering
//!
//! Pages and the menu follow file-name order. The post list is sorted by
//! parsed post date, newest first. Directory listing order is never used.

pub mod config;
pub mod content;
pub mod context;
pub mod fragment;
pub mod naming;
pub mod output;
pub mod page;
pub mod post;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;
