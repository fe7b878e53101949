//! Whole-site builds.
//!
//! A build always starts from scratch and runs these steps in order,
//! stopping at the first failure:
//!
//! 1. Empty the output root (a missing root is fine).
//! 2. Create the output root and `posts/`.
//! 3. Load `config.json` and the theme. A failure here leaves only the empty
//!    scaffolding from step 2 behind.
//! 4. Copy static assets to `static/`, copy `robots.txt` when present, and
//!    touch `.nojekyll`.
//! 5. Generate every page.
//! 6. Generate every post, one directory each.
//!
//! There is no incremental mode: every build regenerates everything.

use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use walkdir::WalkDir;

use crate::content::{self, ContentError};
use crate::context::{BuildContext, SitePaths};
use crate::page::{self, Rendered};
use crate::post::{self, PostError};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error("Cannot clear output {}: {source}", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot copy {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot walk static assets: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(
        "{} and {} both generate {}",
        first.display(),
        second.display(),
        output.display()
    )]
    DuplicateOutput {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}

/// One generated page or post.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub title: String,
    pub source: PathBuf,
    pub output: PathBuf,
}

impl From<&Rendered> for GeneratedFile {
    fn from(rendered: &Rendered) -> Self {
        Self {
            title: rendered.title.clone(),
            source: rendered.source.clone(),
            output: rendered.output.clone(),
        }
    }
}

/// What a build (or check) produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub pages: Vec<GeneratedFile>,
    pub posts: Vec<GeneratedFile>,
    /// Content files skipped because they had no content.
    pub skipped: Vec<PathBuf>,
    pub static_files: usize,
    /// Wall-clock time the build or check took.
    pub elapsed: Duration,
}

/// Whether generated documents are written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Write,
    DryRun,
}

/// Run a full build.
pub fn build(paths: &SitePaths, started_at: DateTime<Local>) -> Result<BuildReport, BuildError> {
    let timer = Instant::now();
    clear_output_directory(&paths.output)?;
    create_directories(paths)?;

    let ctx = BuildContext::load(paths.clone(), started_at)?;

    let mut report = BuildReport {
        static_files: copy_static(paths)?,
        ..BuildReport::default()
    };
    generate_all_pages(&ctx, Mode::Write, &mut report)?;
    generate_all_posts(&ctx, Mode::Write, &mut report)?;
    report.elapsed = timer.elapsed();
    Ok(report)
}

/// Render every page and post without touching the output directory.
pub fn check(paths: &SitePaths, started_at: DateTime<Local>) -> Result<BuildReport, BuildError> {
    let timer = Instant::now();
    let ctx = BuildContext::load(paths.clone(), started_at)?;
    let mut report = BuildReport::default();
    generate_all_pages(&ctx, Mode::DryRun, &mut report)?;
    generate_all_posts(&ctx, Mode::DryRun, &mut report)?;
    report.elapsed = timer.elapsed();
    Ok(report)
}

/// Remove everything under `root`, keeping `root` itself.
///
/// Files and symlinks are unlinked, directories removed recursively. A
/// missing root is not an error.
pub fn clear_output_directory(root: &Path) -> Result<(), BuildError> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => return Err(clean_error(root, source)),
    };

    for entry in entries {
        let entry = entry.map_err(|e| clean_error(root, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| clean_error(&path, e))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| clean_error(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| clean_error(&path, e))?;
        }
    }
    Ok(())
}

fn clean_error(path: &Path, source: io::Error) -> BuildError {
    BuildError::Clean {
        path: path.to_path_buf(),
        source,
    }
}

/// Create the output root and its `posts/` directory.
pub fn create_directories(paths: &SitePaths) -> Result<(), BuildError> {
    for dir in [paths.output.clone(), paths.output_posts_dir()] {
        fs::create_dir_all(&dir).map_err(|source| BuildError::Write { path: dir, source })?;
    }
    Ok(())
}

/// Copy static assets, `robots.txt` and the `.nojekyll` marker. Returns the
/// number of static asset files copied.
pub fn copy_static(paths: &SitePaths) -> Result<usize, BuildError> {
    let src = paths.static_dir();
    let dst = paths.output_static_dir();
    let mut copied = 0;

    if src.is_dir() {
        for entry in WalkDir::new(&src).min_depth(1) {
            let entry = entry?;
            let Ok(rel) = entry.path().strip_prefix(&src) else {
                continue;
            };
            let target = dst.join(rel);
            let copy_err = |source| BuildError::Copy {
                path: entry.path().to_path_buf(),
                source,
            };
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(copy_err)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(copy_err)?;
                }
                fs::copy(entry.path(), &target).map_err(copy_err)?;
                copied += 1;
            }
        }
    }

    let robots = paths.robots_file();
    if robots.is_file() {
        fs::copy(&robots, paths.output.join("robots.txt")).map_err(|source| BuildError::Copy {
            path: robots.clone(),
            source,
        })?;
    }

    write_output(&paths.output.join(".nojekyll"), "")?;
    Ok(copied)
}

fn write_output(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Fail when an earlier page or post of this build already produced
/// `rendered.output`, such as two pages that both carry `{{ list }}`.
fn claim_output(report: &BuildReport, rendered: &Rendered) -> Result<(), BuildError> {
    match report
        .pages
        .iter()
        .chain(&report.posts)
        .find(|file| file.output == rendered.output)
    {
        Some(earlier) => Err(BuildError::DuplicateOutput {
            output: rendered.output.clone(),
            first: earlier.source.clone(),
            second: rendered.source.clone(),
        }),
        None => Ok(()),
    }
}

fn emit(rendered: Rendered, mode: Mode, into: &mut Vec<GeneratedFile>) -> Result<(), BuildError> {
    if mode == Mode::Write {
        write_output(&rendered.output, &rendered.html)?;
    }
    into.push(GeneratedFile::from(&rendered));
    Ok(())
}

fn generate_all_pages(
    ctx: &BuildContext,
    mode: Mode,
    report: &mut BuildReport,
) -> Result<(), BuildError> {
    for path in content::list_content_files(&ctx.paths.pages_dir())? {
        match page::generate_page(ctx, &path)? {
            Some(rendered) => {
                claim_output(report, &rendered)?;
                emit(rendered, mode, &mut report.pages)?
            }
            None => report.skipped.push(path),
        }
    }
    Ok(())
}

fn generate_all_posts(
    ctx: &BuildContext,
    mode: Mode,
    report: &mut BuildReport,
) -> Result<(), BuildError> {
    for path in content::list_content_files(&ctx.paths.posts_dir())? {
        match post::generate_post(ctx, &path)? {
            Some(rendered) => {
                claim_output(report, &rendered)?;
                emit(rendered, mode, &mut report.posts)?
            }
            None => report.skipped.push(path),
        }
    }
    Ok(())
}
