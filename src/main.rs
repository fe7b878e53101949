use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use paker::{config, context::SitePaths, output, site};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paker")]
#[command(about = "Static site generator for pages and posts")]
#[command(long_about = "\
Static site generator for pages and posts

Pages and posts are plain text files; the theme is five HTML fragments
whose {{ placeholders }} are replaced on build.

Input structure:

  _Input/
  ├── config.json                  # site_name, description, keywords, author, networks
  ├── _Contents/
  │   ├── _pages/                  # Pages: first line `title: ...`
  │   │   ├── index.md             # Home page (title containing \"index\")
  │   │   ├── about.md             # → about.html
  │   │   └── posts.md             # Contains {{ list }} → posts/index.html
  │   ├── _posts/                  # Posts: title/dateandtime/category/tags, blank line, body
  │   │   └── first-trip.md        # → posts/first-trip/index.html
  │   ├── static/                  # Copied to _Output/static/
  │   └── robots.txt               # Optional
  └── _Theme/
      ├── head.html                # {{ title }} {{ logo-title }} {{ description }} {{ keywords }} {{ author }}
      ├── menu.html                # {{ menu }} {{ networks }}
      ├── body.html                # {{ body }}
      ├── post_body.html           # {{ post_body }}
      └── foot.html                # {{ version_info }}

Run 'paker gen-config' to print a sample config.json.")]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Input directory
    #[arg(long, default_value = "_Input", global = true)]
    source: PathBuf,

    /// Output directory (emptied on every build)
    #[arg(long, default_value = "_Output", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the whole site
    Build,
    /// Render every page and post without writing anything
    Check,
    /// Print a sample config.json
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Local::now();
    let cli = Cli::parse();
    let paths = SitePaths::new(cli.source, cli.output);

    match cli.command {
        None => {
            Cli::command().print_help()?;
            println!();
        }
        Some(Command::Build) => {
            println!("Building...");
            let report = site::build(&paths, started_at)?;
            output::print_build_output(&report, &paths.output);
            println!("Build Complete.");
        }
        Some(Command::Check) => {
            println!("==> Checking {}", paths.input.display());
            let report = site::check(&paths, started_at)?;
            output::print_build_output(&report, &paths.output);
            println!("==> Content is valid");
        }
        Some(Command::GenConfig) => {
            println!("{}", config::stock_config_json()?);
        }
    }

    Ok(())
}
