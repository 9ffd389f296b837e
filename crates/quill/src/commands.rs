mod list;
mod render;
mod serve;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use clap::Subcommand;
use quill_blog::fs::OsFileSystem;
use quill_conf::Settings;
use quill_server::Site;
use tracing_subscriber::filter::LevelFilter;

use crate::args::Args;

pub trait Command {
    fn execute(&self, args: &Args) -> Result<ExitCode>;
}

#[derive(Debug, Subcommand)]
pub enum QuillCommand {
    /// Serve the site over HTTP
    Serve(self::serve::Serve),
    /// Render one page template to stdout
    Render(self::render::Render),
    /// Print a page of the post listing to stdout
    List(self::list::List),
}

impl QuillCommand {
    /// Log level before `-v`/`-q` are applied.
    pub fn default_level(&self) -> LevelFilter {
        match self {
            Self::Serve(_) => LevelFilter::INFO,
            Self::Render(_) | Self::List(_) => LevelFilter::WARN,
        }
    }
}

impl Command for QuillCommand {
    fn execute(&self, args: &Args) -> Result<ExitCode> {
        match self {
            Self::Serve(command) => command.execute(args),
            Self::Render(command) => command.execute(args),
            Self::List(command) => command.execute(args),
        }
    }
}

/// Load the site at `--root` from disk.
fn open_site(args: &Args) -> Result<Site> {
    let root = &args.global.root;
    if !root.is_dir() {
        anyhow::bail!("site root {root} is not a directory");
    }
    let settings = Settings::new(root).context("Failed to load settings")?;
    tracing::debug!(%root, name = %settings.name, "opened site");
    Ok(Site::new(root.clone(), settings, Arc::new(OsFileSystem)))
}
