use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::open_site;
use crate::commands::Command;

#[derive(Debug, Parser)]
pub struct List {
    /// Include drafts.
    #[arg(long)]
    drafts: bool,

    /// Number of posts to skip.
    #[arg(long, default_value_t = 0)]
    start: usize,
}

impl Command for List {
    fn execute(&self, args: &Args) -> Result<ExitCode> {
        let site = open_site(args)?;
        let html = site
            .blog(self.drafts, self.start)
            .context("Failed to list posts")?;
        print!("{html}");

        Ok(ExitCode::SUCCESS)
    }
}
