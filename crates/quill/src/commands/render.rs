use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use quill_server::Visitor;

use crate::args::Args;
use crate::commands::open_site;
use crate::commands::Command;

#[derive(Debug, Parser)]
pub struct Render {
    /// Page template, relative to the site root (e.g. `index.html`).
    page: String,

    /// Host to render the page for. Local hosts see drafts.
    #[arg(long, default_value = "localhost")]
    host: String,
}

impl Command for Render {
    fn execute(&self, args: &Args) -> Result<ExitCode> {
        let site = open_site(args)?;
        let visitor = Visitor::new("http", self.host.as_str());

        let html = site
            .page(&self.page, &visitor)
            .with_context(|| format!("Failed to render {}", self.page))?;
        print!("{html}");

        Ok(ExitCode::SUCCESS)
    }
}
