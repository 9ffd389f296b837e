use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::open_site;
use crate::commands::Command;

#[derive(Debug, Parser)]
pub struct Serve {
    /// Address to listen on [default: `bind` from the settings]
    #[arg(long)]
    bind: Option<String>,
}

impl Command for Serve {
    fn execute(&self, args: &Args) -> Result<ExitCode> {
        let site = open_site(args)?;
        let bind = self
            .bind
            .clone()
            .unwrap_or_else(|| site.settings().bind.clone());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        runtime
            .block_on(quill_server::serve(site, &bind))
            .with_context(|| format!("Failed to serve on {bind}"))?;

        Ok(ExitCode::SUCCESS)
    }
}
