use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::QuillCommand;
use crate::logging;

/// The main CLI structure that defines the command-line interface
#[derive(Parser)]
#[command(name = "quill")]
#[command(version, about = "Render and serve a small flat-file site")]
pub struct Cli {
    #[command(subcommand)]
    pub command: QuillCommand,

    #[command(flatten)]
    pub args: Args,
}

/// Parse CLI arguments and execute the chosen command
pub fn run(args: Vec<String>) -> Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });

    logging::init_tracing(cli.args.global.level(cli.command.default_level()));

    cli.command.execute(&cli.args)
}
