use camino::Utf8PathBuf;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct GlobalArgs {
    /// Site root directory.
    #[arg(global = true, long, default_value = ".")]
    pub root: Utf8PathBuf,

    /// Only log errors.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use verbose output. Repeat for more.
    #[arg(global = true, action = clap::ArgAction::Count, long, short, conflicts_with = "quiet")]
    pub verbose: u8,
}

impl GlobalArgs {
    /// The log level asked for on the command line, starting from `default`.
    #[must_use]
    pub fn level(&self, default: LevelFilter) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        let levels = [
            LevelFilter::ERROR,
            LevelFilter::WARN,
            LevelFilter::INFO,
            LevelFilter::DEBUG,
            LevelFilter::TRACE,
        ];
        let start = levels
            .iter()
            .position(|level| *level == default)
            .unwrap_or(1);
        levels[(start + usize::from(self.verbose)).min(levels.len() - 1)]
    }
}
