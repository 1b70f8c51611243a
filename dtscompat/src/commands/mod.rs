mod args;
mod check;
mod completions;
mod fix;
mod init;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use fix::FixCommand;
use init::InitCommand;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for dtscompat_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "dtscompat")]
#[command(version)]
#[command(about = "Make bundled .d.ts files resolvable with explicit extensions")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Fix(cmd) => cmd.run().await,
            Commands::Check(cmd) => cmd.run().await,
            Commands::Init(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite declaration specifiers and annotate entry files
    Fix(FixCommand),

    /// Show what fix would change without writing anything
    Check(CheckCommand),

    /// Create a dtscompat.toml
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
