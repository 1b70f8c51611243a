use clap::Args;
use dtscompat_pass::WriteMode;
use eyre::Result;

use super::args::PassArgs;
use crate::{
    ops,
    reports::{FixReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct FixCommand {
    #[command(flatten)]
    pub pass: PassArgs,

    /// Preview changes without writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl FixCommand {
    pub async fn run(&self) -> Result<()> {
        let mode = if self.dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Write
        };
        let report = ops::fix(self.pass.request(mode)).await?;
        emit(&report, self.pass.json)
    }
}

/// Print the report and exit non-zero if any file failed.
pub(super) fn emit(report: &FixReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        report.render(&mut TerminalOutput::new());
    }

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
