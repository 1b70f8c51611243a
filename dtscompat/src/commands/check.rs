use clap::Args;
use dtscompat_pass::WriteMode;
use eyre::Result;

use super::{args::PassArgs, fix::emit};
use crate::ops;

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub pass: PassArgs,
}

impl CheckCommand {
    pub async fn run(&self) -> Result<()> {
        let report = ops::fix(self.pass.request(WriteMode::DryRun)).await?;
        emit(&report, self.pass.json)
    }
}
