use std::path::{Path, PathBuf};

use clap::Args;
use dtscompat_config::DtsCompatToml;
use eyre::Result;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct InitCommand {
    /// Directory to create dtscompat.toml in
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing dtscompat.toml
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let path = write_template(&self.dir, self.force)?;
        println!("Created {}", path.display());
        Ok(())
    }
}

fn write_template(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(DtsCompatToml::FILE_NAME);
    if path.exists() && !force {
        eyre::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    DtsCompatToml::template(&path).save().unwrap_or_exit();
    Ok(path)
}
