use std::path::PathBuf;

use clap::Args;
use dtscompat_config::{DtsCompatToml, Options};
use dtscompat_pass::WriteMode;

use super::UnwrapOrExit;
use crate::ops::FixRequest;

/// Arguments shared by `fix` and `check`.
#[derive(Args)]
pub struct PassArgs {
    /// Project root the output directory is resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Path to dtscompat.toml (defaults to <root>/dtscompat.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bundle output directory, relative to the root (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Entry file name, relative to the output directory
    #[arg(short, long = "entry", value_name = "NAME")]
    pub entries: Vec<String>,

    /// Bundler manifest listing entry chunks (e.g. dist/.vite/manifest.json)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Declaration reference written into entry pragmas (overrides config)
    #[arg(long, value_name = "REF")]
    pub entry_file_path: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl PassArgs {
    /// Load options and apply command line overrides.
    ///
    /// An explicit `--config` must exist; the implicit one is optional.
    pub fn options(&self) -> Options {
        let mut options = match &self.config {
            Some(path) => DtsCompatToml::open(path).unwrap_or_exit().options().clone(),
            None => DtsCompatToml::open_or_default(self.root.join(DtsCompatToml::FILE_NAME))
                .unwrap_or_exit(),
        };

        if let Some(out_dir) = &self.out_dir {
            options.out_dir = Some(out_dir.clone());
        }
        if let Some(reference) = &self.entry_file_path {
            options.entry_file_path = Some(reference.clone());
        }

        options
    }

    pub fn request(&self, mode: WriteMode) -> FixRequest {
        FixRequest {
            root: self.root.clone(),
            options: self.options(),
            entries: self.entries.clone(),
            manifest: self.manifest.clone(),
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        pass: PassArgs,
    }

    fn parse(args: &[&str]) -> PassArgs {
        let argv = std::iter::once("test").chain(args.iter().copied());
        Harness::try_parse_from(argv).unwrap().pass
    }

    #[test]
    fn test_defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_str().unwrap();

        let options = parse(&["--root", root]).options();

        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("dtscompat.toml"),
            "out_dir = \"build\"\nentry_file_path = \"./types.d.ts\"\n",
        )
        .unwrap();
        let root = temp.path().to_str().unwrap();

        let from_file = parse(&["--root", root]).options();
        assert_eq!(from_file.out_dir(), std::path::Path::new("build"));
        assert_eq!(from_file.entry_file_path(), "./types.d.ts");

        let overridden = parse(&[
            "--root",
            root,
            "--out-dir",
            "out",
            "--entry-file-path",
            "./index.d.ts",
        ])
        .options();
        assert_eq!(overridden.out_dir(), std::path::Path::new("out"));
        assert_eq!(overridden.entry_file_path(), "./index.d.ts");
    }

    #[test]
    fn test_request_carries_entries_and_mode() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_str().unwrap();

        let request = parse(&["--root", root, "-e", "index.js"]).request(WriteMode::DryRun);

        assert_eq!(request.entries, vec!["index.js"]);
        assert_eq!(request.mode, WriteMode::DryRun);
        assert!(request.manifest.is_none());
    }
}
