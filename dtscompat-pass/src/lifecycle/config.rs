//! Host configuration delivered by the `config_resolved` hook.

use std::path::{Path, PathBuf};

use dtscompat_core::DEFAULT_OUT_DIR;

/// The subset of the bundler's resolved configuration plugins see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Project root; relative output directories resolve against it.
    pub root: PathBuf,
    /// Configured output directory, if any.
    pub out_dir: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            out_dir: None,
        }
    }

    /// Set the output directory.
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    /// The output directory joined onto the root, falling back to `dist`.
    pub fn resolved_out_dir(&self) -> PathBuf {
        let out_dir = self
            .out_dir
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(DEFAULT_OUT_DIR));
        self.root.join(out_dir)
    }
}
