//! Options record read from dtscompat.toml.

use std::path::{Path, PathBuf};

use dtscompat_core::{DEFAULT_ENTRY_FILE_PATH, DEFAULT_OUT_DIR, DEPENDENCY_CACHE_DIR};
use globset::Glob;
use serde::Deserialize;
use toml::Spanned;

use crate::{Result, SourceContext};

/// Raw file layout, kept separate so spans survive until validation.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptions {
    out_dir: Option<PathBuf>,
    entry_file_path: Option<Spanned<String>>,
    ignore: Option<Vec<Spanned<String>>>,
}

/// Options controlling the declaration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Output directory of the bundle, relative to the project root.
    pub out_dir: Option<PathBuf>,
    /// Reference written into the entry pragma.
    pub entry_file_path: Option<String>,
    /// Globs (relative to the output directory) excluded from discovery.
    pub ignore: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            out_dir: None,
            entry_file_path: None,
            ignore: default_ignore(),
        }
    }
}

fn default_ignore() -> Vec<String> {
    vec![format!("**/{}/**", DEPENDENCY_CACHE_DIR)]
}

impl Options {
    /// Parse options from a string (uses "dtscompat.toml" as filename)
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let raw: RawOptions = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

        if let Some(entry) = &raw.entry_file_path {
            validate_entry_file_path(&ctx, entry)?;
        }
        if let Some(patterns) = &raw.ignore {
            for pattern in patterns {
                validate_glob(&ctx, pattern)?;
            }
        }

        Ok(Self {
            out_dir: raw.out_dir,
            entry_file_path: raw.entry_file_path.map(Spanned::into_inner),
            ignore: raw
                .ignore
                .map(|patterns| patterns.into_iter().map(Spanned::into_inner).collect())
                .unwrap_or_else(default_ignore),
        })
    }

    /// The pragma reference, falling back to `./lib.d.ts`.
    pub fn entry_file_path(&self) -> &str {
        self.entry_file_path
            .as_deref()
            .unwrap_or(DEFAULT_ENTRY_FILE_PATH)
    }

    /// The output directory, falling back to `dist`.
    pub fn out_dir(&self) -> &Path {
        self.out_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUT_DIR))
    }
}

impl std::str::FromStr for Options {
    type Err = Box<crate::Error>;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_str_with_filename(s, "dtscompat.toml")
    }
}

/// Reason an entry reference cannot be embedded in the pragma, if any.
pub fn entry_file_path_problem(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some("the reference is empty")
    } else if value.contains('"') {
        Some("the reference contains a double quote")
    } else if value.contains(['\n', '\r']) {
        Some("the reference contains a line break")
    } else {
        None
    }
}

fn validate_entry_file_path(ctx: &SourceContext, entry: &Spanned<String>) -> Result<()> {
    match entry_file_path_problem(entry.get_ref()) {
        Some(reason) => Err(ctx.entry_file_path_error(entry.get_ref(), reason, entry.span())),
        None => Ok(()),
    }
}

fn validate_glob(ctx: &SourceContext, pattern: &Spanned<String>) -> Result<()> {
    Glob::new(pattern.get_ref())
        .map(|_| ())
        .map_err(|e| ctx.glob_error(pattern.get_ref(), e.kind().to_string(), pattern.span()))
}
