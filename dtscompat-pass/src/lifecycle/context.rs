//! Build context passed through lifecycle hooks.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use super::diagnostic::Diagnostic;
use crate::PassReport;

/// State owned by a single build.
///
/// A fresh context is created for every build, so entry files recorded by
/// one build can never be observed by the next one, even when the same
/// plugin instance serves many builds (watch mode).
#[derive(Debug)]
pub struct BuildContext {
    /// Absolute output directory.
    out_dir: PathBuf,
    /// Entry chunk file names, relative to `out_dir`.
    entries: IndexSet<String>,
    /// Report of the declaration pass (populated by `write_bundle`).
    pub report: PassReport,
    /// Diagnostics collected during the build.
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildContext {
    /// Create a new build context rooted at an output directory.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            entries: IndexSet::new(),
            report: PassReport::default(),
            diagnostics: Vec::new(),
        }
    }

    /// The output directory every file operation stays within.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Recorded entry file names, in bundle order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of recorded entry files.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Replace the recorded entry files.
    pub fn set_entries<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.clear();
        self.entries.extend(entries.into_iter().map(Into::into));
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// Record a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
