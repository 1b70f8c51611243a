//! Per-file outcomes of a declaration pass.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// What happened to one declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeclarationOutcome {
    /// Specifiers were rewritten (or would be, in a dry run).
    Rewritten { path: PathBuf, specifiers: usize },
    /// Nothing to rewrite.
    Unchanged { path: PathBuf },
    /// Reading or writing failed.
    Failed { path: PathBuf, error: String },
}

/// What happened to one entry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// The pragma was prepended (or would be, in a dry run).
    Annotated { path: PathBuf },
    /// The file already carried the same pragma.
    AlreadyAnnotated { path: PathBuf },
    /// The entry does not exist on disk.
    Missing { path: PathBuf },
    /// The entry name points outside the output directory.
    Refused { entry: String },
    /// Reading or writing failed.
    Failed { path: PathBuf, error: String },
}

/// Report of a declaration pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PassReport {
    /// Whether files were left untouched on disk.
    pub dry_run: bool,
    /// One outcome per discovered declaration file.
    pub declarations: Vec<DeclarationOutcome>,
    /// One outcome per recorded entry file.
    pub entries: Vec<EntryOutcome>,
}

impl PassReport {
    /// Declaration files whose specifiers changed.
    pub fn rewritten(&self) -> impl Iterator<Item = (&Path, usize)> {
        self.declarations.iter().filter_map(|o| match o {
            DeclarationOutcome::Rewritten { path, specifiers } => Some((path.as_path(), *specifiers)),
            _ => None,
        })
    }

    /// Entry files that received the pragma.
    pub fn annotated(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().filter_map(|o| match o {
            EntryOutcome::Annotated { path } => Some(path.as_path()),
            _ => None,
        })
    }

    /// Every per-file failure, with its cause.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        let declarations = self.declarations.iter().filter_map(|o| match o {
            DeclarationOutcome::Failed { path, error } => Some((path.as_path(), error.as_str())),
            _ => None,
        });
        let entries = self.entries.iter().filter_map(|o| match o {
            EntryOutcome::Failed { path, error } => Some((path.as_path(), error.as_str())),
            _ => None,
        });
        declarations.chain(entries)
    }

    /// Whether any file failed.
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Total number of specifiers rewritten across all files.
    pub fn specifier_count(&self) -> usize {
        self.rewritten().map(|(_, n)| n).sum()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: PassReport) {
        self.dry_run |= other.dry_run;
        self.declarations.extend(other.declarations);
        self.entries.extend(other.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PassReport {
        PassReport {
            dry_run: false,
            declarations: vec![
                DeclarationOutcome::Rewritten {
                    path: "a.d.ts".into(),
                    specifiers: 2,
                },
                DeclarationOutcome::Unchanged {
                    path: "b.d.ts".into(),
                },
                DeclarationOutcome::Rewritten {
                    path: "c.d.ts".into(),
                    specifiers: 1,
                },
            ],
            entries: vec![
                EntryOutcome::Annotated {
                    path: "index.js".into(),
                },
                EntryOutcome::Missing {
                    path: "gone.js".into(),
                },
            ],
        }
    }

    #[test]
    fn test_counts() {
        let report = sample();

        assert_eq!(report.rewritten().count(), 2);
        assert_eq!(report.specifier_count(), 3);
        assert_eq!(report.annotated().count(), 1);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_failures_from_both_batches() {
        let mut report = sample();
        report.declarations.push(DeclarationOutcome::Failed {
            path: "bad.d.ts".into(),
            error: "invalid UTF-8".into(),
        });
        report.entries.push(EntryOutcome::Failed {
            path: "locked.js".into(),
            error: "permission denied".into(),
        });

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].0, Path::new("bad.d.ts"));
        assert!(report.has_failures());
    }

    #[test]
    fn test_merge() {
        let mut report = PassReport::default();
        report.merge(sample());

        assert_eq!(report.declarations.len(), 3);
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn test_serializes_status_tag() {
        let json = serde_json::to_value(EntryOutcome::Refused {
            entry: "../x.js".into(),
        })
        .unwrap();

        assert_eq!(json["status"], "refused");
        assert_eq!(json["entry"], "../x.js");
    }
}
