//! Fix command report data structures.

use std::path::{Path, PathBuf};

use dtscompat_pass::{BuildContext, Diagnostic, EntryOutcome, PassReport, Severity};
use serde::Serialize;

use super::output::{Output, Report};

/// Result of one declaration pass, as shown to the user.
#[derive(Debug, Serialize)]
pub struct FixReport {
    /// Resolved output directory the pass ran on.
    pub out_dir: PathBuf,
    #[serde(flatten)]
    pub pass: PassReport,
    pub diagnostics: Vec<Diagnostic>,
}

impl FixReport {
    pub fn from_context(ctx: BuildContext) -> Self {
        Self {
            out_dir: ctx.out_dir().to_path_buf(),
            pass: ctx.report,
            diagnostics: ctx.diagnostics,
        }
    }

    /// Whether any file failed to be read or written.
    pub fn has_failures(&self) -> bool {
        self.pass.has_failures()
    }

    /// Path relative to the output directory when it lies inside it.
    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.out_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn missing(&self) -> impl Iterator<Item = &Path> {
        self.pass.entries.iter().filter_map(|o| match o {
            EntryOutcome::Missing { path } => Some(path.as_path()),
            _ => None,
        })
    }
}

impl Report for FixReport {
    fn render(&self, out: &mut dyn Output) {
        let (rewrite_heading, annotate_heading) = if self.pass.dry_run {
            ("Would rewrite", "Would annotate")
        } else {
            ("Rewritten", "Annotated")
        };

        out.key_value("Output", &self.out_dir.display().to_string());

        let rewritten: Vec<_> = self.pass.rewritten().collect();
        if !rewritten.is_empty() {
            out.newline();
            out.section(rewrite_heading);
            for (path, specifiers) in rewritten {
                out.changed_item(&format!(
                    "{} ({})",
                    self.relative(path),
                    plural(specifiers, "specifier", "specifiers")
                ));
            }
        }

        let annotated: Vec<_> = self.pass.annotated().collect();
        if !annotated.is_empty() {
            out.newline();
            out.section(annotate_heading);
            for path in annotated {
                out.added_item(&self.relative(path));
            }
        }

        let missing: Vec<_> = self.missing().collect();
        if !missing.is_empty() {
            out.newline();
            out.section("Skipped (not on disk)");
            for path in missing {
                out.list_item(&self.relative(path));
            }
        }

        if !self.diagnostics.is_empty() {
            out.newline();
        }
        for diag in &self.diagnostics {
            let msg = match &diag.location {
                Some(loc) => format!("{}: {}", self.relative(Path::new(loc)), diag.message),
                None => diag.message.clone(),
            };
            match diag.severity {
                Severity::Error => out.error(&msg),
                Severity::Warning => out.warning(&msg),
            }
        }

        out.newline();
        let files = self.pass.rewritten().count();
        let entries = self.pass.annotated().count();
        if files == 0 && entries == 0 && !self.has_failures() {
            out.preformatted("✓ Nothing to change");
            return;
        }

        let summary = format!(
            "{} in {}, {}",
            plural(self.pass.specifier_count(), "specifier", "specifiers"),
            plural(files, "declaration file", "declaration files"),
            plural(entries, "entry annotated", "entries annotated"),
        );
        let failed = self.pass.failures().count();
        if failed > 0 {
            out.preformatted(&format!(
                "✗ {}; {} failed",
                summary,
                plural(failed, "file", "files")
            ));
        } else if self.pass.dry_run {
            out.preformatted(&format!("Would change {} (dry run)", summary));
        } else {
            out.preformatted(&format!("✓ Changed {}", summary));
        }
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, many)
    }
}

#[cfg(test)]
mod tests {
    use dtscompat_pass::{DeclarationOutcome, Hook};

    use super::*;
    use crate::reports::output::BufferOutput;

    fn report(dry_run: bool) -> FixReport {
        FixReport {
            out_dir: "/p/dist".into(),
            pass: PassReport {
                dry_run,
                declarations: vec![
                    DeclarationOutcome::Rewritten {
                        path: "/p/dist/lib.d.ts".into(),
                        specifiers: 2,
                    },
                    DeclarationOutcome::Unchanged {
                        path: "/p/dist/types.d.ts".into(),
                    },
                ],
                entries: vec![
                    EntryOutcome::Annotated {
                        path: "/p/dist/index.js".into(),
                    },
                    EntryOutcome::Missing {
                        path: "/p/dist/gone.js".into(),
                    },
                ],
            },
            diagnostics: Vec::new(),
        }
    }

    fn render(report: &FixReport) -> Vec<String> {
        let mut out = BufferOutput::default();
        report.render(&mut out);
        out.lines
    }

    #[test]
    fn test_render_written_pass() {
        let lines = render(&report(false));

        assert_eq!(
            lines,
            vec![
                "Output: /p/dist",
                "",
                "Rewritten:",
                "  ~ lib.d.ts (2 specifiers)",
                "",
                "Annotated:",
                "  + index.js",
                "",
                "Skipped (not on disk):",
                "  - gone.js",
                "",
                "✓ Changed 2 specifiers in 1 declaration file, 1 entry annotated",
            ]
        );
    }

    #[test]
    fn test_render_dry_run_headings() {
        let lines = render(&report(true));

        assert!(lines.contains(&"Would rewrite:".to_string()));
        assert!(lines.contains(&"Would annotate:".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Would change 2 specifiers in 1 declaration file, 1 entry annotated (dry run)"
        );
    }

    #[test]
    fn test_render_failures() {
        let mut report = report(false);
        report.pass.declarations.push(DeclarationOutcome::Failed {
            path: "/p/dist/bad.d.ts".into(),
            error: "stream did not contain valid UTF-8".into(),
        });
        report.diagnostics.push(
            Diagnostic::error(Hook::WriteBundle, "stream did not contain valid UTF-8")
                .at("/p/dist/bad.d.ts"),
        );
        report.diagnostics.push(
            Diagnostic::warning(Hook::WriteBundle, "entry is outside the output directory")
                .at("../escape.js"),
        );

        let lines = render(&report);

        assert!(report.has_failures());
        assert!(lines.contains(&"error: bad.d.ts: stream did not contain valid UTF-8".to_string()));
        assert!(
            lines.contains(
                &"warning: ../escape.js: entry is outside the output directory".to_string()
            )
        );
        assert_eq!(
            lines.last().unwrap(),
            "✗ 2 specifiers in 1 declaration file, 1 entry annotated; 1 file failed"
        );
    }

    #[test]
    fn test_render_nothing_to_change() {
        let report = FixReport {
            out_dir: "/p/dist".into(),
            pass: PassReport::default(),
            diagnostics: Vec::new(),
        };

        assert_eq!(
            render(&report),
            vec!["Output: /p/dist", "", "✓ Nothing to change"]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(report(false)).unwrap();

        assert_eq!(json["out_dir"], "/p/dist");
        assert_eq!(json["dry_run"], false);
        assert_eq!(json["declarations"][0]["status"], "rewritten");
        assert_eq!(json["entries"][1]["status"], "missing");
    }
}
