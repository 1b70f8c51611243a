//! The declaration compatibility plugin.
//!
//! After the bundle is on disk, [`DtsCompat`]:
//!
//! 1. discovers every `.d.ts` file under the output directory,
//! 2. rewrites relative source-extension specifiers in each to `.d.ts`,
//! 3. prepends a `@ts-self-types` pragma to every recorded entry file.
//!
//! Files in a batch are processed concurrently. A failure on one file is
//! logged and reported but never stops the others; only a failure to
//! discover the declaration files aborts the pass.

pub mod annotate;
pub mod report;
pub mod specifier;

use std::{
    error::Error as _,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use dtscompat_config::{Options, entry_file_path_problem};
use dtscompat_core::{FileError, TextFile, discover_declarations};
use eyre::{Context, Result, eyre};
use futures::future;

use self::{
    annotate::Annotation,
    report::{DeclarationOutcome, EntryOutcome, PassReport},
};
use crate::{
    OutputBundle,
    lifecycle::{BuildContext, Diagnostic, Hook, Plugin, ResolvedConfig},
};

/// Whether the pass writes its results back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Rewrite files in place.
    #[default]
    Write,
    /// Read and transform, but leave every file untouched.
    DryRun,
}

impl WriteMode {
    fn writes(self) -> bool {
        matches!(self, WriteMode::Write)
    }
}

/// Plugin that makes emitted declaration files resolvable by runtimes that
/// require explicit extensions on relative imports.
#[derive(Debug, Clone, Default)]
pub struct DtsCompat {
    options: Options,
    mode: WriteMode,
}

impl DtsCompat {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            mode: WriteMode::Write,
        }
    }

    /// Set the write mode.
    pub fn mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// The declaration reference written into entry pragmas.
    pub fn reference(&self) -> &str {
        self.options.entry_file_path()
    }

    /// Run the whole pass on `out_dir`: rewrite declarations, then annotate
    /// `entries`.
    ///
    /// # Errors
    ///
    /// Returns an error only if declaration discovery fails.
    pub async fn run(&self, out_dir: &Path, entries: &[String]) -> Result<PassReport> {
        let declarations = self.fix_declarations(out_dir).await?;
        let entries = self.annotate_entries(out_dir, entries).await;

        Ok(PassReport {
            dry_run: self.mode == WriteMode::DryRun,
            declarations,
            entries,
        })
    }

    /// Discover and rewrite every declaration file under `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be walked.
    pub async fn fix_declarations(&self, out_dir: &Path) -> Result<Vec<DeclarationOutcome>> {
        let root = out_dir.to_path_buf();
        let ignore = self.options.ignore.clone();
        let files = tokio::task::spawn_blocking(move || discover_declarations(&root, &ignore))
            .await
            .wrap_err("Declaration discovery task failed")??;

        let mode = self.mode;
        Ok(future::join_all(files.into_iter().map(|path| rewrite_declaration(path, mode))).await)
    }

    /// Prepend the pragma to each entry file that exists under `out_dir`.
    pub async fn annotate_entries(&self, out_dir: &Path, entries: &[String]) -> Vec<EntryOutcome> {
        let reference = self.reference();
        let mode = self.mode;
        future::join_all(
            entries
                .iter()
                .map(|entry| annotate_entry(out_dir, entry, reference, mode)),
        )
        .await
    }
}

#[async_trait]
impl Plugin for DtsCompat {
    fn name(&self) -> &'static str {
        "dtscompat"
    }

    fn config_resolved(&self, config: &ResolvedConfig, ctx: &mut BuildContext) -> Result<()> {
        if let Some(reason) = entry_file_path_problem(self.reference()) {
            return Err(eyre!(
                "Invalid entry_file_path '{}': {}",
                self.reference(),
                reason
            ));
        }
        tracing::debug!(
            root = %config.root.display(),
            out_dir = %ctx.out_dir().display(),
            "output directory resolved"
        );
        Ok(())
    }

    fn generate_bundle(&self, bundle: &OutputBundle, ctx: &mut BuildContext) -> Result<()> {
        ctx.set_entries(bundle.entry_chunks());
        tracing::debug!(entries = ctx.entry_count(), "recorded entry chunks");
        Ok(())
    }

    async fn write_bundle(&self, ctx: &mut BuildContext) -> Result<()> {
        let out_dir = ctx.out_dir().to_path_buf();
        let entries: Vec<String> = ctx.entries().map(str::to_string).collect();

        let report = self.run(&out_dir, &entries).await?;
        record_diagnostics(ctx, &report);

        tracing::info!(
            rewritten = report.rewritten().count(),
            specifiers = report.specifier_count(),
            annotated = report.annotated().count(),
            failed = report.failures().count(),
            dry_run = report.dry_run,
            "declaration pass finished"
        );
        ctx.report.merge(report);
        Ok(())
    }
}

async fn rewrite_declaration(path: PathBuf, mode: WriteMode) -> DeclarationOutcome {
    match try_rewrite(&path, mode).await {
        Ok(0) => DeclarationOutcome::Unchanged { path },
        Ok(specifiers) => {
            tracing::debug!(path = %path.display(), specifiers, "rewrote declaration file");
            DeclarationOutcome::Rewritten { path, specifiers }
        }
        Err(err) => {
            let error = describe(&err);
            tracing::error!(path = %path.display(), %error, "failed to process declaration file");
            DeclarationOutcome::Failed { path, error }
        }
    }
}

async fn try_rewrite(path: &Path, mode: WriteMode) -> Result<usize, FileError> {
    let mut file = TextFile::open(path).await?;
    let rewrite = specifier::rewrite(file.content());
    let count = rewrite.count;

    if rewrite.changed() {
        file.set_content(rewrite.text);
        if mode.writes() {
            file.save().await?;
        }
    }
    Ok(count)
}

async fn annotate_entry(
    out_dir: &Path,
    entry: &str,
    reference: &str,
    mode: WriteMode,
) -> EntryOutcome {
    let Some(path) = annotate::entry_path(out_dir, entry) else {
        tracing::warn!(entry, "refusing entry outside the output directory");
        return EntryOutcome::Refused {
            entry: entry.to_string(),
        };
    };

    if !dtscompat_core::exists(&path).await {
        tracing::debug!(path = %path.display(), "entry file not on disk, skipping");
        return EntryOutcome::Missing { path };
    }

    match try_annotate(&path, reference, mode).await {
        Ok(true) => {
            tracing::debug!(path = %path.display(), "annotated entry file");
            EntryOutcome::Annotated { path }
        }
        Ok(false) => EntryOutcome::AlreadyAnnotated { path },
        Err(err) => {
            let error = describe(&err);
            tracing::error!(path = %path.display(), %error, "failed to process entry file");
            EntryOutcome::Failed { path, error }
        }
    }
}

async fn try_annotate(path: &Path, reference: &str, mode: WriteMode) -> Result<bool, FileError> {
    let mut file = TextFile::open(path).await?;
    match annotate::annotate(file.content(), reference) {
        Annotation::AlreadyAnnotated => Ok(false),
        Annotation::Annotated(content) => {
            file.set_content(content);
            if mode.writes() {
                file.save().await?;
            }
            Ok(true)
        }
    }
}

fn describe(err: &FileError) -> String {
    match err.source() {
        Some(cause) => format!("{err}: {cause}"),
        None => err.to_string(),
    }
}

fn record_diagnostics(ctx: &mut BuildContext, report: &PassReport) {
    for (path, error) in report.failures() {
        ctx.add_diagnostic(
            Diagnostic::error(Hook::WriteBundle, error).at(path.display().to_string()),
        );
    }
    for outcome in &report.entries {
        if let EntryOutcome::Refused { entry } = outcome {
            ctx.add_diagnostic(
                Diagnostic::warning(Hook::WriteBundle, "entry is outside the output directory")
                    .at(entry.clone()),
            );
        }
    }
}
