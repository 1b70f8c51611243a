//! Fix operation - run the declaration pass as a one-shot build host.

use std::path::{Path, PathBuf};

use dtscompat_config::Options;
use dtscompat_pass::{DtsCompat, Lifecycle, OutputBundle, OutputItem, ResolvedConfig, WriteMode};
use eyre::{Context, Result};

use crate::reports::FixReport;

/// Everything needed to run one pass from the command line.
#[derive(Debug)]
pub struct FixRequest {
    pub root: PathBuf,
    pub options: Options,
    /// Entry names given on the command line.
    pub entries: Vec<String>,
    /// Bundler manifest to read entry chunks from.
    pub manifest: Option<PathBuf>,
    pub mode: WriteMode,
}

/// Execute the fix operation.
///
/// Builds the output bundle from the manifest and explicit entries, then
/// drives the [`DtsCompat`] plugin through a single lifecycle run.
pub async fn fix(request: FixRequest) -> Result<FixReport> {
    let root = std::path::absolute(&request.root)
        .wrap_err_with(|| format!("Failed to resolve {}", request.root.display()))?;
    let bundle = load_bundle(request.manifest.as_deref(), &request.entries).await?;

    let mut config = ResolvedConfig::new(root);
    if let Some(out_dir) = &request.options.out_dir {
        config = config.with_out_dir(out_dir);
    }

    let lifecycle =
        Lifecycle::new().plugin(DtsCompat::new(request.options).mode(request.mode));
    let ctx = lifecycle.run(&config, &bundle).await?;

    Ok(FixReport::from_context(ctx))
}

async fn load_bundle(manifest: Option<&Path>, entries: &[String]) -> Result<OutputBundle> {
    let mut bundle = match manifest {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .wrap_err_with(|| format!("Failed to read manifest {}", path.display()))?;
            OutputBundle::from_manifest_json(&json)
                .wrap_err_with(|| format!("Invalid manifest {}", path.display()))?
        }
        None => OutputBundle::new(),
    };

    for entry in entries {
        bundle.insert(entry.as_str(), OutputItem::entry());
    }

    if bundle.entry_chunks().next().is_none() {
        tracing::info!("no entry chunks given, only declaration files will be rewritten");
    }
    Ok(bundle)
}
