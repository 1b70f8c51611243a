//! Declaration file discovery.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

/// Pattern every discovered file must match, relative to the output root.
pub const DECLARATION_GLOB: &str = "**/*.d.ts";

/// Directory name that is never descended into.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Find every `.d.ts` file under `root`, at any depth.
///
/// Directories named [`DEPENDENCY_CACHE_DIR`] are pruned, as are dot-files
/// and dot-directories below `root`. Symbolic links are followed; a link
/// that loops back to an ancestor is skipped. Any path (relative to `root`)
/// matching one of the `ignore` globs is skipped. Returned paths are
/// absolute and sorted. An empty result is not an error.
///
/// # Errors
///
/// Returns an error if `root` cannot be walked or a glob is invalid.
pub fn discover_declarations(root: &Path, ignore: &[String]) -> Result<Vec<PathBuf>> {
    let root = std::path::absolute(root)
        .wrap_err_with(|| format!("Failed to resolve output directory {}", root.display()))?;
    let declarations = build_globset([DECLARATION_GLOB])?;
    let ignored = build_globset(ignore)?;

    let walker = WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_dependency_cache(e) && !is_hidden(e));

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                tracing::warn!(path = ?err.path(), "skipping symlink loop");
                continue;
            }
            Err(err) => {
                return Err(err)
                    .wrap_err_with(|| format!("Failed to read directory {}", root.display()));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
        if declarations.is_match(relative) && !ignored.is_match(relative) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    tracing::debug!(
        root = %root.display(),
        count = found.len(),
        "discovered declaration files"
    );
    Ok(found)
}

fn is_dependency_cache(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name() == DEPENDENCY_CACHE_DIR
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn build_globset<I, S>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob =
            Glob::new(pattern).wrap_err_with(|| format!("Invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().wrap_err("Failed to build glob set")
}
