//! `@ts-self-types` pragma for entry files.

use std::path::{Component, Path, PathBuf};

/// Build the pragma line, including its trailing newline.
pub fn pragma(reference: &str) -> String {
    format!("// @ts-self-types=\"{reference}\"\n")
}

/// Outcome of annotating entry file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The pragma was prepended.
    Annotated(String),
    /// The text already starts with this exact pragma.
    AlreadyAnnotated,
}

/// Prepend the pragma to `content`. The rest of the text is not inspected.
pub fn annotate(content: &str, reference: &str) -> Annotation {
    let pragma = pragma(reference);
    if content.starts_with(&pragma) {
        return Annotation::AlreadyAnnotated;
    }

    let mut out = String::with_capacity(pragma.len() + content.len());
    out.push_str(&pragma);
    out.push_str(content);
    Annotation::Annotated(out)
}

/// Resolve an entry file name against the output directory.
///
/// Returns `None` for names that could leave `out_dir`: absolute paths and
/// anything containing a `..` component.
pub fn entry_path(out_dir: &Path, entry: &str) -> Option<PathBuf> {
    let relative = Path::new(entry);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    (contained && !entry.is_empty()).then(|| out_dir.join(relative))
}
