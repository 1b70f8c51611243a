//! Output bundle handed over by the bundler once generation finishes.

use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One emitted output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputItem {
    /// Compiled JavaScript.
    Chunk {
        #[serde(rename = "isEntry", default)]
        is_entry: bool,
    },
    /// Anything else (styles, images, maps).
    Asset,
}

impl OutputItem {
    /// An entry chunk.
    pub fn entry() -> Self {
        OutputItem::Chunk { is_entry: true }
    }

    /// A shared, non-entry chunk.
    pub fn shared() -> Self {
        OutputItem::Chunk { is_entry: false }
    }

    /// Whether this is a chunk flagged as an entry.
    pub fn is_entry_chunk(&self) -> bool {
        matches!(self, OutputItem::Chunk { is_entry: true })
    }
}

/// Output file names mapped to their descriptors, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputBundle {
    items: IndexMap<String, OutputItem>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    file: String,
    #[serde(rename = "isEntry", default)]
    is_entry: bool,
}

impl OutputBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an output file.
    pub fn insert(&mut self, file_name: impl Into<String>, item: OutputItem) -> &mut Self {
        self.items.insert(file_name.into(), item);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// File names of chunks that are entries.
    pub fn entry_chunks(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|(_, item)| item.is_entry_chunk())
            .map(|(name, _)| name.as_str())
    }

    /// Build a bundle from a bundler manifest (`.vite/manifest.json` layout).
    ///
    /// Each manifest record names its output `file`; JavaScript outputs
    /// become chunks carrying the record's `isEntry` flag, everything else
    /// becomes an asset.
    pub fn from_manifest_json(json: &str) -> Result<Self> {
        let records: IndexMap<String, ManifestEntry> =
            serde_json::from_str(json).wrap_err("Failed to parse bundle manifest")?;

        let mut bundle = Self::new();
        for record in records.into_values() {
            let item = if is_script(&record.file) {
                OutputItem::Chunk {
                    is_entry: record.is_entry,
                }
            } else {
                OutputItem::Asset
            };
            bundle.insert(record.file, item);
        }
        Ok(bundle)
    }
}

impl<S: Into<String>> FromIterator<(S, OutputItem)> for OutputBundle {
    fn from_iter<I: IntoIterator<Item = (S, OutputItem)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(name, item)| (name.into(), item))
                .collect(),
        }
    }
}

fn is_script(file: &str) -> bool {
    [".js", ".mjs", ".cjs"].iter().any(|ext| file.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_chunks_filters_type_and_flag() {
        let bundle: OutputBundle = [
            ("index.js", OutputItem::entry()),
            ("shared-abc.js", OutputItem::shared()),
            ("style.css", OutputItem::Asset),
            ("cli.js", OutputItem::entry()),
        ]
        .into_iter()
        .collect();

        let entries: Vec<_> = bundle.entry_chunks().collect();
        assert_eq!(entries, vec!["index.js", "cli.js"]);
    }

    #[test]
    fn test_empty_bundle_has_no_entries() {
        let bundle = OutputBundle::new();

        assert!(bundle.is_empty());
        assert_eq!(bundle.entry_chunks().count(), 0);
    }

    #[test]
    fn test_from_manifest_json() {
        let json = r#"{
            "src/main.ts": { "file": "main.js", "src": "src/main.ts", "isEntry": true },
            "_shared-1a2b.js": { "file": "shared-1a2b.js" },
            "src/main.css": { "file": "main.css", "isEntry": true }
        }"#;

        let bundle = OutputBundle::from_manifest_json(json).unwrap();

        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.items.get("main.css"), Some(&OutputItem::Asset));
        assert_eq!(bundle.entry_chunks().collect::<Vec<_>>(), vec!["main.js"]);
    }

    #[test]
    fn test_from_manifest_json_rejects_garbage() {
        assert!(OutputBundle::from_manifest_json("[1, 2]").is_err());
    }

    #[test]
    fn test_serde_layout() {
        let mut bundle = OutputBundle::new();
        bundle
            .insert("index.js", OutputItem::entry())
            .insert("logo.svg", OutputItem::Asset);

        let json = serde_json::to_string(&bundle).unwrap();
        assert_eq!(
            json,
            r#"{"index.js":{"type":"chunk","isEntry":true},"logo.svg":{"type":"asset"}}"#
        );
        let back: OutputBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
