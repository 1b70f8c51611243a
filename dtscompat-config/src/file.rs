use std::path::{Path, PathBuf};

use crate::{Error, Options, Result};

/// Commented template written by `dtscompat init`.
pub const TEMPLATE: &str = r#"# dtscompat configuration

# Directory the bundler writes to, relative to the project root.
# out_dir = "dist"

# Declaration file referenced by the @ts-self-types pragma on entry files.
# entry_file_path = "./lib.d.ts"

# Paths (relative to out_dir) skipped when looking for .d.ts files.
ignore = ["**/node_modules/**"]
"#;

/// Represents a dtscompat.toml file with both raw content and parsed options.
pub struct DtsCompatToml {
    path: PathBuf,
    content: String,
    options: Options,
}

impl DtsCompatToml {
    /// Conventional file name, looked up in the project root.
    pub const FILE_NAME: &'static str = "dtscompat.toml";

    /// Open and parse a dtscompat.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let options = Options::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            options,
        })
    }

    /// Open the file if it exists, otherwise fall back to default options.
    pub fn open_or_default(path: impl AsRef<Path>) -> Result<Options> {
        let path = path.as_ref();
        if path.exists() {
            Ok(Self::open(path)?.options)
        } else {
            Ok(Options::default())
        }
    }

    /// Create a new file from the template, without touching disk.
    pub fn template(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: TEMPLATE.to_string(),
            options: Options::default(),
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Save the current content to disk.
    pub fn save(&self) -> Result<()> {
        std::fs::write(&self.path, &self.content).map_err(|e| {
            Box::new(Error::Write {
                path: self.path.clone(),
                source: e,
            })
        })?;
        Ok(())
    }
}
