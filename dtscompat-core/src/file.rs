use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reading or writing a single file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a UTF-8 text file.
pub async fn read_text(path: &Path) -> Result<String, FileError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Overwrite a text file in place.
pub async fn write_text(path: &Path, content: &str) -> Result<(), FileError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Check whether a path exists. Probe failures count as "does not exist".
pub async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// A text file loaded from disk, transformed, and written back.
#[derive(Debug, Clone)]
pub struct TextFile {
    path: PathBuf,
    content: String,
}

impl TextFile {
    /// Load a file from disk.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let path = path.into();
        let content = read_text(&path).await?;
        Ok(Self { path, content })
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the in-memory content. Returns true if it differs.
    pub fn set_content(&mut self, content: String) -> bool {
        let changed = content != self.content;
        self.content = content;
        changed
    }

    /// Write the current content back to the original path.
    pub async fn save(&self) -> Result<(), FileError> {
        write_text(&self.path, &self.content).await
    }
}
