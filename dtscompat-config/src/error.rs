use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for dtscompat-config operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an invalid entry file path error.
    pub fn entry_file_path_error(
        &self,
        value: impl Into<String>,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidEntryFilePath {
            src: self.named_source(),
            span: span.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    /// Create an invalid glob error.
    pub fn glob_error(
        &self,
        pattern: impl Into<String>,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidGlob {
            src: self.named_source(),
            span: span.into(),
            pattern: pattern.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'dtscompat init' to create a dtscompat.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(dtscompat::write_error))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dtscompat.toml")]
    #[diagnostic(code(dtscompat::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid entry_file_path '{value}'")]
    #[diagnostic(
        code(dtscompat::invalid_entry_file_path),
        help("{reason}; use a relative path such as \"./lib.d.ts\"")
    )]
    InvalidEntryFilePath {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        value: String,
        reason: String,
    },

    #[error("invalid ignore pattern '{pattern}'")]
    #[diagnostic(code(dtscompat::invalid_glob), help("{reason}"))]
    InvalidGlob {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid glob")]
        span: SourceSpan,
        pattern: String,
        reason: String,
    },
}
