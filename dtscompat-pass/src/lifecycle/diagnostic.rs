//! Diagnostic types for the build lifecycle.
//!
//! Plugins record per-file problems here instead of failing the build.

use serde::Serialize;

use super::Hook;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A file could not be processed.
    Error,
    /// Processing continued but something was skipped.
    Warning,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message recorded during a lifecycle hook.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The hook that produced this diagnostic.
    pub hook: Hook,
    /// The diagnostic message.
    pub message: String,
    /// Optional file the message refers to.
    pub location: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(hook: Hook, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, hook, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(hook: Hook, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, hook, message)
    }

    fn new(severity: Severity, hook: Hook, message: impl Into<String>) -> Self {
        Self {
            severity,
            hook,
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error(Hook::WriteBundle, "failed to read file");
        assert!(diag.severity.is_error());
        assert_eq!(diag.hook, Hook::WriteBundle);
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning(Hook::WriteBundle, "entry refused").at("../x.js");
        assert_eq!(diag.location.as_deref(), Some("../x.js"));
        assert_eq!(diag.to_string(), "warning: entry refused (at ../x.js)");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
