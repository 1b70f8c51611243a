//! Lifecycle hook identifiers.

use serde::Serialize;

/// A point in the bundler lifecycle where plugins are called.
///
/// Hooks run once per build, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    /// The host configuration (output directory) is known.
    ConfigResolved,
    /// The bundle and its chunk graph are finalized, nothing written yet.
    GenerateBundle,
    /// Every output file exists on disk.
    WriteBundle,
}

impl Hook {
    /// All hooks, in execution order.
    pub const ORDER: [Hook; 3] = [Hook::ConfigResolved, Hook::GenerateBundle, Hook::WriteBundle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::ConfigResolved => "config_resolved",
            Hook::GenerateBundle => "generate_bundle",
            Hook::WriteBundle => "write_bundle",
        }
    }
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
