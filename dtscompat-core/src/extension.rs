/// Extension every rewritten specifier ends with.
pub const DECLARATION_EXTENSION: &str = ".d.ts";

/// Source extensions recognized at the end of a relative specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceExtension {
    Js,
    Ts,
    Mjs,
    Cjs,
    Tsx,
    Jsx,
}

impl SourceExtension {
    /// All recognized extensions.
    pub const ALL: [SourceExtension; 6] = [
        SourceExtension::Js,
        SourceExtension::Ts,
        SourceExtension::Mjs,
        SourceExtension::Cjs,
        SourceExtension::Tsx,
        SourceExtension::Jsx,
    ];

    /// The extension including its leading dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceExtension::Js => ".js",
            SourceExtension::Ts => ".ts",
            SourceExtension::Mjs => ".mjs",
            SourceExtension::Cjs => ".cjs",
            SourceExtension::Tsx => ".tsx",
            SourceExtension::Jsx => ".jsx",
        }
    }

    /// Split a module path into its stem and recognized extension.
    ///
    /// Returns `None` when the path does not end in a recognized
    /// extension, or already ends in [`DECLARATION_EXTENSION`].
    pub fn split(path: &str) -> Option<(&str, SourceExtension)> {
        if path.ends_with(DECLARATION_EXTENSION) {
            return None;
        }
        Self::ALL
            .iter()
            .find_map(|ext| path.strip_suffix(ext.as_str()).map(|stem| (stem, *ext)))
    }
}

impl std::fmt::Display for SourceExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
