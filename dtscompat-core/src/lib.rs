//! Core utilities and types for dtscompat.
//!
//! This crate provides the filesystem side of the declaration pass:
//! locating emitted `.d.ts` files and reading/writing text files
//! asynchronously with path-carrying errors.

mod discover;
mod extension;
mod file;

// Discovery
pub use discover::{DECLARATION_GLOB, DEPENDENCY_CACHE_DIR, discover_declarations};
// Extensions
pub use extension::{DECLARATION_EXTENSION, SourceExtension};
// File operations
pub use file::{FileError, TextFile, exists, read_text, write_text};

/// Output directory used when the host does not configure one.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Declaration reference used in the entry pragma when none is configured.
pub const DEFAULT_ENTRY_FILE_PATH: &str = "./lib.d.ts";
