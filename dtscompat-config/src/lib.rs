//! Configuration for dtscompat.
//!
//! Parses and validates `dtscompat.toml`, reporting problems as
//! [`miette`] diagnostics that point into the source file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod options;

pub use error::{Error, Result, SourceContext};
pub use file::{DtsCompatToml, TEMPLATE};
pub use options::{Options, entry_file_path_problem};
