//! Declaration rewrite pass for dtscompat.
//!
//! This crate post-processes a bundle's emitted `.d.ts` files so they
//! resolve under runtimes that require explicit extensions on relative
//! imports, and marks entry files with a `@ts-self-types` pragma.
//!
//! # Module Organization
//!
//! - [`dts`] - the [`DtsCompat`] plugin, specifier rewriter and entry annotator
//! - [`lifecycle`] - bundler hooks, per-build context and the [`Lifecycle`] runner
//! - [`bundle`] - the output bundle handed over by the bundler

pub mod bundle;
pub mod dts;
pub mod lifecycle;

pub use bundle::{OutputBundle, OutputItem};
pub use dts::{
    DtsCompat, WriteMode,
    report::{DeclarationOutcome, EntryOutcome, PassReport},
};
pub use lifecycle::{BuildContext, Diagnostic, Hook, Lifecycle, Plugin, ResolvedConfig, Severity};
