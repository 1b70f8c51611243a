//! Bundler lifecycle seen from a plugin.
//!
//! This module models the boundary with the build tool that hosts the
//! declaration pass:
//!
//! - [`ResolvedConfig`] - what the `config_resolved` hook delivers
//! - [`Plugin`] - the hooks a plugin may implement
//! - [`BuildContext`] - per-build state shared between hooks
//! - [`Lifecycle`] - drives plugins through one build
//!
//! # Example
//!
//! ```ignore
//! use dtscompat_pass::{DtsCompat, Lifecycle, ResolvedConfig};
//!
//! let lifecycle = Lifecycle::new().plugin(DtsCompat::new(options));
//! let ctx = lifecycle.run(&ResolvedConfig::new(root), &bundle).await?;
//!
//! for diag in &ctx.diagnostics {
//!     eprintln!("{diag}");
//! }
//! ```

mod config;
mod context;
mod diagnostic;
mod hook;
mod plugin;
mod runner;

pub use config::ResolvedConfig;
pub use context::BuildContext;
pub use diagnostic::{Diagnostic, Severity};
pub use hook::Hook;
pub use plugin::Plugin;
pub use runner::Lifecycle;
