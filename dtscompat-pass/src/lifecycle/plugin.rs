//! Plugin trait for the bundler lifecycle.

use async_trait::async_trait;
use eyre::Result;

use super::{BuildContext, ResolvedConfig};
use crate::OutputBundle;

/// A plugin that hooks into a bundler's build.
///
/// Hooks are called once per build, in order: [`config_resolved`],
/// [`generate_bundle`], then [`write_bundle`]. Plugin instances are shared
/// across builds and must not keep per-build state; anything a later hook
/// needs goes into the [`BuildContext`].
///
/// [`config_resolved`]: Plugin::config_resolved
/// [`generate_bundle`]: Plugin::generate_bundle
/// [`write_bundle`]: Plugin::write_bundle
///
/// # Example
///
/// ```ignore
/// struct EntryCounter;
///
/// #[async_trait]
/// impl Plugin for EntryCounter {
///     fn name(&self) -> &'static str { "entry-counter" }
///
///     fn generate_bundle(&self, bundle: &OutputBundle, _ctx: &mut BuildContext) -> Result<()> {
///         println!("{} entries", bundle.entry_chunks().count());
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called once the host configuration is known.
    ///
    /// # Errors
    ///
    /// Return an error to abort the build.
    #[allow(unused_variables)]
    fn config_resolved(&self, config: &ResolvedConfig, ctx: &mut BuildContext) -> Result<()> {
        Ok(())
    }

    /// Called with the complete output bundle, before anything is written.
    ///
    /// # Errors
    ///
    /// Return an error to abort the build.
    #[allow(unused_variables)]
    fn generate_bundle(&self, bundle: &OutputBundle, ctx: &mut BuildContext) -> Result<()> {
        Ok(())
    }

    /// Called after every output file exists on disk.
    ///
    /// # Errors
    ///
    /// Return an error to abort the build. Per-file problems should be
    /// recorded as diagnostics instead.
    #[allow(unused_variables)]
    async fn write_bundle(&self, ctx: &mut BuildContext) -> Result<()> {
        Ok(())
    }
}
