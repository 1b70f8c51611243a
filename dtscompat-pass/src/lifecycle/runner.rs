//! Lifecycle orchestrator.

use eyre::{Context, Result};

use super::{BuildContext, Hook, Plugin, ResolvedConfig};
use crate::OutputBundle;

/// Drives registered plugins through one build.
///
/// Stands in for the bundler host: every [`run`](Lifecycle::run) creates a
/// fresh [`BuildContext`] and calls each hook on every plugin, in
/// registration order.
///
/// # Example
///
/// ```ignore
/// let lifecycle = Lifecycle::new().plugin(DtsCompat::new(options));
///
/// let ctx = lifecycle.run(&config, &bundle).await?;
/// println!("{} files rewritten", ctx.report.rewritten().count());
/// ```
pub struct Lifecycle {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Lifecycle {
    /// Create a lifecycle with no plugins.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Add a plugin to receive lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run one build: config resolved, bundle generated, bundle written.
    ///
    /// # Errors
    ///
    /// Returns an error if any hook fails fatally.
    pub async fn run(&self, config: &ResolvedConfig, bundle: &OutputBundle) -> Result<BuildContext> {
        let mut ctx = BuildContext::new(config.resolved_out_dir());

        for plugin in &self.plugins {
            plugin
                .config_resolved(config, &mut ctx)
                .wrap_err_with(|| hook_failed(plugin.as_ref(), Hook::ConfigResolved))?;
        }

        for plugin in &self.plugins {
            plugin
                .generate_bundle(bundle, &mut ctx)
                .wrap_err_with(|| hook_failed(plugin.as_ref(), Hook::GenerateBundle))?;
        }

        for plugin in &self.plugins {
            plugin
                .write_bundle(&mut ctx)
                .await
                .wrap_err_with(|| hook_failed(plugin.as_ref(), Hook::WriteBundle))?;
        }

        Ok(ctx)
    }
}

fn hook_failed(plugin: &dyn Plugin, hook: Hook) -> String {
    format!("Plugin '{}' failed in {}", plugin.name(), hook)
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
