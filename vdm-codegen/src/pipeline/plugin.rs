//! Pipeline plugin trait for extensibility.

use std::sync::Arc;

use eyre::Result;
use tracing::debug;
use vdmgen_edmx::ServiceMappings;

use super::CompilationContext;

/// A plugin that can hook into the compilation pipeline.
///
/// Plugins receive callbacks before and after each phase runs, allowing
/// them to inspect or modify the compilation context.
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully. Return an error to abort
    /// the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}

/// Logs phase boundaries at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPlugin;

impl Plugin for TracingPlugin {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        debug!(service = ctx.original_file_name(), phase, "phase started");
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        debug!(
            service = ctx.original_file_name(),
            phase,
            diagnostics = ctx.diagnostics.len(),
            "phase finished"
        );
        Ok(())
    }
}

/// Picks the service mapping entry of each service before the build phase.
///
/// Entries are looked up by original file name first, then by the namespace
/// the parse phase found. A mapping already set on the input wins.
#[derive(Debug, Clone)]
pub struct ServiceMappingPlugin {
    mappings: Arc<ServiceMappings>,
}

impl ServiceMappingPlugin {
    pub fn new(mappings: Arc<ServiceMappings>) -> Self {
        Self { mappings }
    }
}

impl Plugin for ServiceMappingPlugin {
    fn name(&self) -> &'static str {
        "service-mapping"
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        if phase != "build" || ctx.input.mapping.is_some() {
            return Ok(());
        }
        let namespace = ctx.raw()?.namespace.clone();
        let mapping = self
            .mappings
            .lookup(ctx.original_file_name(), &namespace)
            .cloned();
        if mapping.is_some() {
            debug!(service = ctx.original_file_name(), "using service mapping");
        }
        ctx.input.mapping = mapping;
        Ok(())
    }
}
