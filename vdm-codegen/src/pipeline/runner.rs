//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;

use super::{
    CompilationContext, Phase, Plugin, ServiceInput,
    phases::{BuildPhase, ParsePhase, ValidatePhase},
};
use crate::language::{EdmTypeMapper, NamingConvention};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (parse, validate, build) followed by any user
/// phases, calling plugin hooks before and after each phase. One pipeline
/// can be shared by every service of a run: it holds no per-service state.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(TS_NAMING, Arc::new(TypeScriptTypeMapper))
///     .plugin(TracingPlugin);
///
/// let ctx = pipeline.run(input)?;
/// ```
pub struct Pipeline {
    builtin: Vec<Box<dyn Phase>>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in phases.
    pub fn new(naming: NamingConvention, mapper: Arc<dyn EdmTypeMapper>) -> Self {
        Self {
            builtin: vec![
                Box::new(ParsePhase),
                Box::new(ValidatePhase::new()),
                Box::new(BuildPhase::new(naming, mapper)),
            ],
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names of the phases, in execution order.
    pub fn phase_names(&self) -> Vec<&'static str> {
        self.builtin
            .iter()
            .chain(self.phases.iter())
            .map(|p| p.name())
            .collect()
    }

    /// Run the pipeline for one service.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, input: ServiceInput) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(input);
        self.run_context(&mut ctx)?;
        Ok(ctx)
    }

    /// Like [`Pipeline::run`], but keeps the context when a phase fails so
    /// the diagnostics collected so far can still be reported.
    pub fn run_context(&self, ctx: &mut CompilationContext) -> Result<()> {
        for phase in self.builtin.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), ctx)?;
        }
        Ok(())
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}
