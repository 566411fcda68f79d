//! Validate phase - runs lints on the raw schema.

mod lint;
pub mod lints;

use eyre::{Report, Result, eyre};
pub use lint::{Lint, LintInfo};
pub use lints::{
    ComplexTypeCycleLint, EmptyServiceLint, MissingKeyLint, OrphanEntityReturnLint,
    UnusedEntityTypeLint,
};

use crate::pipeline::{CompilationContext, Diagnostic, Phase};

/// Phase that validates the raw schema using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(ComplexTypeCycleLint),
                Box::new(MissingKeyLint),
                Box::new(OrphanEntityReturnLint),
                Box::new(EmptyServiceLint),
                Box::new(UnusedEntityTypeLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check schema integrity and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut diagnostics = Vec::new();
        let raw = ctx.raw()?;
        for lint in &self.lints {
            lint.check(raw, &mut diagnostics);
        }
        ctx.diagnostics.extend(diagnostics);

        // Warnings are allowed
        let errors: Vec<&Diagnostic> = ctx.errors().collect();
        if errors.is_empty() {
            return Ok(());
        }

        let summary = format!(
            "validation failed with {} error(s):\n  {}",
            errors.len(),
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n  ")
        );
        // the first model error stays reachable through downcasting
        Err(match errors.iter().find_map(|d| d.cause.clone()) {
            Some(cause) => Report::new(cause).wrap_err(summary),
            None => eyre!(summary),
        })
    }
}
