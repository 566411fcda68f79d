//! Lint for services that would generate nothing.

use vdmgen_edmx::RawSchema;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about services without entity sets or function imports.
pub struct EmptyServiceLint;

impl Lint for EmptyServiceLint {
    fn name(&self) -> &'static str {
        "empty-service"
    }

    fn description(&self) -> &'static str {
        "Warn about services without entity sets and function imports"
    }

    fn check(&self, raw: &RawSchema, diagnostics: &mut Vec<Diagnostic>) {
        if raw.entity_sets.is_empty() && raw.function_imports.is_empty() {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!(
                        "service '{}' has neither entity sets nor function imports",
                        raw.namespace
                    ),
                )
                .at(raw.namespace.clone()),
            );
        }
    }
}
