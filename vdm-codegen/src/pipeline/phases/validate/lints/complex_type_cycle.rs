//! Lint for complex types containing themselves.

use vdmgen_edmx::RawSchema;

use super::super::Lint;
use crate::{
    model::{ComplexTypeGraph, SemanticModelError},
    pipeline::Diagnostic,
};

/// Lint that errors when a complex type contains itself at any depth.
pub struct ComplexTypeCycleLint;

impl Lint for ComplexTypeCycleLint {
    fn name(&self) -> &'static str {
        "complex-type-cycle"
    }

    fn description(&self) -> &'static str {
        "Detect complex types that contain themselves"
    }

    fn check(&self, raw: &RawSchema, diagnostics: &mut Vec<Diagnostic>) {
        if let Err(err) = ComplexTypeGraph::new(raw).post_order() {
            let location = match &err {
                SemanticModelError::ComplexTypeCycle { cycle } => cycle.first().cloned(),
                _ => None,
            };
            let diagnostic = Diagnostic::model_error("validate", err);
            diagnostics.push(match location {
                Some(location) => diagnostic.at(location),
                None => diagnostic,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::raw_schema;

    #[test]
    fn test_cycle() {
        let raw = raw_schema(
            r#"<ComplexType Name="A"><Property Name="B" Type="NS.B"/></ComplexType>
      <ComplexType Name="B"><Property Name="A" Type="NS.A"/></ComplexType>"#,
        );

        let mut diagnostics = Vec::new();
        ComplexTypeCycleLint.check(&raw, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(diagnostics[0].location.as_deref(), Some("NS.A"));
        assert!(matches!(
            diagnostics[0].cause,
            Some(SemanticModelError::ComplexTypeCycle { .. })
        ));
    }

    #[test]
    fn test_nesting_without_cycle() {
        let raw = raw_schema(
            r#"<ComplexType Name="A"><Property Name="B" Type="NS.B"/></ComplexType>
      <ComplexType Name="B"><Property Name="X" Type="Edm.String"/></ComplexType>"#,
        );

        let mut diagnostics = Vec::new();
        ComplexTypeCycleLint.check(&raw, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
