//! Lint for function imports returning entities no entity set holds.

use vdmgen_edmx::{RawSchema, TypeReference};

use super::super::Lint;
use crate::{model::SemanticModelError, pipeline::Diagnostic};

/// Lint that errors when a function import returns an entity type without
/// an entity set, as no entity class is generated for it.
pub struct OrphanEntityReturnLint;

impl Lint for OrphanEntityReturnLint {
    fn name(&self) -> &'static str {
        "orphan-entity-return"
    }

    fn description(&self) -> &'static str {
        "Require an entity set for entity types returned by function imports"
    }

    fn check(&self, raw: &RawSchema, diagnostics: &mut Vec<Diagnostic>) {
        for function in &raw.function_imports {
            let Some(qualified) = function
                .return_type
                .as_deref()
                .and_then(|r| TypeReference::parse(r).ok())
                .and_then(|r| r.qualified_name())
            else {
                continue;
            };
            if raw.entity_type(&qualified).is_some()
                && raw.entity_sets_of(&qualified).next().is_none()
            {
                let err = SemanticModelError::UnresolvedEntitySet {
                    function_import: function.name.clone(),
                    entity_type: qualified,
                };
                diagnostics.push(
                    Diagnostic::model_error("validate", err).at(function.name.clone()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::raw_schema;

    const TYPES: &str = r#"<EntityType Name="Held"><Key><PropertyRef Name="Id"/></Key><Property Name="Id" Type="Edm.Int32"/></EntityType>
      <EntityType Name="Loose"><Key><PropertyRef Name="Id"/></Key><Property Name="Id" Type="Edm.Int32"/></EntityType>"#;

    #[test]
    fn test_orphan_entity_return() {
        let raw = raw_schema(&format!(
            r#"{}
      <EntityContainer Name="C">
        <EntitySet Name="Held" EntityType="NS.Held"/>
        <FunctionImport Name="GetHeld" ReturnType="Collection(NS.Held)" EntitySet="Held"/>
        <FunctionImport Name="GetLoose" ReturnType="NS.Loose"/>
        <FunctionImport Name="Count" ReturnType="Edm.Int32"/>
      </EntityContainer>"#,
            TYPES
        ));

        let mut diagnostics = Vec::new();
        OrphanEntityReturnLint.check(&raw, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("GetLoose"));
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(
            diagnostics[0].cause,
            Some(SemanticModelError::UnresolvedEntitySet {
                function_import: "GetLoose".to_string(),
                entity_type: "NS.Loose".to_string(),
            })
        );
    }
}
