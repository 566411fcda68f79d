//! Lint reporting entity types that are not generated.

use vdmgen_edmx::RawSchema;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that notes entity types without an entity set.
pub struct UnusedEntityTypeLint;

impl Lint for UnusedEntityTypeLint {
    fn name(&self) -> &'static str {
        "unused-entity-type"
    }

    fn description(&self) -> &'static str {
        "Report entity types skipped for lack of an entity set"
    }

    fn check(&self, raw: &RawSchema, diagnostics: &mut Vec<Diagnostic>) {
        for entity_type in &raw.entity_types {
            let qualified = entity_type.qualified_name();
            if raw.entity_sets_of(&qualified).next().is_none() {
                diagnostics.push(
                    Diagnostic::info(
                        "validate",
                        format!(
                            "entity type '{}' has no entity set and is not generated",
                            entity_type.name
                        ),
                    )
                    .at(qualified),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::raw_schema;

    #[test]
    fn test_unused_entity_type() {
        let raw = raw_schema(
            r#"<EntityType Name="Used"><Key><PropertyRef Name="Id"/></Key><Property Name="Id" Type="Edm.Int32"/></EntityType>
      <EntityType Name="Unused"><Key><PropertyRef Name="Id"/></Key><Property Name="Id" Type="Edm.Int32"/></EntityType>
      <EntityContainer Name="C"><EntitySet Name="Used" EntityType="NS.Used"/></EntityContainer>"#,
        );

        let mut diagnostics = Vec::new();
        UnusedEntityTypeLint.check(&raw, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("NS.Unused"));
        assert!(!diagnostics[0].severity.is_error());
    }
}
