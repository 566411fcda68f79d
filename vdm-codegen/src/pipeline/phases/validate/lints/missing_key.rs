//! Lint for entity types without keys.

use vdmgen_edmx::RawSchema;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on generated entity types declaring no key.
///
/// Entity types without an entity set are not generated and therefore not
/// checked.
pub struct MissingKeyLint;

impl Lint for MissingKeyLint {
    fn name(&self) -> &'static str {
        "missing-key"
    }

    fn description(&self) -> &'static str {
        "Require a key on every entity type with an entity set"
    }

    fn check(&self, raw: &RawSchema, diagnostics: &mut Vec<Diagnostic>) {
        for entity_type in &raw.entity_types {
            if !entity_type.keys.is_empty() {
                continue;
            }
            let qualified = entity_type.qualified_name();
            if raw.entity_sets_of(&qualified).next().is_some() {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("entity type '{}' has no key", entity_type.name),
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
    fn test_missing_key() {
        let raw = raw_schema(
            r#"<EntityType Name="Keyless"><Property Name="X" Type="Edm.String"/></EntityType>
      <EntityType Name="Orphan"><Property Name="X" Type="Edm.String"/></EntityType>
      <EntityContainer Name="C">
        <EntitySet Name="Keyless" EntityType="NS.Keyless"/>
      </EntityContainer>"#,
        );

        let mut diagnostics = Vec::new();
        MissingKeyLint.check(&raw, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "entity type 'Keyless' has no key");
        assert_eq!(diagnostics[0].location.as_deref(), Some("NS.Keyless"));
    }
}
