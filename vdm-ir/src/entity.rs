use serde::Serialize;

/// An entity type reachable through an entity set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VdmEntity {
    /// Entity set the class is generated for, e.g. `A_TestEntity`.
    pub entity_set_name: String,
    /// Entity type name as declared, e.g. `A_TestEntityType`.
    pub entity_type_name: String,
    /// Resolved class name, unique within the service.
    pub class_name: String,
    pub description: String,
    /// Structural properties in declaration order.
    pub properties: Vec<VdmProperty>,
    /// Key properties in declaration order (a subset of `properties`).
    pub keys: Vec<VdmProperty>,
    pub navigation_properties: Vec<VdmNavigationProperty>,
}

impl VdmEntity {
    /// Look up a property by its name in the metadata.
    pub fn property(&self, original_name: &str) -> Option<&VdmProperty> {
        self.properties
            .iter()
            .find(|p| p.original_name == original_name)
    }

    /// Whether any property is typed with a complex type.
    pub fn has_complex_properties(&self) -> bool {
        self.properties.iter().any(|p| p.is_complex)
    }
}

/// A structural property of an entity or complex type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VdmProperty {
    /// Wire name, e.g. `KeyPropertyGuid`.
    pub original_name: String,
    /// e.g. `keyPropertyGuid`
    pub instance_property_name: String,
    /// e.g. `KEY_PROPERTY_GUID`
    pub static_property_name: String,
    /// Name used when the property is passed as a parameter.
    pub property_name_as_param: String,
    /// `Edm.*` name, or the qualified complex type name.
    pub edm_type: String,
    /// Target language type, e.g. `string`, `BigNumber`, `TestComplexType`.
    pub js_type: String,
    /// Field descriptor class, e.g. `StringField`, `TestComplexTypeField`.
    pub field_type: String,
    pub nullable: bool,
    pub is_complex: bool,
    pub is_key: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
}

/// How many entities a navigation property leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VdmMultiplicity {
    One,
    Many,
}

impl VdmMultiplicity {
    pub fn is_many(self) -> bool {
        matches!(self, Self::Many)
    }
}

/// A navigation property. Targets may point back at the owner, directly or
/// through other entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VdmNavigationProperty {
    pub original_name: String,
    pub instance_property_name: String,
    pub static_property_name: String,
    pub property_name_as_param: String,
    pub multiplicity: VdmMultiplicity,
    /// Class name of the target entity.
    pub to_entity_class_name: String,
    /// Entity set of the target entity.
    pub to_entity_set_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VdmMultiplicity::Many).unwrap(),
            "\"many\""
        );
        assert!(VdmMultiplicity::Many.is_many());
        assert!(!VdmMultiplicity::One.is_many());
    }
}
