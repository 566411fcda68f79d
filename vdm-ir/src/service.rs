use serde::Serialize;

use crate::{VdmComplexType, VdmEntity, VdmFunctionImport};

/// Everything generated for one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VdmServiceMetadata {
    /// Namespace of the schema holding the entity container.
    pub namespace: String,
    /// Metadata file name without extension, e.g. `API_TEST_SRV`.
    pub original_file_name: String,
    /// Output directory, e.g. `test-service`.
    pub directory_name: String,
    pub npm_package_name: String,
    pub service_path: String,
    /// e.g. `TestService`
    pub class_name: String,
    /// e.g. `test-service`
    pub speaking_module_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    pub entities: Vec<VdmEntity>,
    /// Nested complex types come before the complex types using them.
    pub complex_types: Vec<VdmComplexType>,
    pub function_imports: Vec<VdmFunctionImport>,
}

impl VdmServiceMetadata {
    pub fn entity(&self, class_name: &str) -> Option<&VdmEntity> {
        self.entities.iter().find(|e| e.class_name == class_name)
    }

    pub fn entity_by_set(&self, entity_set_name: &str) -> Option<&VdmEntity> {
        self.entities
            .iter()
            .find(|e| e.entity_set_name == entity_set_name)
    }

    /// Look up a complex type by qualified or declared name.
    pub fn complex_type(&self, name: &str) -> Option<&VdmComplexType> {
        self.complex_types
            .iter()
            .find(|c| c.qualified_name == name || c.original_name == name)
    }

    pub fn function_import(&self, original_name: &str) -> Option<&VdmFunctionImport> {
        self.function_imports
            .iter()
            .find(|f| f.original_name == original_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complex(name: &str) -> VdmComplexType {
        VdmComplexType {
            original_name: name.to_string(),
            qualified_name: format!("NS.{}", name),
            type_name: name.to_string(),
            factory_name: format!("create{}", name),
            field_type: format!("{}Field", name),
            description: String::new(),
            properties: Vec::new(),
        }
    }

    fn service(complex_types: Vec<VdmComplexType>) -> VdmServiceMetadata {
        VdmServiceMetadata {
            namespace: "NS".to_string(),
            original_file_name: "API_NS_SRV".to_string(),
            directory_name: "ns-service".to_string(),
            npm_package_name: "ns-service".to_string(),
            service_path: "/sap/opu/odata/sap/API_NS_SRV".to_string(),
            class_name: "NsService".to_string(),
            speaking_module_name: "ns-service".to_string(),
            documentation_url: None,
            entities: Vec::new(),
            complex_types,
            function_imports: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_helpers() {
        let service = service(vec![complex("Money")]);
        assert!(service.complex_type("NS.Money").is_some());
        assert!(service.complex_type("Money").is_some());
        assert!(service.complex_type("NS.Other").is_none());
        assert!(service.entity("Money").is_none());
    }
}
