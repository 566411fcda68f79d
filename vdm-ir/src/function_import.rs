use serde::Serialize;

/// A function import of the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VdmFunctionImport {
    pub original_name: String,
    /// Resolved, keyword-safe name, e.g. `fContinue`.
    pub function_name: String,
    /// Name of the generated parameters interface.
    pub parameters_type_name: String,
    /// Upper case HTTP method.
    pub http_method: String,
    pub description: String,
    pub parameters: Vec<VdmParameter>,
    pub return_type: VdmFunctionImportReturnType,
}

impl VdmFunctionImport {
    pub fn is_get(&self) -> bool {
        self.http_method == "GET"
    }
}

/// A function import parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VdmParameter {
    pub original_name: String,
    pub parameter_name: String,
    pub edm_type: String,
    pub js_type: String,
    pub nullable: bool,
    pub description: String,
}

/// What a function import returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VdmFunctionImportReturnType {
    /// A primitive value.
    #[serde(rename_all = "camelCase")]
    EdmType {
        edm_type: String,
        js_type: String,
        /// Expression turning a wire value into `js_type`.
        builder_function: String,
        is_multi: bool,
    },
    /// One or more entities.
    #[serde(rename_all = "camelCase")]
    Entity {
        entity_class_name: String,
        is_multi: bool,
    },
    /// One or more complex type values.
    #[serde(rename_all = "camelCase")]
    ComplexType {
        type_name: String,
        factory_name: String,
        /// e.g. `TestComplexType.build`
        builder_function: String,
        is_multi: bool,
    },
    /// No return value.
    Void,
}

impl VdmFunctionImportReturnType {
    pub fn is_multi(&self) -> bool {
        match self {
            Self::EdmType { is_multi, .. }
            | Self::Entity { is_multi, .. }
            | Self::ComplexType { is_multi, .. } => *is_multi,
            Self::Void => false,
        }
    }

    /// Type name as seen by callers, without the array suffix.
    pub fn type_name(&self) -> &str {
        match self {
            Self::EdmType { js_type, .. } => js_type,
            Self::Entity {
                entity_class_name, ..
            } => entity_class_name,
            Self::ComplexType { type_name, .. } => type_name,
            Self::Void => "undefined",
        }
    }
}
