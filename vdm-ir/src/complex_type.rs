use serde::Serialize;

use crate::VdmProperty;

/// A complex type. Properties may themselves be complex; the graph they form
/// is acyclic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VdmComplexType {
    /// Name as declared, e.g. `A_TestComplexType`.
    pub original_name: String,
    /// Qualified name, matching `VdmProperty::edm_type` of properties using it.
    pub qualified_name: String,
    /// e.g. `TestComplexType`
    pub type_name: String,
    /// e.g. `createTestComplexType`
    pub factory_name: String,
    /// e.g. `TestComplexTypeField`
    pub field_type: String,
    pub description: String,
    pub properties: Vec<VdmProperty>,
}
