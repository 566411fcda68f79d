//! TypeScript type mapper implementation.

use vdmgen_codegen::{edm::EdmType, language::EdmTypeMapper};

/// Module providing the runtime field descriptors and conversions.
pub const CORE_MODULE: &str = "@sap-cloud-sdk/core";

/// Maps EDM primitives onto the types of the `@sap-cloud-sdk/core` runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptTypeMapper;

impl TypeScriptTypeMapper {
    /// Module a target type has to be imported from, if it is not built in.
    ///
    /// Applies to complete target types only, so `BigNumber[]` has no module.
    pub fn type_module(target_type: &str) -> Option<&'static str> {
        match target_type {
            "BigNumber" => Some("bignumber.js"),
            "Moment" => Some("moment"),
            "Time" => Some(CORE_MODULE),
            _ => None,
        }
    }

    /// Field class used inside complex type fields, e.g.
    /// `StringField` -> `ComplexTypeStringPropertyField`.
    pub fn complex_property_field_type(field_type: &str) -> String {
        let base = field_type.strip_suffix("Field").unwrap_or(field_type);
        format!("ComplexType{}PropertyField", base)
    }
}

impl EdmTypeMapper for TypeScriptTypeMapper {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn target_type(&self, edm: EdmType) -> &'static str {
        match edm {
            EdmType::String | EdmType::Guid | EdmType::Binary => "string",
            EdmType::Boolean => "boolean",
            EdmType::Byte
            | EdmType::SByte
            | EdmType::Int16
            | EdmType::Int32
            | EdmType::Single
            | EdmType::Double => "number",
            EdmType::Int64 | EdmType::Decimal => "BigNumber",
            EdmType::DateTime | EdmType::DateTimeOffset => "Moment",
            EdmType::Time => "Time",
        }
    }

    fn field_type(&self, edm: EdmType) -> &'static str {
        match edm {
            EdmType::String | EdmType::Guid | EdmType::Binary => "StringField",
            EdmType::Boolean => "BooleanField",
            EdmType::Byte
            | EdmType::SByte
            | EdmType::Int16
            | EdmType::Int32
            | EdmType::Single
            | EdmType::Double => "NumberField",
            EdmType::Int64 | EdmType::Decimal => "BigNumberField",
            EdmType::DateTime | EdmType::DateTimeOffset => "DateField",
            EdmType::Time => "TimeField",
        }
    }

    fn to_target_expr(&self, edm: EdmType, value: &str) -> String {
        format!("edmToTs({}, '{}')", value, edm)
    }

    fn to_wire_expr(&self, edm: EdmType, value: &str) -> String {
        format!("tsToEdm({}, '{}')", value, edm)
    }

    fn builder_function(&self, edm: EdmType) -> String {
        format!("(val) => {}", self.to_target_expr(edm, "val"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typescript_target_types() {
        let mapper = TypeScriptTypeMapper;

        assert_eq!(mapper.target_type(EdmType::Guid), "string");
        assert_eq!(mapper.target_type(EdmType::Int16), "number");
        assert_eq!(mapper.target_type(EdmType::Int64), "BigNumber");
        assert_eq!(mapper.target_type(EdmType::Decimal), "BigNumber");
        assert_eq!(mapper.target_type(EdmType::DateTimeOffset), "Moment");
        assert_eq!(mapper.target_type(EdmType::Time), "Time");
    }

    #[test]
    fn test_every_primitive_is_mapped() {
        let mapper = TypeScriptTypeMapper;
        for edm in EdmType::ALL {
            let mapping = mapper.map_primitive(edm.as_str()).unwrap();
            assert!(mapping.field_type.ends_with("Field"));
            assert!(!mapping.target_type.is_empty());
        }
    }

    #[test]
    fn test_conversion_expressions() {
        let mapper = TypeScriptTypeMapper;

        assert_eq!(
            mapper.to_target_expr(EdmType::Int16, "amount"),
            "edmToTs(amount, 'Edm.Int16')"
        );
        assert_eq!(
            mapper.to_wire_expr(EdmType::Int16, "amount"),
            "tsToEdm(amount, 'Edm.Int16')"
        );
        assert_eq!(
            mapper.builder_function(EdmType::Boolean),
            "(val) => edmToTs(val, 'Edm.Boolean')"
        );
    }

    #[test]
    fn test_unknown_primitive_fails() {
        let err = TypeScriptTypeMapper.map_primitive("Edm.Stream").unwrap_err();
        assert_eq!(err.to_string(), "unknown EDM primitive type 'Edm.Stream'");
    }

    #[test]
    fn test_type_modules() {
        assert_eq!(TypeScriptTypeMapper::type_module("BigNumber"), Some("bignumber.js"));
        assert_eq!(TypeScriptTypeMapper::type_module("Moment"), Some("moment"));
        assert_eq!(TypeScriptTypeMapper::type_module("Time"), Some(CORE_MODULE));
        assert_eq!(TypeScriptTypeMapper::type_module("string"), None);
    }

    #[test]
    fn test_complex_property_field_type() {
        assert_eq!(
            TypeScriptTypeMapper::complex_property_field_type("BigNumberField"),
            "ComplexTypeBigNumberPropertyField"
        );
    }
}
