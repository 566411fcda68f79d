//! TypeScript-specific naming conventions.

use vdmgen_codegen::{language::NamingConvention, names::NameKind};
use vdmgen_core::{to_camel_case, to_kebab_case, to_pascal_case, to_upper_snake_case};

fn escape_ts_reserved(name: &str, kind: NameKind) -> String {
    match kind {
        NameKind::Function | NameKind::Factory => format!("f{}", to_pascal_case(name)),
        NameKind::Parameter => format!("p{}", to_pascal_case(name)),
        _ => format!("_{}", name),
    }
}

/// TypeScript naming conventions.
pub const TS_NAMING: NamingConvention = NamingConvention {
    // Classes, interfaces and namespaces use PascalCase
    type_name: to_pascal_case,
    // Fields, functions and parameters use camelCase
    member_name: to_camel_case,
    // Static field descriptors use UPPER_SNAKE_CASE
    constant_name: to_upper_snake_case,
    // Directories and packages use kebab-case
    module_name: to_kebab_case,
    reserved_words: &[
        // JavaScript reserved words
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        // Strict mode reserved words
        "implements",
        "interface",
        "let",
        "package",
        "private",
        "protected",
        "public",
        "static",
        "yield",
        // Module code
        "await",
    ],
    escape_reserved: escape_ts_reserved,
    runtime_type_names: &[
        // @sap-cloud-sdk/core
        "AllFields",
        "BigNumberField",
        "BooleanField",
        "ComplexTypeBigNumberPropertyField",
        "ComplexTypeBooleanPropertyField",
        "ComplexTypeDatePropertyField",
        "ComplexTypeField",
        "ComplexTypeNumberPropertyField",
        "ComplexTypeStringPropertyField",
        "ComplexTypeTimePropertyField",
        "CreateRequestBuilder",
        "CustomField",
        "DateField",
        "DeleteRequestBuilder",
        "Entity",
        "EntityBuilderType",
        "FieldType",
        "FunctionImportParameter",
        "FunctionImportRequestBuilder",
        "GetAllRequestBuilder",
        "GetByKeyRequestBuilder",
        "Link",
        "NumberField",
        "OneToOneLink",
        "RequestBuilder",
        "Selectable",
        "StringField",
        "Time",
        "TimeField",
        "UpdateRequestBuilder",
        // bignumber.js and moment
        "BigNumber",
        "Moment",
    ],
};
