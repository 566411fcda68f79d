//! Test utilities for code generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::{Path, PathBuf};

use eyre::Result;
use vdmgen_core::{to_camel_case, to_kebab_case, to_pascal_case, to_upper_snake_case};
use vdmgen_edmx::{RawSchema, SwaggerDocument, parse_str};

use crate::{
    edm::EdmType,
    language::{EdmTypeMapper, NamingConvention},
    names::NameKind,
    pipeline::ServiceInput,
};

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
];

fn escape(name: &str, kind: NameKind) -> String {
    match kind {
        NameKind::Function | NameKind::Factory => format!("f{}", to_pascal_case(name)),
        NameKind::Parameter => format!("p{}", to_pascal_case(name)),
        _ => format!("_{}", name),
    }
}

/// A TypeScript-like naming convention.
pub fn test_naming() -> NamingConvention {
    NamingConvention {
        type_name: to_pascal_case,
        member_name: to_camel_case,
        constant_name: to_upper_snake_case,
        module_name: to_kebab_case,
        reserved_words: RESERVED,
        escape_reserved: escape,
        runtime_type_names: &["Entity", "Link", "RequestBuilder"],
    }
}

/// Maps every primitive to its bare name (`Edm.Int64` -> `Int64`).
#[derive(Debug, Default, Clone, Copy)]
pub struct StubMapper;

impl EdmTypeMapper for StubMapper {
    fn language(&self) -> &'static str {
        "stub"
    }

    fn target_type(&self, edm: EdmType) -> &'static str {
        let name = edm.as_str();
        name.strip_prefix("Edm.").unwrap_or(name)
    }

    fn field_type(&self, edm: EdmType) -> &'static str {
        match edm {
            EdmType::Binary => "BinaryField",
            EdmType::Boolean => "BooleanField",
            EdmType::Byte => "ByteField",
            EdmType::DateTime => "DateTimeField",
            EdmType::DateTimeOffset => "DateTimeOffsetField",
            EdmType::Decimal => "DecimalField",
            EdmType::Double => "DoubleField",
            EdmType::Guid => "GuidField",
            EdmType::Int16 => "Int16Field",
            EdmType::Int32 => "Int32Field",
            EdmType::Int64 => "Int64Field",
            EdmType::SByte => "SByteField",
            EdmType::Single => "SingleField",
            EdmType::String => "StringField",
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

/// Wrap schema content in an EDMX document with the usual namespaces.
pub fn edmx(namespace: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<edmx:Edmx Version="1.0" xmlns:edmx="http://schemas.microsoft.com/ado/2007/06/edmx" xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata" xmlns:sap="http://www.sap.com/Protocols/SAPData">
  <edmx:DataServices m:DataServiceVersion="2.0">
    <Schema Namespace="{}" xmlns="http://schemas.microsoft.com/ado/2008/09/edm">
      {}
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#,
        namespace, body
    )
}

/// Parse schema content declared in namespace `NS`.
///
/// # Panics
///
/// Panics if the content does not parse.
pub fn raw_schema(body: &str) -> RawSchema {
    parse_str(&edmx("NS", body), "NS.edmx").expect("test schema should parse")
}

/// `test-resources/service-specs` at the workspace root.
pub fn service_specs_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("test-resources")
        .join("service-specs")
}

/// Load a fixture service, with its swagger document when there is one.
pub fn load_service_spec(name: &str) -> Result<ServiceInput> {
    let dir = service_specs_dir().join(name);
    let file_name = format!("{}.edmx", name);
    let text = std::fs::read_to_string(dir.join(&file_name))?;

    let swagger_path = dir.join(format!("{}.json", name));
    let swagger = if swagger_path.exists() {
        Some(SwaggerDocument::open(&swagger_path)?)
    } else {
        None
    };

    Ok(ServiceInput::new(name, file_name, text).with_swagger(swagger))
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate code into a temporary directory and return it.
///
/// The directory will be cleaned up when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}
