//! Language-agnostic code generation traits.

use std::path::Path;

use eyre::Result;

use crate::edm::{EdmType, UnknownEdmTypeError};

/// Trait for language-specific code generators.
///
/// A generator is built for one service model and knows every file it
/// produces before anything touches the disk.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "typescript")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "ts")
    fn file_extension(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Vec<PreviewFile>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were written, relative to the output directory
    pub written: Vec<String>,
    /// Existing files that were left alone
    pub skipped: Vec<String>,
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// How one primitive is represented in the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveMapping {
    pub edm_type: EdmType,
    /// e.g. `BigNumber`
    pub target_type: String,
    /// Field descriptor class, e.g. `BigNumberField`
    pub field_type: String,
    /// Function expression converting a wire value, e.g. `(val) => edmToTs(val, 'Edm.Int64')`
    pub builder_function: String,
}

/// Trait for mapping EDM primitives to target-language types and
/// (de)serialization expressions.
///
/// Implementations are stateless, so one mapper is shared by every service of
/// a run.
pub trait EdmTypeMapper: Send + Sync {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a primitive to a target type name.
    fn target_type(&self, edm: EdmType) -> &'static str;

    /// Field descriptor class used for properties of this primitive.
    fn field_type(&self, edm: EdmType) -> &'static str;

    /// Expression converting the wire value `value` to the target type.
    fn to_target_expr(&self, edm: EdmType, value: &str) -> String;

    /// Expression converting the target value `value` back to wire format.
    fn to_wire_expr(&self, edm: EdmType, value: &str) -> String;

    /// A function expression wrapping [`EdmTypeMapper::to_target_expr`].
    fn builder_function(&self, edm: EdmType) -> String;

    /// Field descriptor class for properties of a complex type.
    fn complex_field_type(&self, type_name: &str) -> String {
        format!("{}Field", type_name)
    }

    /// Builder reference for values of a complex type.
    fn complex_builder_function(&self, type_name: &str) -> String {
        format!("{}.build", type_name)
    }

    /// Map an `Edm.*` name, failing for anything outside the primitive set.
    fn map_primitive(&self, edm_type_name: &str) -> Result<PrimitiveMapping, UnknownEdmTypeError> {
        let edm: EdmType = edm_type_name.parse()?;
        Ok(PrimitiveMapping {
            edm_type: edm,
            target_type: self.target_type(edm).to_string(),
            field_type: self.field_type(edm).to_string(),
            builder_function: self.builder_function(edm),
        })
    }
}
