//! TypeScript interface builder.

use vdmgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{Declaration, DeclarationKind, doc_fragments};

/// A field in a TypeScript interface.
#[derive(Debug, Clone)]
pub struct InterfaceField {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub optional: bool,
}

impl InterfaceField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            optional: false,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark optional when `optional` holds.
    pub fn optional_if(self, optional: bool) -> Self {
        if optional { self.optional() } else { self }
    }

    fn to_fragments(&self) -> Vec<CodeFragment> {
        let optional = if self.optional { "?" } else { "" };
        let mut fragments = doc_fragments(&self.doc);
        fragments.push(CodeFragment::Line(format!(
            "{}{}: {};",
            self.name, optional, self.ty
        )));
        fragments
    }
}

/// Builder for TypeScript interfaces.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    doc: Option<String>,
    fields: Vec<InterfaceField>,
    exported: bool,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
            exported: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push(InterfaceField::new(name, ty));
        self
    }

    /// Add an optional field.
    pub fn optional_field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push(InterfaceField::new(name, ty).optional());
        self
    }

    /// Add a field with full configuration.
    pub fn field_with(mut self, field: InterfaceField) -> Self {
        self.fields.push(field);
        self
    }

    /// Make this interface private (not exported).
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Build the interface as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let export = if self.exported { "export " } else { "" };
        let mut fragments = doc_fragments(&self.doc);

        if self.fields.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "{}interface {} {{}}",
                export, self.name
            )));
        } else {
            fragments.push(CodeFragment::braced(
                format!("{}interface {} {{", export, self.name),
                self.fields.iter().flat_map(InterfaceField::to_fragments).collect(),
                "}",
            ));
        }
        fragments
    }
}

impl Declaration for Interface {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_interface() {
        let i = Interface::new("ContinueParameters").build();
        assert_eq!(i, "export interface ContinueParameters {}\n");
    }

    #[test]
    fn test_interface_with_fields() {
        let i = Interface::new("ComplexMeal")
            .field("complexity", "string")
            .optional_field("amount", "number")
            .build();
        assert_eq!(
            i,
            "export interface ComplexMeal {\n  complexity: string;\n  amount?: number;\n}\n"
        );
    }

    #[test]
    fn test_documented_fields() {
        let i = Interface::new("TestEntityType")
            .doc("Type of TestEntity.")
            .field_with(InterfaceField::new("keyPropertyGuid", "string").doc("Key Guid."))
            .build();
        assert!(i.starts_with("/**\n * Type of TestEntity.\n */\nexport interface TestEntityType {"));
        assert!(i.contains("  /**\n   * Key Guid.\n   */\n  keyPropertyGuid: string;"));
    }

    #[test]
    fn test_private_interface() {
        let i = Interface::new("Internal")
            .private()
            .field("x", "number")
            .build();
        assert!(!i.contains("export"));
        assert!(i.contains("interface Internal {"));
    }

    #[test]
    fn test_optional_if() {
        let i = Interface::new("T")
            .field_with(InterfaceField::new("a", "string").optional_if(true))
            .field_with(InterfaceField::new("b", "string").optional_if(false))
            .build();
        assert!(i.contains("a?: string;"));
        assert!(i.contains("b: string;"));
    }
}
