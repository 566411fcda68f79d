//! TypeScript namespace builder.

use vdmgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{Declaration, DeclarationKind, doc_fragments};

/// Builder for exported TypeScript namespaces merged with a class or
/// interface of the same name.
#[derive(Debug, Clone)]
pub struct Namespace {
    name: String,
    doc: Option<String>,
    statements: Vec<CodeFragment>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            statements: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a statement (any Renderable).
    pub fn statement<R: Renderable>(mut self, node: R) -> Self {
        self.statements.extend(node.to_fragments());
        self
    }

    pub fn statements<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.statements.extend(node.to_fragments());
        }
        self
    }

    /// Build the namespace as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Namespace {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = doc_fragments(&self.doc);
        fragments.push(CodeFragment::braced(
            format!("export namespace {} {{", self.name),
            self.statements.clone(),
            "}",
        ));
        fragments
    }
}

impl Declaration for Namespace {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Const, Fn, Param};

    #[test]
    fn test_namespace_with_function() {
        let ns = Namespace::new("ComplexMeal")
            .statement(
                Fn::new("build")
                    .param(Param::new("json", "{ [keys: string]: FieldType }"))
                    .returns("ComplexMeal")
                    .body_line("return createComplexType(json, {});"),
            )
            .build();
        assert_eq!(
            ns,
            "export namespace ComplexMeal {\n  export function build(json: { [keys: string]: FieldType }): ComplexMeal {\n    return createComplexType(json, {});\n  }\n}\n"
        );
    }

    #[test]
    fn test_namespace_with_consts() {
        let ns = Namespace::new("TestEntity")
            .statements([Const::new("A", "1"), Const::new("B", "2")])
            .build();
        assert_eq!(
            ns,
            "export namespace TestEntity {\n  export const A = 1;\n  export const B = 2;\n}\n"
        );
    }
}
