//! TypeScript const declaration builder.

use vdmgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{Declaration, DeclarationKind, doc_fragments};

/// Builder for TypeScript const declarations.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    value: String,
    ty: Option<String>,
    doc: Option<String>,
    exported: bool,
}

impl Const {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ty: None,
            doc: None,
            exported: true,
        }
    }

    /// Add a type annotation.
    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Make this const private (not exported).
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Build the const declaration as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let export = if self.exported { "export " } else { "" };
        let type_annotation = match &self.ty {
            Some(ty) => format!(": {}", ty),
            None => String::new(),
        };
        let mut fragments = doc_fragments(&self.doc);

        // A multiline value keeps the relative indentation of its lines
        let mut lines: Vec<String> = self.value.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let last = lines.len() - 1;
        for (i, line) in lines.into_iter().enumerate() {
            let line = if i == 0 {
                format!("{}const {}{} = {}", export, self.name, type_annotation, line)
            } else {
                line
            };
            let line = if i == last { format!("{};", line) } else { line };
            fragments.push(CodeFragment::Line(line));
        }
        fragments
    }
}

impl Declaration for Const {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Const
    }
}
