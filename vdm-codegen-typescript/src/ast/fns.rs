//! TypeScript function builder.

use vdmgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{Declaration, DeclarationKind, doc_fragments};

/// A parameter in a TypeScript function.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub optional: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Render a parameter list without parentheses.
pub(crate) fn format_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| {
            let optional = if p.optional { "?" } else { "" };
            format!("{}{}: {}", p.name, optional, p.ty)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builder for TypeScript functions.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    exported: bool,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<String>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            exported: true,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    /// Add raw body content (can contain multiple lines).
    pub fn body(mut self, content: impl Into<String>) -> Self {
        for line in content.into().lines() {
            self.body.push(line.to_string());
        }
        self
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }

    fn format_signature(&self) -> String {
        let export = if self.exported { "export " } else { "" };
        let params = format_params(&self.params);

        match &self.return_type {
            Some(ret) => format!("{}function {}({}): {} {{", export, self.name, params, ret),
            None => format!("{}function {}({}) {{", export, self.name, params),
        }
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = doc_fragments(&self.doc);

        // Empty lines stay empty instead of carrying indentation
        let body = self
            .body
            .iter()
            .map(|line| {
                if line.is_empty() {
                    CodeFragment::Blank
                } else {
                    CodeFragment::Line(line.clone())
                }
            })
            .collect();

        fragments.push(CodeFragment::braced(self.format_signature(), body, "}"));
        fragments
    }
}

impl Declaration for Fn {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Function
    }
}
