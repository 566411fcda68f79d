//! TypeScript import builder.

use vdmgen_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    generation::ImportGroup,
};

/// Builder for TypeScript import statements.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    named: Vec<String>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            named: Vec::new(),
            type_only: false,
        }
    }

    /// One merged declaration of an import collector.
    pub fn from_group(group: &ImportGroup<'_>) -> Self {
        let import = group
            .names
            .iter()
            .fold(Self::new(group.module), |import, name| import.named(*name));
        if group.type_only {
            import.type_only()
        } else {
            import
        }
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    fn statement(&self) -> String {
        let type_kw = if self.type_only { "type " } else { "" };
        if self.named.is_empty() {
            format!("import '{}';", self.from)
        } else {
            format!(
                "import {}{{ {} }} from '{}';",
                type_kw,
                self.named.join(", "),
                self.from
            )
        }
    }

    /// Build the import as a string.
    pub fn build(&self) -> String {
        CodeBuilder::typescript().line(&self.statement()).build()
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.statement())]
    }
}
