//! TypeScript export builder.

use vdmgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// Builder for TypeScript re-exports.
#[derive(Debug, Clone)]
pub struct Export {
    from: String,
    named: Vec<String>,
}

impl Export {
    /// Re-export everything from `module`.
    pub fn from(module: impl Into<String>) -> Self {
        Self {
            from: module.into(),
            named: Vec::new(),
        }
    }

    /// Re-export a named item only.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    fn statement(&self) -> String {
        if self.named.is_empty() {
            format!("export * from '{}';", self.from)
        } else {
            format!("export {{ {} }} from '{}';", self.named.join(", "), self.from)
        }
    }

    /// Build the export as a string.
    pub fn build(&self) -> String {
        CodeBuilder::typescript().line(&self.statement()).build()
    }
}

impl Renderable for Export {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.statement())]
    }
}
