//! CodeFile abstraction for structured TypeScript file generation.
//!
//! A [`CodeFile`] collects the imports every declaration asks for in one
//! [`ImportCollector`], so a module specifier is only imported once per file
//! no matter how many declarations need it. [`EmittedFile`] pairs a rendered
//! file with its path below the output directory.

use std::path::{Path, PathBuf};

use vdmgen_codegen::{
    builder::{CodeBuilder, CodeFragment, Indent, Renderable},
    generation::ImportCollector,
};
use vdmgen_core::{FileRules, GeneratedFile, Overwrite};

use crate::ast::{Declaration, DeclarationKind, Export, Import};

/// Comment placed at the top of every generated TypeScript file.
pub const GENERATED_HEADER: &str = "/*!\n * This is a generated file powered by vdmgen.\n */\n";

/// A structured representation of a TypeScript file.
///
/// Organizes code into three sections: imports, body, and exports.
/// Each section is rendered in order with appropriate blank lines.
///
/// # Example
///
/// ```
/// use vdmgen_codegen_typescript::{CodeFile, RawCode};
///
/// let code = CodeFile::new()
///     .import("@sap-cloud-sdk/core", "StringField")
///     .import("@sap-cloud-sdk/core", "Entity")
///     .add(RawCode::new("const x = 1;"))
///     .render();
///
/// assert_eq!(
///     code,
///     "import { Entity, StringField } from '@sap-cloud-sdk/core';\n\nconst x = 1;\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeFile {
    imports: ImportCollector,
    body: Vec<(DeclarationKind, Vec<CodeFragment>)>,
    exports: Vec<Export>,
}

impl CodeFile {
    /// Create a new empty CodeFile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a named value.
    pub fn import(mut self, module: &str, name: &str) -> Self {
        self.imports.add(module, name);
        self
    }

    /// Import a name as a type only.
    pub fn import_type(mut self, module: &str, name: &str) -> Self {
        self.imports.add_type(module, name);
        self
    }

    /// Merge the imports of a collector into this file.
    pub fn imports(mut self, imports: &ImportCollector) -> Self {
        self.imports.merge(imports);
        self
    }

    /// Add a top-level declaration.
    #[allow(clippy::should_implement_trait)]
    pub fn add<D: Declaration>(mut self, declaration: D) -> Self {
        self.body.push((declaration.kind(), declaration.to_fragments()));
        self
    }

    /// Add multiple top-level declarations.
    pub fn add_all<D: Declaration>(mut self, declarations: impl IntoIterator<Item = D>) -> Self {
        for declaration in declarations {
            self = self.add(declaration);
        }
        self
    }

    /// Add an export statement.
    pub fn export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    /// Add exports from an iterator.
    pub fn exports(mut self, exports: impl IntoIterator<Item = Export>) -> Self {
        self.exports.extend(exports);
        self
    }

    /// The merged imports of this file.
    pub fn import_collector(&self) -> &ImportCollector {
        &self.imports
    }

    /// Number of import declarations the file renders.
    pub fn import_count(&self) -> usize {
        self.imports.groups().len()
    }

    /// Number of top-level declarations of `kind`.
    pub fn count(&self, kind: DeclarationKind) -> usize {
        self.body.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Render the file with TypeScript indentation (2 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::TYPESCRIPT)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);

        let imports: Vec<Import> = self.imports.groups().iter().map(Import::from_group).collect();
        for import in &imports {
            builder.emit(import);
        }

        if !imports.is_empty() && (!self.body.is_empty() || !self.exports.is_empty()) {
            builder.push_blank();
        }

        for (i, (_, fragments)) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        if !self.body.is_empty() && !self.exports.is_empty() {
            builder.push_blank();
        }

        for export in &self.exports {
            builder.emit(export);
        }

        builder.build()
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.body.is_empty() && self.exports.is_empty()
    }
}

/// A raw code fragment that implements Renderable.
///
/// Useful for adding raw code strings to CodeFile body.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    /// Create a new raw code fragment.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Create a raw code fragment from multiple lines.
    pub fn lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(
            lines
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.0
            .lines()
            .map(|line| CodeFragment::Line(line.to_string()))
            .collect()
    }
}

impl Declaration for RawCode {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Statement
    }
}

/// What an [`EmittedFile`] holds.
#[derive(Debug, Clone)]
pub enum EmittedContent {
    /// TypeScript source, rendered with the generated-file header.
    Source(CodeFile),
    /// Any other text, written as is.
    Text(String),
}

/// One output file of a service, addressed relative to the output directory.
///
/// Emitters only build these; writing them is left to [`GeneratedFile`].
#[derive(Debug, Clone)]
pub struct EmittedFile {
    relative_path: String,
    content: EmittedContent,
}

impl EmittedFile {
    pub fn source(relative_path: impl Into<String>, code: CodeFile) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: EmittedContent::Source(code),
        }
    }

    pub fn text(relative_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: EmittedContent::Text(text.into()),
        }
    }

    /// Path below the output directory, `/`-separated.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn content(&self) -> &EmittedContent {
        &self.content
    }

    /// The structured source, if this is a TypeScript file.
    pub fn code(&self) -> Option<&CodeFile> {
        match &self.content {
            EmittedContent::Source(code) => Some(code),
            EmittedContent::Text(_) => None,
        }
    }

    /// The exact text written to disk, header included.
    pub fn rendered(&self) -> String {
        self.to_file(Path::new("")).rendered()
    }
}

impl GeneratedFile for EmittedFile {
    fn path(&self, base: &Path) -> PathBuf {
        self.relative_path
            .split('/')
            .fold(base.to_path_buf(), |path, segment| path.join(segment))
    }

    fn rules(&self) -> FileRules {
        let header = match self.content {
            EmittedContent::Source(_) => Some(GENERATED_HEADER),
            EmittedContent::Text(_) => None,
        };
        FileRules {
            overwrite: Overwrite::IfMissing,
            header,
        }
    }

    fn render(&self) -> String {
        match &self.content {
            EmittedContent::Source(code) => code.render(),
            EmittedContent::Text(text) => text.clone(),
        }
    }
}
