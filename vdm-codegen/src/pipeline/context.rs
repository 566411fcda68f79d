//! Compilation context passed through pipeline phases.

use eyre::{Result, eyre};
use vdmgen_edmx::{RawSchema, SchemaSource, ServiceMapping, SwaggerDocument};
use vdmgen_ir::VdmServiceMetadata;

use super::diagnostic::{Diagnostic, Severity};

/// One metadata document, owned.
#[derive(Debug, Clone)]
pub struct ServiceDocument {
    /// Display name, usually the file name.
    pub name: String,
    pub text: String,
}

/// Everything read from disk for one service.
#[derive(Debug, Clone)]
pub struct ServiceInput {
    /// Metadata file name without extension, e.g. `API_TEST_SRV`.
    pub original_file_name: String,
    pub documents: Vec<ServiceDocument>,
    pub mapping: Option<ServiceMapping>,
    pub swagger: Option<SwaggerDocument>,
}

impl ServiceInput {
    /// A service described by a single document.
    pub fn new(
        original_file_name: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            original_file_name: original_file_name.into(),
            documents: vec![ServiceDocument {
                name: name.into(),
                text: text.into(),
            }],
            mapping: None,
            swagger: None,
        }
    }

    pub fn with_mapping(mut self, mapping: Option<ServiceMapping>) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_swagger(mut self, swagger: Option<SwaggerDocument>) -> Self {
        self.swagger = swagger;
        self
    }

    pub fn sources(&self) -> Vec<SchemaSource<'_>> {
        self.documents
            .iter()
            .map(|doc| SchemaSource::new(&doc.name, &doc.text))
            .collect()
    }
}

/// Context passed through all pipeline phases.
///
/// Carries one service from its documents to its model, accumulating
/// diagnostics along the way.
#[derive(Debug)]
pub struct CompilationContext {
    pub input: ServiceInput,
    /// Populated by the parse phase.
    pub raw: Option<RawSchema>,
    /// Populated by the build phase.
    pub service: Option<VdmServiceMetadata>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(input: ServiceInput) -> Self {
        Self {
            input,
            raw: None,
            service: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn original_file_name(&self) -> &str {
        &self.input.original_file_name
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// The parsed schema, failing if the parse phase has not run.
    pub fn raw(&self) -> Result<&RawSchema> {
        self.raw
            .as_ref()
            .ok_or_else(|| eyre!("raw schema not set, did the parse phase run?"))
    }

    /// Take the built model out of the context.
    pub fn take_service(&mut self) -> Result<VdmServiceMetadata> {
        self.service
            .take()
            .ok_or_else(|| eyre!("service model not set, did the build phase run?"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CompilationContext {
        CompilationContext::new(ServiceInput::new("API_X_SRV", "API_X_SRV.edmx", ""))
    }

    #[test]
    fn test_context_creation() {
        let ctx = context();
        assert!(ctx.raw.is_none());
        assert!(ctx.service.is_none());
        assert!(ctx.diagnostics.is_empty());
        assert_eq!(ctx.original_file_name(), "API_X_SRV");
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = context();
        ctx.add_diagnostic(Diagnostic::error("test", "test error"));
        ctx.add_diagnostic(Diagnostic::warning("test", "test warning"));
        ctx.add_diagnostic(Diagnostic::info("test", "test info"));

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.errors().count(), 1);
        assert_eq!(ctx.warnings().count(), 1);
    }

    #[test]
    fn test_missing_phase_output_is_an_error() {
        let mut ctx = context();
        assert!(ctx.raw().is_err());
        assert!(ctx.take_service().is_err());
    }

    #[test]
    fn test_sources_borrow_documents() {
        let ctx = context();
        let sources = ctx.input.sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "API_X_SRV.edmx");
    }
}
