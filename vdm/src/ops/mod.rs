//! Core operations.
//!
//! This module contains the business logic for vdmgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

use std::path::Path;

use eyre::{Context, Result};
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use tracing::debug;
use vdmgen_codegen::{
    aggregate::DuplicateDirectoryError, model::SemanticModelError, names::NameCollisionError,
};
use vdmgen_edmx::{SchemaParseError, ServiceMappings};

pub use check::{CheckOptions, check};
pub use generate::{AggregatorOptions, GenerateOptions, generate};

/// Read the mapping file if there is one.
///
/// An explicitly named file must exist; the default location may be absent.
pub(crate) fn load_mappings(path: Option<&Path>) -> Result<ServiceMappings> {
    match path {
        Some(path) => {
            debug!(mapping = %path.display(), "reading service mapping");
            ServiceMappings::open(path)
                .wrap_err_with(|| format!("Failed to load service mapping {}", path.display()))
        }
        None => Ok(ServiceMappings::new()),
    }
}

fn render_diagnostic(diagnostic: &dyn Diagnostic) -> Option<String> {
    let mut out = String::new();
    GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .render_report(&mut out, diagnostic)
        .ok()?;
    Some(out.trim_end().to_string())
}

/// Message for a failed service: library diagnostics rendered with their
/// code and help, anything else as the error chain.
pub(crate) fn describe_error(err: &eyre::Report) -> String {
    let diagnostic: Option<&dyn Diagnostic> = if let Some(e) = err.downcast_ref::<SchemaParseError>() {
        Some(e)
    } else if let Some(e) = err.downcast_ref::<SemanticModelError>() {
        Some(e)
    } else if let Some(e) = err.downcast_ref::<NameCollisionError>() {
        Some(e)
    } else if let Some(e) = err.downcast_ref::<DuplicateDirectoryError>() {
        Some(e)
    } else {
        None
    };
    diagnostic
        .and_then(render_diagnostic)
        .unwrap_or_else(|| format!("{:#}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping_may_be_absent() {
        assert!(load_mappings(None).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_mapping_must_exist() {
        let temp = tempfile::tempdir().unwrap();
        let err = load_mappings(Some(&temp.path().join("missing.json"))).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_describe_plain_error() {
        let err = eyre::eyre!("outer").wrap_err("context");
        assert_eq!(describe_error(&err), "context: outer");
    }

    #[test]
    fn test_describe_diagnostic_includes_help() {
        let err = eyre::Report::new(DuplicateDirectoryError {
            service: "API_B_SRV".to_string(),
            directory: "shared".to_string(),
            first: "API_A_SRV".to_string(),
        });
        let message = describe_error(&err);
        assert!(message.contains("already used by 'API_A_SRV'"));
        assert!(message.contains("directoryName"));
    }
}
