//! Built-in pipeline phases.
//!
//! - [`ParsePhase`] - parses the metadata documents into a raw schema
//! - [`ValidatePhase`] - runs lints over the raw schema
//! - [`BuildPhase`] - builds the service model

mod build;
mod parse;
mod validate;

pub use build::BuildPhase;
pub use parse::ParsePhase;
pub use validate::{
    ComplexTypeCycleLint, EmptyServiceLint, Lint, LintInfo, MissingKeyLint,
    OrphanEntityReturnLint, UnusedEntityTypeLint, ValidatePhase,
};
