//! Language-agnostic machinery of vdmgen.
//!
//! Turns the raw schema of a service into its resolved model and provides
//! the building blocks language generators share.
//!
//! # Module Organization
//!
//! - [`names`] - Name resolution (NameRegistry, NameKind, derivation rules)
//! - [`model`] - Semantic model building (ModelBuilder, ComplexTypeGraph)
//! - [`edm`] - The EDM primitive type set
//! - [`language`] - Language seams (EdmTypeMapper, NamingConvention, LanguageCodegen)
//! - [`pipeline`] - Per-service compilation pipeline (phases, lints, plugins, diagnostics)
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Output helpers (ImportCollector)
//! - [`aggregate`] - Cross-service outputs (service mapping, directory claims)
//! - [`testing`] - Test utilities (feature-gated)

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod aggregate;
pub mod builder;
pub mod edm;
pub mod generation;
pub mod language;
pub mod model;
pub mod names;
pub mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
