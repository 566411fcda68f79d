//! Compilation pipeline for one service.
//!
//! A [`Pipeline`] runs a service from its metadata documents to its
//! [`VdmServiceMetadata`](vdmgen_ir::VdmServiceMetadata):
//!
//! - Explicit phase boundaries (parse → validate → build)
//! - Plugin hooks before and after each phase
//! - Diagnostics collected in the [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use vdmgen_codegen::pipeline::{Pipeline, ServiceInput};
//!
//! let pipeline = Pipeline::new(naming, mapper);
//! let mut ctx = pipeline.run(ServiceInput::new("API_TEST_SRV", "API_TEST_SRV.edmx", text))?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! let service = ctx.take_service()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::{CompilationContext, ServiceDocument, ServiceInput};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::{Plugin, ServiceMappingPlugin, TracingPlugin};
pub use runner::Pipeline;
