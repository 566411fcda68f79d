//! The resolved service model (VDM).
//!
//! Produced once per service by the model builder and consumed read-only by
//! emitters and the aggregator. Every name in here is final: it has already
//! been made collision-free and keyword-safe for the target language.
//!
//! # Architecture
//!
//! ```text
//! EDMX → vdm-edmx (RawSchema) → vdm-codegen (model builder) → vdm-ir → emitters
//! ```
//!
//! All types serialize to camelCase JSON, the shape `vdmgen check --dump-model`
//! writes.

mod complex_type;
mod entity;
mod function_import;
mod service;

pub use complex_type::VdmComplexType;
pub use entity::{VdmEntity, VdmMultiplicity, VdmNavigationProperty, VdmProperty};
pub use function_import::{VdmFunctionImport, VdmFunctionImportReturnType, VdmParameter};
pub use service::VdmServiceMetadata;
