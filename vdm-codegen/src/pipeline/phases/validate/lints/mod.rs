//! Built-in lints for raw schema validation.

mod complex_type_cycle;
mod empty_service;
mod missing_key;
mod orphan_entity_return;
mod unused_entity_type;

pub use complex_type_cycle::ComplexTypeCycleLint;
pub use empty_service::EmptyServiceLint;
pub use missing_key::MissingKeyLint;
pub use orphan_entity_return::OrphanEntityReturnLint;
pub use unused_entity_type::UnusedEntityTypeLint;
