//! Semantic model building.
//!
//! Turns a [`RawSchema`](vdmgen_edmx::RawSchema) into the resolved
//! [`VdmServiceMetadata`](vdmgen_ir::VdmServiceMetadata): names come from a
//! [`NameRegistry`](crate::names::NameRegistry), primitive types from an
//! [`EdmTypeMapper`](crate::language::EdmTypeMapper).

mod builder;
mod graph;

use miette::Diagnostic;
use thiserror::Error;

pub use builder::{
    BuiltModel, DEFAULT_SERVICE_PATH_PREFIX, ModelBuilder, ModelInput, build_service,
};
pub use graph::ComplexTypeGraph;

/// The raw schema cannot be turned into a consistent model.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SemanticModelError {
    #[error("complex types contain themselves: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(vdmgen::model::complex_type_cycle),
        help("a complex type cannot contain a property of its own type at any depth")
    )]
    ComplexTypeCycle { cycle: Vec<String> },

    #[error("function import '{function_import}' returns '{return_type}', which is neither an entity type nor a complex type")]
    #[diagnostic(code(vdmgen::model::unresolved_return_type))]
    UnresolvedReturnType {
        function_import: String,
        return_type: String,
    },

    #[error("entity set '{entity_set}' refers to unknown entity type '{entity_type}'")]
    #[diagnostic(code(vdmgen::model::unresolved_entity_type))]
    UnresolvedEntityType {
        entity_set: String,
        entity_type: String,
    },

    #[error("property '{property}' of '{owner}' refers to unknown complex type '{complex_type}'")]
    #[diagnostic(code(vdmgen::model::unresolved_complex_type))]
    UnresolvedComplexType {
        owner: String,
        property: String,
        complex_type: String,
    },

    #[error("function import '{function_import}' returns entities of '{entity_type}', but no entity set holds them")]
    #[diagnostic(
        code(vdmgen::model::unresolved_entity_set),
        help("add an entity set for the entity type or set the EntitySet attribute of the function import")
    )]
    UnresolvedEntitySet {
        function_import: String,
        entity_type: String,
    },

    #[error("parameter '{parameter}' of function import '{function_import}' has type '{parameter_type}', but only single primitive values can be passed")]
    #[diagnostic(
        code(vdmgen::model::unsupported_parameter_type),
        help("function import parameters are sent as URL query options, which carry only primitive EDM values")
    )]
    UnsupportedParameterType {
        function_import: String,
        parameter: String,
        parameter_type: String,
    },
}
