//! Reading service metadata (OData V2 EDMX) into a [`RawSchema`].
//!
//! Also home to the inputs that travel with a metadata document: the
//! service mapping file and the optional swagger document.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod document;
mod error;
mod mapping;
mod parser;
mod raw;
mod swagger;
mod type_ref;

pub use error::{Result, SchemaParseError, SourceContext};
pub use mapping::{ServiceMapping, ServiceMappingError, ServiceMappings};
pub use parser::{SchemaSource, parse_documents, parse_str};
pub use raw::*;
pub use swagger::{ExternalDocs, SwaggerDefinition, SwaggerDocument, SwaggerError, SwaggerProperty};
pub use type_ref::{TypeReference, TypeReferenceError};
