//! Name resolution.
//!
//! Every identifier of a generated service is handed out by a
//! [`NameRegistry`], scoped to one service and passed explicitly to whoever
//! needs a name. Resolution is deterministic: the same requests in the same
//! order always produce the same names.

mod derive;
mod registry;

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

pub use derive::{entity_class_source, speaking_name, strip_entity_prefix};
pub use registry::{MAX_ORDINAL, NameRegistry};

/// The kind of identifier being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Class,
    InstanceProperty,
    StaticProperty,
    Factory,
    Function,
    Module,
    Parameter,
}

impl NameKind {
    /// Kinds sharing a namespace in the generated code share a bucket.
    pub(crate) fn bucket(self) -> NameKind {
        match self {
            Self::Factory => Self::Function,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::InstanceProperty => "instance property",
            Self::StaticProperty => "static property",
            Self::Factory => "factory",
            Self::Function => "function",
            Self::Module => "module",
            Self::Parameter => "parameter",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name could not be made unique.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum NameCollisionError {
    #[error("no free {kind} name for '{original}' in '{namespace}': '{candidate}' and its {limit} suffixed variants are taken")]
    #[diagnostic(
        code(vdmgen::names::exhausted),
        help("rename the colliding constructs in the metadata")
    )]
    Exhausted {
        namespace: String,
        kind: NameKind,
        original: String,
        candidate: String,
        limit: usize,
    },

    #[error("{kind} name '{name}' requested for '{original}' in '{namespace}' is already taken")]
    #[diagnostic(
        code(vdmgen::names::override_taken),
        help("choose a different name in the service mapping")
    )]
    OverrideTaken {
        namespace: String,
        kind: NameKind,
        original: String,
        name: String,
    },
}
