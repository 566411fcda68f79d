//! The fixed set of EDM primitive types.

use std::{fmt, str::FromStr};

use miette::Diagnostic;
use thiserror::Error;

/// A primitive `Edm.*` name the type mapper has no mapping for.
///
/// The parser classifies every `Edm.` reference as primitive, so reaching
/// this error means the metadata uses a primitive outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("unknown EDM primitive type '{name}'")]
#[diagnostic(
    code(vdmgen::model::unknown_edm_type),
    help("supported primitives are Edm.Binary, Edm.Boolean, Edm.Byte, Edm.DateTime, Edm.DateTimeOffset, Edm.Decimal, Edm.Double, Edm.Guid, Edm.Int16, Edm.Int32, Edm.Int64, Edm.SByte, Edm.Single, Edm.String and Edm.Time")
)]
pub struct UnknownEdmTypeError {
    pub name: String,
}

/// OData V2 primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdmType {
    Binary,
    Boolean,
    Byte,
    DateTime,
    DateTimeOffset,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    String,
    Time,
}

impl EdmType {
    pub const ALL: [EdmType; 15] = [
        Self::Binary,
        Self::Boolean,
        Self::Byte,
        Self::DateTime,
        Self::DateTimeOffset,
        Self::Decimal,
        Self::Double,
        Self::Guid,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::SByte,
        Self::Single,
        Self::String,
        Self::Time,
    ];

    /// The qualified name, e.g. `Edm.Int16`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "Edm.Binary",
            Self::Boolean => "Edm.Boolean",
            Self::Byte => "Edm.Byte",
            Self::DateTime => "Edm.DateTime",
            Self::DateTimeOffset => "Edm.DateTimeOffset",
            Self::Decimal => "Edm.Decimal",
            Self::Double => "Edm.Double",
            Self::Guid => "Edm.Guid",
            Self::Int16 => "Edm.Int16",
            Self::Int32 => "Edm.Int32",
            Self::Int64 => "Edm.Int64",
            Self::SByte => "Edm.SByte",
            Self::Single => "Edm.Single",
            Self::String => "Edm.String",
            Self::Time => "Edm.Time",
        }
    }
}

impl fmt::Display for EdmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdmType {
    type Err = UnknownEdmTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|edm| edm.as_str() == s)
            .ok_or_else(|| UnknownEdmTypeError {
                name: s.to_string(),
            })
    }
}
