use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::type_ref::TypeReferenceError;

/// Result type for schema parsing (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<SchemaParseError>>;

/// One metadata document kept around for error reporting.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Span of the first occurrence of `needle`, if any.
    pub fn find(&self, needle: &str) -> Option<SourceSpan> {
        self.src
            .find(needle)
            .map(|offset| SourceSpan::from((offset, needle.len())))
    }
}

/// Every document of a service, used to attach a best-effort location to errors
/// raised after the schemas have been merged.
#[derive(Debug, Clone, Default)]
pub(crate) struct SourceSet {
    docs: Vec<SourceContext>,
}

impl SourceSet {
    pub(crate) fn push(&mut self, ctx: SourceContext) {
        self.docs.push(ctx);
    }

    pub(crate) fn filenames(&self) -> String {
        self.docs
            .iter()
            .map(SourceContext::filename)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Source and span of the first document mentioning `Name="<name>"`.
    ///
    /// Falls back to the first document without a span.
    pub(crate) fn locate(&self, name: &str) -> (NamedSource<String>, Option<SourceSpan>) {
        self.locate_text(&format!("Name=\"{}\"", name))
    }

    pub(crate) fn locate_text(&self, needle: &str) -> (NamedSource<String>, Option<SourceSpan>) {
        for doc in &self.docs {
            if let Some(span) = doc.find(needle) {
                return (doc.named_source(), Some(span));
            }
        }
        match self.docs.first() {
            Some(doc) => (doc.named_source(), None),
            None => (NamedSource::new("<empty>", String::new()), None),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SchemaParseError {
    #[error("failed to parse EDMX document '{name}'")]
    #[diagnostic(
        code(vdmgen::edmx::xml),
        help("the document must be well-formed EDMX (edmx:Edmx / edmx:DataServices / Schema)")
    )]
    Xml {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("no <Schema> element found in {documents}")]
    #[diagnostic(
        code(vdmgen::edmx::missing_schema),
        help("only OData V2 metadata with at least one schema is supported")
    )]
    MissingSchema { documents: String },

    #[error("<{element}> is missing required attribute '{attribute}' in {context}")]
    #[diagnostic(code(vdmgen::edmx::missing_attribute))]
    MissingAttribute {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        element: &'static str,
        attribute: &'static str,
        context: String,
    },

    #[error("invalid type reference '{reference}' in {context}")]
    #[diagnostic(
        code(vdmgen::edmx::invalid_type_reference),
        help("expected 'Edm.<Type>', 'Namespace.Name' or 'Collection(...)'")
    )]
    InvalidTypeReference {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: Option<SourceSpan>,
        reference: String,
        context: String,
        #[source]
        reason: TypeReferenceError,
    },

    #[error("invalid multiplicity '{multiplicity}' on association '{association}'")]
    #[diagnostic(
        code(vdmgen::edmx::invalid_multiplicity),
        help("multiplicity must be one of '1', '0..1' or '*'")
    )]
    InvalidMultiplicity {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        association: String,
        multiplicity: String,
    },

    #[error("key property '{key}' is not declared on entity type '{entity_type}'")]
    #[diagnostic(code(vdmgen::edmx::unknown_key_property))]
    UnknownKeyProperty {
        #[source_code]
        src: NamedSource<String>,
        #[label("key declared here")]
        span: Option<SourceSpan>,
        entity_type: String,
        key: String,
    },

    #[error("{context} references unknown type '{reference}'")]
    #[diagnostic(
        code(vdmgen::edmx::unresolved_type),
        help("declare the type in one of the service's schemas")
    )]
    UnresolvedType {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: Option<SourceSpan>,
        reference: String,
        context: String,
    },

    #[error(
        "navigation property '{property}' of '{entity_type}' references unknown association '{relationship}'"
    )]
    #[diagnostic(code(vdmgen::edmx::unresolved_association))]
    UnresolvedAssociation {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: Option<SourceSpan>,
        entity_type: String,
        property: String,
        relationship: String,
    },

    #[error(
        "navigation property '{property}' of '{entity_type}' uses role '{role}' which association '{association}' does not declare"
    )]
    #[diagnostic(code(vdmgen::edmx::unresolved_role))]
    UnresolvedRole {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: Option<SourceSpan>,
        entity_type: String,
        property: String,
        association: String,
        role: String,
    },

    #[error("{kind} '{name}' is declared in both '{first}' and '{second}'")]
    #[diagnostic(
        code(vdmgen::edmx::duplicate_name),
        help("names must be unique across all schemas of a service")
    )]
    DuplicateName {
        #[source_code]
        src: NamedSource<String>,
        #[label("second declaration")]
        span: Option<SourceSpan>,
        kind: &'static str,
        name: String,
        first: String,
        second: String,
    },
}
