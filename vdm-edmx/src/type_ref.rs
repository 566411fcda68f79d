use std::fmt;

use thiserror::Error;

/// Why a `Type`/`ReturnType` attribute could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeReferenceError {
    #[error("the reference is empty")]
    Empty,
    #[error("'Collection(' is not closed")]
    UnclosedCollection,
    #[error("collections of collections are not supported")]
    NestedCollection,
    #[error("expected a namespace-qualified name")]
    Unqualified,
}

/// A parsed type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeReference {
    /// A primitive such as `Edm.String`, kept verbatim.
    Primitive(String),
    /// A schema type such as `API_TEST_SRV.A_TestComplexType`.
    Qualified { namespace: String, name: String },
    /// `Collection(<element>)`
    Collection(Box<TypeReference>),
}

impl TypeReference {
    pub fn parse(reference: &str) -> Result<Self, TypeReferenceError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(TypeReferenceError::Empty);
        }

        if let Some(rest) = reference.strip_prefix("Collection(") {
            let inner = rest
                .strip_suffix(')')
                .ok_or(TypeReferenceError::UnclosedCollection)?;
            let element = Self::parse(inner)?;
            if element.is_collection() {
                return Err(TypeReferenceError::NestedCollection);
            }
            return Ok(Self::Collection(Box::new(element)));
        }

        let (namespace, name) = reference
            .rsplit_once('.')
            .ok_or(TypeReferenceError::Unqualified)?;
        if namespace.is_empty() || name.is_empty() {
            return Err(TypeReferenceError::Unqualified);
        }
        if namespace == "Edm" {
            return Ok(Self::Primitive(reference.to_string()));
        }
        Ok(Self::Qualified {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// The element type of a collection, or the reference itself.
    pub fn element(&self) -> &TypeReference {
        match self {
            Self::Collection(inner) => inner,
            other => other,
        }
    }

    /// `Namespace.Name` of a schema type (looking through collections).
    pub fn qualified_name(&self) -> Option<String> {
        match self.element() {
            Self::Qualified { namespace, name } => Some(format!("{}.{}", namespace, name)),
            _ => None,
        }
    }

    /// Replace an alias namespace with the namespace it stands for.
    pub(crate) fn dealias(self, resolve: &impl Fn(&str) -> Option<String>) -> Self {
        match self {
            Self::Qualified { namespace, name } => Self::Qualified {
                namespace: resolve(&namespace).unwrap_or(namespace),
                name,
            },
            Self::Collection(inner) => Self::Collection(Box::new(inner.dealias(resolve))),
            primitive => primitive,
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) => write!(f, "{}", name),
            Self::Qualified { namespace, name } => write!(f, "{}.{}", namespace, name),
            Self::Collection(inner) => write!(f, "Collection({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive() {
        assert_eq!(
            TypeReference::parse("Edm.String"),
            Ok(TypeReference::Primitive("Edm.String".to_string()))
        );
    }

    #[test]
    fn test_parse_qualified() {
        let parsed = TypeReference::parse("API_TEST_SRV.A_TestComplexType").unwrap();
        assert_eq!(
            parsed.qualified_name().as_deref(),
            Some("API_TEST_SRV.A_TestComplexType")
        );
        assert!(!parsed.is_collection());
    }

    #[test]
    fn test_parse_collection() {
        let parsed = TypeReference::parse("Collection(Edm.Int32)").unwrap();
        assert!(parsed.is_collection());
        assert_eq!(
            parsed.element(),
            &TypeReference::Primitive("Edm.Int32".to_string())
        );
        assert_eq!(parsed.to_string(), "Collection(Edm.Int32)");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(TypeReference::parse("  "), Err(TypeReferenceError::Empty));
        assert_eq!(
            TypeReference::parse("Collection(Edm.String"),
            Err(TypeReferenceError::UnclosedCollection)
        );
        assert_eq!(
            TypeReference::parse("Collection(Collection(Edm.String))"),
            Err(TypeReferenceError::NestedCollection)
        );
        assert_eq!(
            TypeReference::parse("String"),
            Err(TypeReferenceError::Unqualified)
        );
        assert_eq!(
            TypeReference::parse("NS."),
            Err(TypeReferenceError::Unqualified)
        );
    }

    #[test]
    fn test_dealias() {
        let resolve = |alias: &str| (alias == "Self").then(|| "API_TEST_SRV".to_string());
        let parsed = TypeReference::parse("Collection(Self.Meal)")
            .unwrap()
            .dealias(&resolve);
        assert_eq!(parsed.to_string(), "Collection(API_TEST_SRV.Meal)");
    }
}
