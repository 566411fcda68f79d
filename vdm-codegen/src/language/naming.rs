//! Naming conventions for target languages.

use crate::names::NameKind;

/// Language-specific naming conventions.
///
/// Defines the casing of each kind of identifier and how reserved words are
/// escaped. Domain rules (prefix stripping, `create` factories) live in the
/// [`NameRegistry`](crate::names::NameRegistry); this only does casing.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Class, interface and namespace names (e.g., "A_TestEntity" -> "ATestEntity")
    pub type_name: fn(&str) -> String,
    /// Instance members, functions and parameters (e.g., "KeyPropertyGuid" -> "keyPropertyGuid")
    pub member_name: fn(&str) -> String,
    /// Static field descriptors (e.g., "KeyPropertyGuid" -> "KEY_PROPERTY_GUID")
    pub constant_name: fn(&str) -> String,
    /// Directory and package names (e.g., "TEST_SERVICE" -> "test-service")
    pub module_name: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word for the given kind (e.g., "continue" -> "fContinue")
    pub escape_reserved: fn(&str, NameKind) -> String,
    /// Type names the generated code imports from its runtime. Generated
    /// classes never take one of these.
    pub runtime_type_names: &'static [&'static str],
}

impl NamingConvention {
    /// Check if a name is a reserved word. Matching is case-sensitive.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str, kind: NameKind) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name, kind)
        } else {
            name.to_string()
        }
    }

    /// Apply the casing for `kind`, without escaping.
    pub fn case(&self, name: &str, kind: NameKind) -> String {
        match kind {
            NameKind::Class => (self.type_name)(name),
            NameKind::StaticProperty => (self.constant_name)(name),
            NameKind::Module => (self.module_name)(name),
            NameKind::InstanceProperty
            | NameKind::Factory
            | NameKind::Function
            | NameKind::Parameter => (self.member_name)(name),
        }
    }

    /// Transform and make safe for use as a `kind` identifier.
    pub fn transform(&self, name: &str, kind: NameKind) -> String {
        self.safe_name(&self.case(name, kind), kind)
    }
}
