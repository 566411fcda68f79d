use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::{NameCollisionError, NameKind, entity_class_source, strip_entity_prefix};
use crate::language::NamingConvention;

/// How many `_<n>` suffixes are tried before giving up.
pub const MAX_ORDINAL: usize = 99;

#[derive(Debug, Default)]
struct Bucket {
    taken: HashSet<String>,
    /// (kind, key) -> resolved name
    resolved: HashMap<(NameKind, String), String>,
}

/// Hands out collision-free, keyword-safe identifiers for one service.
///
/// Names live in buckets keyed by kind and owner: property names are unique
/// per owning class, parameter names per owning function, everything else
/// per service. Factories and functions share a bucket because both end up
/// as top-level functions of the service.
///
/// Collisions are resolved by appending `_1`, `_2`, ... in registration
/// order, so the first construct to ask for a name keeps it.
#[derive(Debug)]
pub struct NameRegistry {
    namespace: String,
    naming: NamingConvention,
    buckets: HashMap<(NameKind, String), Bucket>,
}

impl NameRegistry {
    pub fn new(namespace: impl Into<String>, naming: NamingConvention) -> Self {
        let mut registry = Self {
            namespace: namespace.into(),
            naming,
            buckets: HashMap::new(),
        };
        for name in naming.runtime_type_names {
            registry.reserve(NameKind::Class, None, name);
        }
        registry
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    /// Resolve `original` as a `kind` identifier.
    ///
    /// An explicit name is used verbatim. Asking again for the same kind,
    /// owner and original name returns the name handed out the first time.
    pub fn resolve(
        &mut self,
        kind: NameKind,
        owner: Option<&str>,
        original: &str,
        explicit: Option<&str>,
    ) -> Result<String, NameCollisionError> {
        self.resolve_keyed(kind, owner, original, original, explicit)
    }

    /// Like [`NameRegistry::resolve`], but remembers the result under `key`
    /// while deriving the name from `source`.
    pub fn resolve_keyed(
        &mut self,
        kind: NameKind,
        owner: Option<&str>,
        key: &str,
        source: &str,
        explicit: Option<&str>,
    ) -> Result<String, NameCollisionError> {
        let bucket = self
            .buckets
            .entry((kind.bucket(), owner.unwrap_or_default().to_string()))
            .or_default();
        let cache_key = (kind, key.to_string());
        if let Some(name) = bucket.resolved.get(&cache_key) {
            return Ok(name.clone());
        }

        let name = match explicit {
            Some(name) if bucket.taken.contains(name) => {
                return Err(NameCollisionError::OverrideTaken {
                    namespace: self.namespace.clone(),
                    kind,
                    original: key.to_string(),
                    name: name.to_string(),
                });
            }
            Some(name) => name.to_string(),
            None => {
                let candidate = self.naming.transform(source, kind);
                disambiguate(&bucket.taken, candidate).map_err(|candidate| {
                    NameCollisionError::Exhausted {
                        namespace: self.namespace.clone(),
                        kind,
                        original: key.to_string(),
                        candidate,
                        limit: MAX_ORDINAL,
                    }
                })?
            }
        };

        trace!(namespace = %self.namespace, %kind, key, name = %name, "resolved name");
        bucket.taken.insert(name.clone());
        bucket.resolved.insert(cache_key, name.clone());
        Ok(name)
    }

    /// Mark a name as used without resolving anything to it.
    pub fn reserve(&mut self, kind: NameKind, owner: Option<&str>, name: &str) {
        self.buckets
            .entry((kind.bucket(), owner.unwrap_or_default().to_string()))
            .or_default()
            .taken
            .insert(name.to_string());
    }

    pub fn is_taken(&self, kind: NameKind, owner: Option<&str>, name: &str) -> bool {
        self.buckets
            .get(&(kind.bucket(), owner.unwrap_or_default().to_string()))
            .is_some_and(|bucket| bucket.taken.contains(name))
    }

    /// The name previously resolved for `key`, if any.
    pub fn lookup(&self, kind: NameKind, owner: Option<&str>, key: &str) -> Option<&str> {
        self.buckets
            .get(&(kind.bucket(), owner.unwrap_or_default().to_string()))?
            .resolved
            .get(&(kind, key.to_string()))
            .map(String::as_str)
    }

    /// Class name of the entity generated for `entity_set_name`.
    pub fn entity_class_name<'a>(
        &mut self,
        entity_set_name: &str,
        all_set_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<String, NameCollisionError> {
        let source = entity_class_source(entity_set_name, all_set_names);
        self.resolve_keyed(NameKind::Class, None, entity_set_name, &source, None)
    }

    /// Type name of a complex type, keyed by its qualified name.
    pub fn complex_type_name(
        &mut self,
        qualified_name: &str,
        original_name: &str,
    ) -> Result<String, NameCollisionError> {
        let source = strip_entity_prefix(original_name);
        self.resolve_keyed(NameKind::Class, None, qualified_name, source, None)
    }

    /// `create<TypeName>` factory of a complex type.
    pub fn factory_name(
        &mut self,
        qualified_name: &str,
        type_name: &str,
    ) -> Result<String, NameCollisionError> {
        let source = format!("create{}", type_name);
        self.resolve_keyed(NameKind::Factory, None, qualified_name, &source, None)
    }

    pub fn function_name(&mut self, original_name: &str) -> Result<String, NameCollisionError> {
        self.resolve(NameKind::Function, None, original_name, None)
    }

    pub fn instance_property_name(
        &mut self,
        owner: &str,
        original_name: &str,
    ) -> Result<String, NameCollisionError> {
        self.resolve(NameKind::InstanceProperty, Some(owner), original_name, None)
    }

    pub fn static_property_name(
        &mut self,
        owner: &str,
        original_name: &str,
    ) -> Result<String, NameCollisionError> {
        self.resolve(NameKind::StaticProperty, Some(owner), original_name, None)
    }

    /// Parameter name of a function parameter or of a property passed as one.
    pub fn parameter_name(
        &mut self,
        owner: &str,
        original_name: &str,
    ) -> Result<String, NameCollisionError> {
        self.resolve(NameKind::Parameter, Some(owner), original_name, None)
    }

    /// Directory and package name of the service.
    pub fn module_name(
        &mut self,
        speaking_name: &str,
        explicit: Option<&str>,
    ) -> Result<String, NameCollisionError> {
        self.resolve(NameKind::Module, None, speaking_name, explicit)
    }
}

/// First free name among `candidate`, `candidate_1`, ... `candidate_<MAX_ORDINAL>`.
fn disambiguate(taken: &HashSet<String>, candidate: String) -> Result<String, String> {
    if !taken.contains(&candidate) {
        return Ok(candidate);
    }
    (1..=MAX_ORDINAL)
        .map(|n| format!("{}_{}", candidate, n))
        .find(|name| !taken.contains(name))
        .ok_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_naming;

    fn registry() -> NameRegistry {
        NameRegistry::new("API_TEST_SRV", test_naming())
    }

    #[test]
    fn test_resolution_is_cached() {
        let mut names = registry();
        let first = names.instance_property_name("TestEntity", "KeyPropertyGuid").unwrap();
        let second = names.instance_property_name("TestEntity", "KeyPropertyGuid").unwrap();
        assert_eq!(first, "keyPropertyGuid");
        assert_eq!(first, second);
    }

    #[test]
    fn test_collisions_get_ordinal_suffixes() {
        let mut names = registry();
        assert_eq!(names.instance_property_name("E", "Some_Name").unwrap(), "someName");
        assert_eq!(names.instance_property_name("E", "SomeName").unwrap(), "someName_1");
        assert_eq!(names.instance_property_name("E", "some_name").unwrap(), "someName_2");
    }

    #[test]
    fn test_owners_are_separate_buckets() {
        let mut names = registry();
        assert_eq!(names.instance_property_name("A", "Name").unwrap(), "name");
        assert_eq!(names.instance_property_name("B", "Name").unwrap(), "name");
    }

    #[test]
    fn test_factory_shares_bucket_with_functions() {
        let mut names = registry();
        assert_eq!(
            names.function_name("CreateTestComplexType").unwrap(),
            "createTestComplexType"
        );
        let type_name = names
            .complex_type_name("API_TEST_SRV.A_TestComplexType", "A_TestComplexType")
            .unwrap();
        assert_eq!(type_name, "TestComplexType");
        assert_eq!(
            names
                .factory_name("API_TEST_SRV.A_TestComplexType", &type_name)
                .unwrap(),
            "createTestComplexType_1"
        );
    }

    #[test]
    fn test_entity_and_complex_keys_do_not_clash() {
        let mut names = registry();
        let sets = ["A_TestEntity"];
        assert_eq!(names.entity_class_name("A_TestEntity", sets).unwrap(), "TestEntity");
        assert_eq!(
            names
                .complex_type_name("API_TEST_SRV.A_TestEntity", "A_TestEntity")
                .unwrap(),
            "TestEntity_1"
        );
    }

    #[test]
    fn test_runtime_type_names_are_taken() {
        let mut names = registry();
        assert!(names.is_taken(NameKind::Class, None, "Link"));
        assert_eq!(names.entity_class_name("A_Link", ["A_Link"]).unwrap(), "Link_1");
        assert_eq!(
            names.complex_type_name("API_TEST_SRV.Entity", "Entity").unwrap(),
            "Entity_1"
        );
        // only classes are affected
        assert_eq!(names.instance_property_name("Link_1", "Link").unwrap(), "link");
    }

    #[test]
    fn test_reserved_names_are_escaped() {
        let mut names = registry();
        assert_eq!(names.function_name("Continue").unwrap(), "fContinue");
        assert_eq!(names.parameter_name("fContinue", "Delete").unwrap(), "pDelete");
    }

    #[test]
    fn test_explicit_name_wins() {
        let mut names = registry();
        assert_eq!(
            names.module_name("TEST_SERVICE", Some("my-test-service")).unwrap(),
            "my-test-service"
        );
        assert_eq!(
            names.lookup(NameKind::Module, None, "TEST_SERVICE"),
            Some("my-test-service")
        );
    }

    #[test]
    fn test_explicit_name_already_taken() {
        let mut names = registry();
        names.reserve(NameKind::Module, None, "taken");
        let err = names.module_name("TEST_SERVICE", Some("taken")).unwrap_err();
        assert!(matches!(err, NameCollisionError::OverrideTaken { .. }));
    }

    #[test]
    fn test_reserved_static_name() {
        let mut names = registry();
        names.reserve(NameKind::StaticProperty, Some("TestEntity"), "ALL_FIELDS");
        assert!(names.is_taken(NameKind::StaticProperty, Some("TestEntity"), "ALL_FIELDS"));
        assert_eq!(
            names.static_property_name("TestEntity", "AllFields").unwrap(),
            "ALL_FIELDS_1"
        );
    }

    #[test]
    fn test_exhausted_disambiguation() {
        let mut names = registry();
        names.reserve(NameKind::Function, None, "name");
        for n in 1..=MAX_ORDINAL {
            names.reserve(NameKind::Function, None, &format!("name_{}", n));
        }
        let err = names.function_name("Name").unwrap_err();
        assert_eq!(
            err,
            NameCollisionError::Exhausted {
                namespace: "API_TEST_SRV".to_string(),
                kind: NameKind::Function,
                original: "Name".to_string(),
                candidate: "name".to_string(),
                limit: MAX_ORDINAL,
            }
        );
    }

    #[test]
    fn test_same_requests_same_names() {
        let run = || {
            let mut names = registry();
            ["Foo", "foo", "FOO", "f_o_o"]
                .iter()
                .map(|n| names.function_name(n).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
