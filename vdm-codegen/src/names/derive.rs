//! Domain rules applied to schema names before casing.

use vdmgen_core::to_pascal_case;

const ENTITY_PREFIX: &str = "A_";
const COLLECTION_SUFFIX: &str = "Collection";

/// Drop the `A_` prefix of published API entity and complex types.
pub fn strip_entity_prefix(name: &str) -> &str {
    match name.strip_prefix(ENTITY_PREFIX) {
        Some(rest) if !rest.is_empty() => rest,
        _ => name,
    }
}

/// Human-readable service name: `API_TEST_SRV` becomes `TEST_SERVICE`.
pub fn speaking_name(original_file_name: &str) -> String {
    let name = original_file_name
        .strip_prefix("API_")
        .filter(|rest| !rest.is_empty())
        .unwrap_or(original_file_name);
    match name.strip_suffix("_SRV") {
        Some(stem) if !stem.is_empty() => format!("{}_SERVICE", stem),
        _ => name.to_string(),
    }
}

/// The name an entity class is derived from.
///
/// A trailing `Collection` is dropped from the entity set name unless another
/// set already derives the shortened name, in which case the set name is
/// kept as is.
pub fn entity_class_source<'a>(
    entity_set_name: &str,
    all_set_names: impl IntoIterator<Item = &'a str>,
) -> String {
    let base = strip_entity_prefix(entity_set_name);
    let Some(stripped) = base
        .strip_suffix(COLLECTION_SUFFIX)
        .filter(|s| !s.is_empty())
    else {
        return base.to_string();
    };

    let derived = to_pascal_case(stripped);
    let clashes = all_set_names.into_iter().any(|other| {
        other != entity_set_name && to_pascal_case(strip_entity_prefix(other)) == derived
    });
    if clashes {
        base.to_string()
    } else {
        stripped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_entity_prefix() {
        assert_eq!(strip_entity_prefix("A_TestEntity"), "TestEntity");
        assert_eq!(strip_entity_prefix("TestEntity"), "TestEntity");
        assert_eq!(strip_entity_prefix("A_"), "A_");
    }

    #[test]
    fn test_speaking_name() {
        assert_eq!(speaking_name("API_TEST_SRV"), "TEST_SERVICE");
        assert_eq!(speaking_name("API_MULTIPLE_SCHEMAS_SRV"), "MULTIPLE_SCHEMAS_SERVICE");
        assert_eq!(speaking_name("ZCUSTOM"), "ZCUSTOM");
        assert_eq!(speaking_name("_SRV"), "_SRV");
    }

    #[test]
    fn test_collection_suffix_is_stripped() {
        let sets = [
            "A_TestEntityEndsWithCollection",
            "A_TestEntityEndsWithSomethingElse",
        ];
        assert_eq!(entity_class_source(sets[0], sets), "TestEntityEndsWith");
        assert_eq!(
            entity_class_source(sets[1], sets),
            "TestEntityEndsWithSomethingElse"
        );
    }

    #[test]
    fn test_collection_suffix_is_kept_on_clash() {
        let sets = ["A_TestEntityCollection", "A_TestEntity"];
        assert_eq!(entity_class_source(sets[0], sets), "TestEntityCollection");
        assert_eq!(entity_class_source(sets[1], sets), "TestEntity");
    }

    #[test]
    fn test_bare_collection_is_kept() {
        assert_eq!(entity_class_source("Collection", ["Collection"]), "Collection");
    }
}
