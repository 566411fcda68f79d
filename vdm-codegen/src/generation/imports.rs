//! Import collection and merging.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// One merged import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportGroup<'a> {
    pub module: &'a str,
    /// `import type { .. }` rather than `import { .. }`.
    pub type_only: bool,
    /// Sorted, unique names.
    pub names: Vec<&'a str>,
}

/// Tracks imports per module specifier and deduplicates them.
///
/// Value and type-only imports of one module are kept as separate
/// declarations. A name imported both ways is only kept as a value import.
/// Module order is first-insertion order, names are sorted.
///
/// # Example
///
/// ```
/// use vdmgen_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("@sap-cloud-sdk/core", "StringField");
/// imports.add("@sap-cloud-sdk/core", "Entity");
/// imports.add("@sap-cloud-sdk/core", "StringField");
///
/// let groups = imports.groups();
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].names, vec!["Entity", "StringField"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportCollector {
    /// (module, type_only) -> names
    imports: IndexMap<(String, bool), BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value import.
    pub fn add(&mut self, module: &str, name: &str) {
        self.insert(module, false, name);
    }

    /// Add a type-only import.
    pub fn add_type(&mut self, module: &str, name: &str) {
        self.insert(module, true, name);
    }

    /// Add several value imports from one module.
    pub fn add_all<'a>(&mut self, module: &str, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.add(module, name);
        }
    }

    fn insert(&mut self, module: &str, type_only: bool, name: &str) {
        self.imports
            .entry((module.to_string(), type_only))
            .or_default()
            .insert(name.to_string());
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for ((module, type_only), names) in &other.imports {
            self.imports
                .entry((module.clone(), *type_only))
                .or_default()
                .extend(names.iter().cloned());
        }
    }

    /// The merged declarations, in first-insertion order.
    ///
    /// Type-only names that are also value-imported from the same module are
    /// dropped, and a declaration left without names is omitted.
    pub fn groups(&self) -> Vec<ImportGroup<'_>> {
        self.imports
            .iter()
            .filter_map(|((module, type_only), names)| {
                let values = (*type_only)
                    .then(|| self.imports.get(&(module.clone(), false)))
                    .flatten();
                let names: Vec<&str> = names
                    .iter()
                    .filter(|name| !values.is_some_and(|v| v.contains(*name)))
                    .map(String::as_str)
                    .collect();
                (!names.is_empty()).then_some(ImportGroup {
                    module,
                    type_only: *type_only,
                    names,
                })
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups().is_empty()
    }

    /// Number of import declarations after merging.
    pub fn len(&self) -> usize {
        self.groups().len()
    }
}
