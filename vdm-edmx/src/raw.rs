//! Raw schema: a structural mirror of the metadata documents.
//!
//! Nothing here is renamed or typed for a target language. Type references
//! are kept as the strings found in the document, with schema aliases
//! already replaced by the namespace they stand for.

/// The merged content of every schema describing one service.
///
/// All sequences are in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSchema {
    /// Namespace of the schema holding the entity container.
    pub namespace: String,
    /// Namespaces of every merged schema, in document order.
    pub schema_namespaces: Vec<String>,
    pub entity_types: Vec<RawEntityType>,
    pub complex_types: Vec<RawComplexType>,
    pub associations: Vec<RawAssociation>,
    pub entity_sets: Vec<RawEntitySet>,
    pub function_imports: Vec<RawFunctionImport>,
}

impl RawSchema {
    /// Look up an entity type by qualified name (`Namespace.Name`).
    pub fn entity_type(&self, qualified_name: &str) -> Option<&RawEntityType> {
        self.entity_types
            .iter()
            .find(|t| t.qualified_name() == qualified_name)
    }

    /// Look up a complex type by qualified name.
    pub fn complex_type(&self, qualified_name: &str) -> Option<&RawComplexType> {
        self.complex_types
            .iter()
            .find(|t| t.qualified_name() == qualified_name)
    }

    /// Look up an association by qualified name.
    pub fn association(&self, qualified_name: &str) -> Option<&RawAssociation> {
        self.associations
            .iter()
            .find(|a| a.qualified_name() == qualified_name)
    }

    /// Look up an entity set by name.
    pub fn entity_set(&self, name: &str) -> Option<&RawEntitySet> {
        self.entity_sets.iter().find(|s| s.name == name)
    }

    /// Entity sets whose entity type is `qualified_name`, in document order.
    pub fn entity_sets_of(&self, qualified_name: &str) -> impl Iterator<Item = &RawEntitySet> {
        self.entity_sets
            .iter()
            .filter(move |s| s.entity_type == qualified_name)
    }

    /// Whether a namespace belongs to one of the merged schemas.
    pub fn declares_namespace(&self, namespace: &str) -> bool {
        self.schema_namespaces.iter().any(|ns| ns == namespace)
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    format!("{}.{}", namespace, name)
}

/// An `<EntityType>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntityType {
    pub namespace: String,
    pub name: String,
    /// Names from `<Key><PropertyRef Name=".."/></Key>`, in declaration order.
    pub keys: Vec<String>,
    pub properties: Vec<RawProperty>,
    pub navigation_properties: Vec<RawNavigationProperty>,
    /// `sap:label`
    pub label: Option<String>,
}

impl RawEntityType {
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    pub fn is_key(&self, property: &str) -> bool {
        self.keys.iter().any(|k| k == property)
    }
}

/// A structural `<Property>` of an entity or complex type.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProperty {
    pub name: String,
    /// The `Type` attribute, e.g. `Edm.String` or `NS.A_TestComplexType`.
    pub type_name: String,
    /// `Nullable`, when present.
    pub nullable: Option<bool>,
    pub max_length: Option<String>,
    pub precision: Option<String>,
    pub scale: Option<String>,
    /// `sap:label`
    pub label: Option<String>,
    /// `sap:quickinfo`
    pub quickinfo: Option<String>,
}

/// A `<NavigationProperty>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNavigationProperty {
    pub name: String,
    /// Qualified name of the association.
    pub relationship: String,
    pub from_role: String,
    pub to_role: String,
}

/// A `<ComplexType>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct RawComplexType {
    pub namespace: String,
    pub name: String,
    pub properties: Vec<RawProperty>,
}

impl RawComplexType {
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

/// An `<Association>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAssociation {
    pub namespace: String,
    pub name: String,
    pub ends: Vec<RawAssociationEnd>,
}

impl RawAssociation {
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// The end playing `role`.
    pub fn end(&self, role: &str) -> Option<&RawAssociationEnd> {
        self.ends.iter().find(|e| e.role == role)
    }
}

/// One `<End>` of an association.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAssociationEnd {
    /// Qualified entity type name.
    pub entity_type: String,
    pub multiplicity: RawMultiplicity,
    pub role: String,
}

/// Multiplicity of an association end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawMultiplicity {
    /// `1`
    One,
    /// `0..1`
    ZeroOrOne,
    /// `*`
    Many,
}

impl RawMultiplicity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::One),
            "0..1" => Some(Self::ZeroOrOne),
            "*" => Some(Self::Many),
            _ => None,
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many)
    }
}

/// An `<EntitySet>` of the entity container.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntitySet {
    pub name: String,
    /// Qualified entity type name.
    pub entity_type: String,
    /// `sap:label`
    pub label: Option<String>,
}

/// A `<FunctionImport>` of the entity container.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFunctionImport {
    pub name: String,
    /// `ReturnType`, absent for operations without a result.
    pub return_type: Option<String>,
    /// `EntitySet` the returned entities belong to.
    pub entity_set: Option<String>,
    /// `m:HttpMethod`, upper case. Defaults to `GET`.
    pub http_method: String,
    /// `sap:label`
    pub label: Option<String>,
    pub parameters: Vec<RawParameter>,
}

/// A function import `<Parameter>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawParameter {
    pub name: String,
    pub type_name: String,
    pub nullable: Option<bool>,
    pub max_length: Option<String>,
    /// `Mode` (`In`, `Out`, `InOut`).
    pub mode: Option<String>,
    /// `sap:label`
    pub label: Option<String>,
}
