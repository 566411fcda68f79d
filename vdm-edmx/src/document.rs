//! Serde mirror of the EDMX elements the generator reads.
//!
//! quick-xml matches element and attribute names by local name, so
//! `edmx:DataServices`, `m:HttpMethod` and `sap:label` need no prefix here.
//! Every attribute is optional at this level; required ones are checked
//! while converting into the raw schema so the error can name the element.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct Edmx {
    #[serde(rename = "DataServices", default)]
    pub data_services: Vec<DataServices>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataServices {
    #[serde(rename = "Schema", default)]
    pub schemas: Vec<Schema>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Schema {
    #[serde(rename = "@Namespace")]
    pub namespace: Option<String>,
    #[serde(rename = "@Alias")]
    pub alias: Option<String>,
    #[serde(rename = "EntityType", default)]
    pub entity_types: Vec<EntityType>,
    #[serde(rename = "ComplexType", default)]
    pub complex_types: Vec<ComplexType>,
    #[serde(rename = "Association", default)]
    pub associations: Vec<Association>,
    #[serde(rename = "EntityContainer", default)]
    pub entity_containers: Vec<EntityContainer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntityType {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "@label")]
    pub label: Option<String>,
    #[serde(rename = "Key")]
    pub key: Option<Key>,
    #[serde(rename = "Property", default)]
    pub properties: Vec<Property>,
    #[serde(rename = "NavigationProperty", default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Key {
    #[serde(rename = "PropertyRef", default)]
    pub property_refs: Vec<PropertyRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PropertyRef {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Property {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "@Type")]
    pub type_name: Option<String>,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<String>,
    #[serde(rename = "@MaxLength")]
    pub max_length: Option<String>,
    #[serde(rename = "@Precision")]
    pub precision: Option<String>,
    #[serde(rename = "@Scale")]
    pub scale: Option<String>,
    #[serde(rename = "@label")]
    pub label: Option<String>,
    #[serde(rename = "@quickinfo")]
    pub quickinfo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NavigationProperty {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "@Relationship")]
    pub relationship: Option<String>,
    #[serde(rename = "@FromRole")]
    pub from_role: Option<String>,
    #[serde(rename = "@ToRole")]
    pub to_role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComplexType {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "Property", default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Association {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "End", default)]
    pub ends: Vec<AssociationEnd>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssociationEnd {
    #[serde(rename = "@Type")]
    pub type_name: Option<String>,
    #[serde(rename = "@Multiplicity")]
    pub multiplicity: Option<String>,
    #[serde(rename = "@Role")]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntityContainer {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "EntitySet", default)]
    pub entity_sets: Vec<EntitySet>,
    #[serde(rename = "FunctionImport", default)]
    pub function_imports: Vec<FunctionImport>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntitySet {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "@EntityType")]
    pub entity_type: Option<String>,
    #[serde(rename = "@label")]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FunctionImport {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "@ReturnType")]
    pub return_type: Option<String>,
    #[serde(rename = "@EntitySet")]
    pub entity_set: Option<String>,
    #[serde(rename = "@HttpMethod")]
    pub http_method: Option<String>,
    #[serde(rename = "@label")]
    pub label: Option<String>,
    #[serde(rename = "Parameter", default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Parameter {
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "@Type")]
    pub type_name: Option<String>,
    #[serde(rename = "@Mode")]
    pub mode: Option<String>,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<String>,
    #[serde(rename = "@MaxLength")]
    pub max_length: Option<String>,
    #[serde(rename = "@label")]
    pub label: Option<String>,
}

/// Parse a `Nullable`-style boolean attribute.
pub(crate) fn parse_bool(value: Option<&str>) -> Option<bool> {
    match value.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("true") => Some(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
