use std::collections::HashMap;

use tracing::debug;

use crate::{
    document::{self, Edmx, parse_bool},
    error::{Result, SchemaParseError, SourceContext, SourceSet},
    raw::*,
    type_ref::TypeReference,
};

/// One metadata document of a service.
#[derive(Debug, Clone, Copy)]
pub struct SchemaSource<'a> {
    /// File name used in diagnostics.
    pub name: &'a str,
    pub text: &'a str,
}

impl<'a> SchemaSource<'a> {
    pub fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }
}

/// Parse a single metadata document.
pub fn parse_str(text: &str, name: &str) -> Result<RawSchema> {
    parse_documents(&[SchemaSource::new(name, text)])
}

/// Parse and merge every schema of the given documents into one [`RawSchema`].
///
/// Documents are processed in order. The service namespace is the one of the
/// schema holding the entity container, or of the first schema if none does.
pub fn parse_documents(sources: &[SchemaSource<'_>]) -> Result<RawSchema> {
    let mut set = SourceSet::default();
    let mut schemas = Vec::new();

    for source in sources {
        let ctx = SourceContext::new(source.text, source.name);
        let edmx: Edmx = quick_xml::de::from_str(source.text).map_err(|e| {
            Box::new(SchemaParseError::Xml {
                name: source.name.to_string(),
                src: ctx.named_source(),
                source: e,
            })
        })?;
        schemas.extend(edmx.data_services.into_iter().flat_map(|ds| ds.schemas));
        set.push(ctx);
    }

    if schemas.is_empty() {
        return Err(Box::new(SchemaParseError::MissingSchema {
            documents: set.filenames(),
        }));
    }

    let raw = Merger::new(&set).merge(schemas)?;
    debug!(
        namespace = %raw.namespace,
        entity_types = raw.entity_types.len(),
        complex_types = raw.complex_types.len(),
        entity_sets = raw.entity_sets.len(),
        function_imports = raw.function_imports.len(),
        "parsed service metadata"
    );
    Ok(raw)
}

struct Merger<'a> {
    sources: &'a SourceSet,
    aliases: HashMap<String, String>,
    declared: HashMap<(&'static str, String), String>,
    raw: RawSchema,
}

impl<'a> Merger<'a> {
    fn new(sources: &'a SourceSet) -> Self {
        Self {
            sources,
            aliases: HashMap::new(),
            declared: HashMap::new(),
            raw: RawSchema::default(),
        }
    }

    fn merge(mut self, schemas: Vec<document::Schema>) -> Result<RawSchema> {
        let mut namespaces = Vec::with_capacity(schemas.len());
        for schema in &schemas {
            let namespace = schema.namespace.clone().ok_or_else(|| {
                self.missing("Schema", "Namespace", "Schema", "schema".to_string())
            })?;
            if let Some(alias) = &schema.alias {
                self.aliases.insert(alias.clone(), namespace.clone());
            }
            namespaces.push(namespace);
        }

        self.raw.namespace = schemas
            .iter()
            .zip(&namespaces)
            .find(|(schema, _)| !schema.entity_containers.is_empty())
            .or_else(|| schemas.iter().zip(&namespaces).next())
            .map(|(_, ns)| ns.clone())
            .unwrap_or_default();
        self.raw.schema_namespaces = namespaces.clone();

        for (schema, namespace) in schemas.into_iter().zip(namespaces) {
            for entity_type in schema.entity_types {
                self.entity_type(entity_type, &namespace)?;
            }
            for complex_type in schema.complex_types {
                self.complex_type(complex_type, &namespace)?;
            }
            for association in schema.associations {
                self.association(association, &namespace)?;
            }
            for container in schema.entity_containers {
                self.container(container, &namespace)?;
            }
        }

        self.resolve()?;
        Ok(self.raw)
    }

    fn missing(
        &self,
        element: &'static str,
        attribute: &'static str,
        owner: &str,
        context: String,
    ) -> Box<SchemaParseError> {
        let (src, span) = self.sources.locate_text(owner);
        Box::new(SchemaParseError::MissingAttribute {
            src,
            span,
            element,
            attribute,
            context,
        })
    }

    fn unresolved(&self, reference: &str, context: String) -> Box<SchemaParseError> {
        let (src, span) = self.sources.locate_text(&format!("\"{}\"", reference));
        Box::new(SchemaParseError::UnresolvedType {
            src,
            span,
            reference: reference.to_string(),
            context,
        })
    }

    fn declare(&mut self, kind: &'static str, name: &str, namespace: &str) -> Result<()> {
        if let Some(first) = self.declared.get(&(kind, name.to_string())) {
            let (src, _) = self.sources.locate(name);
            let span = self.second_occurrence(name);
            return Err(Box::new(SchemaParseError::DuplicateName {
                src,
                span,
                kind,
                name: name.to_string(),
                first: first.clone(),
                second: namespace.to_string(),
            }));
        }
        self.declared
            .insert((kind, name.to_string()), namespace.to_string());
        Ok(())
    }

    fn second_occurrence(&self, name: &str) -> Option<miette::SourceSpan> {
        let needle = format!("Name=\"{}\"", name);
        let (src, first) = self.sources.locate_text(&needle);
        let first = first?;
        let text = src.inner();
        let from = first.offset() + first.len();
        text[from..]
            .find(&needle)
            .map(|offset| miette::SourceSpan::from((from + offset, needle.len())))
    }

    /// Parse a type reference and replace schema aliases.
    fn type_ref(&self, reference: &str, context: impl FnOnce() -> String) -> Result<TypeReference> {
        let resolve = |ns: &str| self.aliases.get(ns).cloned();
        TypeReference::parse(reference)
            .map(|parsed| parsed.dealias(&resolve))
            .map_err(|reason| {
                let (src, span) = self.sources.locate_text(&format!("\"{}\"", reference));
                Box::new(SchemaParseError::InvalidTypeReference {
                    src,
                    span,
                    reference: reference.to_string(),
                    context: context(),
                    reason,
                })
            })
    }

    fn property(&self, property: document::Property, owner: &str) -> Result<RawProperty> {
        let name = property.name.ok_or_else(|| {
            self.missing("Property", "Name", owner, format!("'{}'", owner))
        })?;
        let type_name = property.type_name.ok_or_else(|| {
            self.missing(
                "Property",
                "Type",
                &name,
                format!("property '{}' of '{}'", name, owner),
            )
        })?;
        let type_name = self
            .type_ref(&type_name, || format!("property '{}' of '{}'", name, owner))?
            .to_string();

        Ok(RawProperty {
            nullable: parse_bool(property.nullable.as_deref()),
            name,
            type_name,
            max_length: property.max_length,
            precision: property.precision,
            scale: property.scale,
            label: property.label,
            quickinfo: property.quickinfo,
        })
    }

    fn entity_type(&mut self, entity_type: document::EntityType, namespace: &str) -> Result<()> {
        let name = entity_type.name.ok_or_else(|| {
            self.missing(
                "EntityType",
                "Name",
                "<EntityType",
                format!("schema '{}'", namespace),
            )
        })?;
        self.declare("entity type", &name, namespace)?;

        let properties = entity_type
            .properties
            .into_iter()
            .map(|p| self.property(p, &name))
            .collect::<Result<Vec<_>>>()?;

        let mut keys = Vec::new();
        for property_ref in entity_type.key.map(|k| k.property_refs).unwrap_or_default() {
            let key = property_ref.name.ok_or_else(|| {
                self.missing(
                    "PropertyRef",
                    "Name",
                    &name,
                    format!("key of '{}'", name),
                )
            })?;
            if !properties.iter().any(|p| p.name == key) {
                let (src, span) = self.sources.locate_text(&format!("PropertyRef Name=\"{}\"", key));
                return Err(Box::new(SchemaParseError::UnknownKeyProperty {
                    src,
                    span,
                    entity_type: name,
                    key,
                }));
            }
            keys.push(key);
        }

        let mut navigation_properties = Vec::new();
        for nav in entity_type.navigation_properties {
            let nav_name = nav.name.ok_or_else(|| {
                self.missing("NavigationProperty", "Name", &name, format!("'{}'", name))
            })?;
            let context = || format!("navigation property '{}' of '{}'", nav_name, name);
            let relationship = nav.relationship.ok_or_else(|| {
                self.missing("NavigationProperty", "Relationship", &nav_name, context())
            })?;
            let from_role = nav.from_role.ok_or_else(|| {
                self.missing("NavigationProperty", "FromRole", &nav_name, context())
            })?;
            let to_role = nav.to_role.ok_or_else(|| {
                self.missing("NavigationProperty", "ToRole", &nav_name, context())
            })?;
            let relationship = self.type_ref(&relationship, context)?.to_string();
            navigation_properties.push(RawNavigationProperty {
                name: nav_name,
                relationship,
                from_role,
                to_role,
            });
        }

        self.raw.entity_types.push(RawEntityType {
            namespace: namespace.to_string(),
            name,
            keys,
            properties,
            navigation_properties,
            label: entity_type.label,
        });
        Ok(())
    }

    fn complex_type(&mut self, complex_type: document::ComplexType, namespace: &str) -> Result<()> {
        let name = complex_type.name.ok_or_else(|| {
            self.missing(
                "ComplexType",
                "Name",
                "<ComplexType",
                format!("schema '{}'", namespace),
            )
        })?;
        self.declare("complex type", &name, namespace)?;

        let properties = complex_type
            .properties
            .into_iter()
            .map(|p| self.property(p, &name))
            .collect::<Result<Vec<_>>>()?;

        self.raw.complex_types.push(RawComplexType {
            namespace: namespace.to_string(),
            name,
            properties,
        });
        Ok(())
    }

    fn association(&mut self, association: document::Association, namespace: &str) -> Result<()> {
        let name = association.name.ok_or_else(|| {
            self.missing(
                "Association",
                "Name",
                "<Association",
                format!("schema '{}'", namespace),
            )
        })?;
        self.declare("association", &name, namespace)?;

        let mut ends = Vec::with_capacity(association.ends.len());
        for end in association.ends {
            let context = || format!("association '{}'", name);
            let type_name = end
                .type_name
                .ok_or_else(|| self.missing("End", "Type", &name, context()))?;
            let role = end
                .role
                .ok_or_else(|| self.missing("End", "Role", &name, context()))?;
            let multiplicity = end
                .multiplicity
                .ok_or_else(|| self.missing("End", "Multiplicity", &name, context()))?;
            let parsed = RawMultiplicity::parse(&multiplicity).ok_or_else(|| {
                let (src, span) = self.sources.locate(&name);
                Box::new(SchemaParseError::InvalidMultiplicity {
                    src,
                    span,
                    association: name.clone(),
                    multiplicity: multiplicity.clone(),
                })
            })?;
            let entity_type = self.type_ref(&type_name, context)?.to_string();
            ends.push(RawAssociationEnd {
                entity_type,
                multiplicity: parsed,
                role,
            });
        }

        self.raw.associations.push(RawAssociation {
            namespace: namespace.to_string(),
            name,
            ends,
        });
        Ok(())
    }

    fn container(&mut self, container: document::EntityContainer, namespace: &str) -> Result<()> {
        let container_name = container.name.unwrap_or_else(|| namespace.to_string());

        for set in container.entity_sets {
            let name = set.name.ok_or_else(|| {
                self.missing(
                    "EntitySet",
                    "Name",
                    "<EntitySet",
                    format!("entity container '{}'", container_name),
                )
            })?;
            self.declare("entity set", &name, namespace)?;
            let context = || format!("entity set '{}'", name);
            let entity_type = set
                .entity_type
                .ok_or_else(|| self.missing("EntitySet", "EntityType", &name, context()))?;
            let entity_type = self.type_ref(&entity_type, context)?.to_string();
            self.raw.entity_sets.push(RawEntitySet {
                name,
                entity_type,
                label: set.label,
            });
        }

        for function in container.function_imports {
            let name = function.name.ok_or_else(|| {
                self.missing(
                    "FunctionImport",
                    "Name",
                    "<FunctionImport",
                    format!("entity container '{}'", container_name),
                )
            })?;
            self.declare("function import", &name, namespace)?;

            let return_type = match function.return_type {
                Some(rt) => Some(
                    self.type_ref(&rt, || format!("return type of function import '{}'", name))?
                        .to_string(),
                ),
                None => None,
            };

            let mut parameters = Vec::with_capacity(function.parameters.len());
            for parameter in function.parameters {
                let param_name = parameter.name.ok_or_else(|| {
                    self.missing(
                        "Parameter",
                        "Name",
                        &name,
                        format!("function import '{}'", name),
                    )
                })?;
                let context = || format!("parameter '{}' of function import '{}'", param_name, name);
                let type_name = parameter
                    .type_name
                    .ok_or_else(|| self.missing("Parameter", "Type", &param_name, context()))?;
                let type_name = self.type_ref(&type_name, context)?.to_string();
                parameters.push(RawParameter {
                    nullable: parse_bool(parameter.nullable.as_deref()),
                    name: param_name,
                    type_name,
                    max_length: parameter.max_length,
                    mode: parameter.mode,
                    label: parameter.label,
                });
            }

            self.raw.function_imports.push(RawFunctionImport {
                name,
                return_type,
                entity_set: function.entity_set,
                http_method: function
                    .http_method
                    .map(|m| m.trim().to_ascii_uppercase())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "GET".to_string()),
                label: function.label,
                parameters,
            });
        }
        Ok(())
    }

    /// Check that every cross reference points at a declared construct.
    fn resolve(&self) -> Result<()> {
        let raw = &self.raw;

        for entity_type in &raw.entity_types {
            for property in &entity_type.properties {
                self.resolve_structural(&property.type_name, || {
                    format!("property '{}' of '{}'", property.name, entity_type.name)
                })?;
            }

            for nav in &entity_type.navigation_properties {
                let Some(association) = raw.association(&nav.relationship) else {
                    let (src, span) = self.sources.locate(&nav.name);
                    return Err(Box::new(SchemaParseError::UnresolvedAssociation {
                        src,
                        span,
                        entity_type: entity_type.name.clone(),
                        property: nav.name.clone(),
                        relationship: nav.relationship.clone(),
                    }));
                };
                for role in [&nav.from_role, &nav.to_role] {
                    if association.end(role).is_none() {
                        let (src, span) = self.sources.locate(&nav.name);
                        return Err(Box::new(SchemaParseError::UnresolvedRole {
                            src,
                            span,
                            entity_type: entity_type.name.clone(),
                            property: nav.name.clone(),
                            association: association.name.clone(),
                            role: role.clone(),
                        }));
                    }
                }
            }
        }

        for complex_type in &raw.complex_types {
            for property in &complex_type.properties {
                self.resolve_structural(&property.type_name, || {
                    format!("property '{}' of '{}'", property.name, complex_type.name)
                })?;
            }
        }

        for association in &raw.associations {
            for end in &association.ends {
                if raw.entity_type(&end.entity_type).is_none() {
                    return Err(self.unresolved(
                        &end.entity_type,
                        format!("association '{}'", association.name),
                    ));
                }
            }
        }

        for set in &raw.entity_sets {
            if raw.entity_type(&set.entity_type).is_none() {
                return Err(self.unresolved(&set.entity_type, format!("entity set '{}'", set.name)));
            }
        }

        for function in &raw.function_imports {
            for parameter in &function.parameters {
                self.resolve_declared(&parameter.type_name, || {
                    format!(
                        "parameter '{}' of function import '{}'",
                        parameter.name, function.name
                    )
                })?;
            }
            if let Some(return_type) = &function.return_type {
                self.resolve_declared(return_type, || {
                    format!("function import '{}'", function.name)
                })?;
            }
            if let Some(entity_set) = &function.entity_set
                && raw.entity_set(entity_set).is_none()
            {
                return Err(self.unresolved(
                    entity_set,
                    format!("entity set of function import '{}'", function.name),
                ));
            }
        }
        Ok(())
    }

    /// Structural types must be primitives or declared complex types.
    fn resolve_structural(&self, type_name: &str, context: impl FnOnce() -> String) -> Result<()> {
        let parsed = self.type_ref(type_name, String::new)?;
        match parsed.qualified_name() {
            Some(qualified) if self.raw.complex_type(&qualified).is_none() => {
                Err(self.unresolved(type_name, context()))
            }
            _ => Ok(()),
        }
    }

    /// Function import types may also name entity types.
    fn resolve_declared(&self, type_name: &str, context: impl FnOnce() -> String) -> Result<()> {
        let parsed = self.type_ref(type_name, String::new)?;
        match parsed.qualified_name() {
            Some(qualified)
                if self.raw.entity_type(&qualified).is_none()
                    && self.raw.complex_type(&qualified).is_none() =>
            {
                Err(self.unresolved(type_name, context()))
            }
            _ => Ok(()),
        }
    }
}
