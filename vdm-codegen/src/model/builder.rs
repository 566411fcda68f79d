use std::collections::HashMap;

use eyre::Result;
use tracing::{debug, warn};
use vdmgen_edmx::{
    RawComplexType, RawEntitySet, RawEntityType, RawFunctionImport, RawNavigationProperty,
    RawProperty, RawSchema, ServiceMapping, SwaggerDocument, TypeReference,
};
use vdmgen_ir::{
    VdmComplexType, VdmEntity, VdmFunctionImport, VdmFunctionImportReturnType, VdmMultiplicity,
    VdmNavigationProperty, VdmParameter, VdmProperty, VdmServiceMetadata,
};

use super::{ComplexTypeGraph, SemanticModelError};
use crate::{
    edm::EdmType,
    language::EdmTypeMapper,
    names::{NameKind, NameRegistry, speaking_name},
    pipeline::Diagnostic,
};

/// Service path used when neither a mapping nor a swagger document has one.
pub const DEFAULT_SERVICE_PATH_PREFIX: &str = "/sap/opu/odata/sap";

const ALL_FIELDS: &str = "ALL_FIELDS";

/// Everything known about one service before its model is built.
#[derive(Debug, Clone, Copy)]
pub struct ModelInput<'a> {
    pub raw: &'a RawSchema,
    /// File stem of the metadata document, e.g. `API_TEST_SRV`.
    pub original_file_name: &'a str,
    pub mapping: Option<&'a ServiceMapping>,
    pub swagger: Option<&'a SwaggerDocument>,
}

impl<'a> ModelInput<'a> {
    pub fn new(raw: &'a RawSchema, original_file_name: &'a str) -> Self {
        Self {
            raw,
            original_file_name,
            mapping: None,
            swagger: None,
        }
    }

    pub fn with_mapping(mut self, mapping: Option<&'a ServiceMapping>) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_swagger(mut self, swagger: Option<&'a SwaggerDocument>) -> Self {
        self.swagger = swagger;
        self
    }
}

/// A built model plus the non-fatal findings made on the way.
#[derive(Debug)]
pub struct BuiltModel {
    pub service: VdmServiceMetadata,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
struct ComplexNames {
    type_name: String,
    factory_name: String,
    field_type: String,
}

/// Builds the [`VdmServiceMetadata`] of one service.
///
/// Names are requested in a fixed order so that regenerating a service
/// yields the same identifiers: function imports first, then entity classes,
/// complex types and their factories, and finally member names.
pub struct ModelBuilder<'a> {
    input: ModelInput<'a>,
    names: &'a mut NameRegistry,
    mapper: &'a dyn EdmTypeMapper,
    /// Keyed by qualified name.
    complex: HashMap<String, ComplexNames>,
    diagnostics: Vec<Diagnostic>,
}

/// Build a service model, logging non-fatal findings.
pub fn build_service(
    input: ModelInput<'_>,
    names: &mut NameRegistry,
    mapper: &dyn EdmTypeMapper,
) -> Result<VdmServiceMetadata> {
    let built = ModelBuilder::new(input, names, mapper).build()?;
    for diagnostic in &built.diagnostics {
        warn!(service = input.original_file_name, "{}", diagnostic);
    }
    Ok(built.service)
}

impl<'a> ModelBuilder<'a> {
    pub fn new(
        input: ModelInput<'a>,
        names: &'a mut NameRegistry,
        mapper: &'a dyn EdmTypeMapper,
    ) -> Self {
        Self {
            input,
            names,
            mapper,
            complex: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn build(mut self) -> Result<BuiltModel> {
        let raw = self.input.raw;
        let graph = ComplexTypeGraph::new(raw);
        let complex_order: Vec<&RawComplexType> = graph
            .post_order()?
            .into_iter()
            .filter_map(|name| graph.get(name))
            .collect();

        let speaking = speaking_name(self.input.original_file_name);
        let mapping = self.input.mapping;
        let directory_name = self
            .names
            .module_name(&speaking, mapping.map(|m| m.directory_name.as_str()))?;
        let naming = *self.names.naming();

        let function_names = raw
            .function_imports
            .iter()
            .map(|f| self.names.function_name(&f.name))
            .collect::<Result<Vec<_>, _>>()?;

        let entity_sets = self.register_entity_classes()?;
        self.register_complex_types()?;

        // nested complex types come before the types using them
        let complex_types = complex_order
            .into_iter()
            .map(|complex| self.complex_type(complex))
            .collect::<Result<Vec<_>>>()?;

        let entities = entity_sets
            .into_iter()
            .map(|(set, entity_type, class_name)| self.entity(set, entity_type, class_name))
            .collect::<Result<Vec<_>>>()?;

        let function_imports = raw
            .function_imports
            .iter()
            .zip(function_names)
            .map(|(function, name)| self.function_import(function, name))
            .collect::<Result<Vec<_>>>()?;

        let service = VdmServiceMetadata {
            namespace: raw.namespace.clone(),
            original_file_name: self.input.original_file_name.to_string(),
            npm_package_name: mapping
                .map(|m| m.npm_package_name.clone())
                .unwrap_or_else(|| directory_name.clone()),
            service_path: self.service_path(),
            class_name: service_class_name(naming.case(&speaking, NameKind::Class)),
            speaking_module_name: naming.case(&speaking, NameKind::Module),
            documentation_url: self
                .input
                .swagger
                .and_then(SwaggerDocument::documentation_url)
                .map(str::to_string),
            directory_name,
            entities,
            complex_types,
            function_imports,
        };

        debug!(
            service = %service.original_file_name,
            entities = service.entities.len(),
            complex_types = service.complex_types.len(),
            function_imports = service.function_imports.len(),
            "built service model"
        );

        Ok(BuiltModel {
            service,
            diagnostics: self.diagnostics,
        })
    }

    fn service_path(&self) -> String {
        if let Some(mapping) = self.input.mapping {
            return mapping.service_path.clone();
        }
        self.input
            .swagger
            .and_then(|s| s.base_path.clone())
            .unwrap_or_else(|| {
                format!(
                    "{}/{}",
                    DEFAULT_SERVICE_PATH_PREFIX, self.input.original_file_name
                )
            })
    }

    fn register_entity_classes(
        &mut self,
    ) -> Result<Vec<(&'a RawEntitySet, &'a RawEntityType, String)>> {
        let raw = self.input.raw;
        let set_names: Vec<&str> = raw.entity_sets.iter().map(|s| s.name.as_str()).collect();

        let mut sets = Vec::with_capacity(raw.entity_sets.len());
        for set in &raw.entity_sets {
            let entity_type = raw.entity_type(&set.entity_type).ok_or_else(|| {
                SemanticModelError::UnresolvedEntityType {
                    entity_set: set.name.clone(),
                    entity_type: set.entity_type.clone(),
                }
            })?;
            let class_name = self
                .names
                .entity_class_name(&set.name, set_names.iter().copied())?;
            sets.push((set, entity_type, class_name));
        }

        for entity_type in &raw.entity_types {
            if raw.entity_sets_of(&entity_type.qualified_name()).next().is_none() {
                debug!(
                    service = self.input.original_file_name,
                    entity_type = %entity_type.name,
                    "excluding entity type without entity set"
                );
            }
        }
        Ok(sets)
    }

    fn register_complex_types(&mut self) -> Result<()> {
        for complex in &self.input.raw.complex_types {
            let qualified = complex.qualified_name();
            let type_name = self.names.complex_type_name(&qualified, &complex.name)?;
            let factory_name = self.names.factory_name(&qualified, &type_name)?;
            let field_type = self.mapper.complex_field_type(&type_name);
            self.complex.insert(
                qualified,
                ComplexNames {
                    type_name,
                    factory_name,
                    field_type,
                },
            );
        }
        Ok(())
    }

    fn complex_type(&mut self, complex: &RawComplexType) -> Result<VdmComplexType> {
        let qualified_name = complex.qualified_name();
        let (type_name, factory_name, field_type) = match self.complex.get(&qualified_name) {
            Some(names) => (
                names.type_name.clone(),
                names.factory_name.clone(),
                names.field_type.clone(),
            ),
            None => {
                return Err(SemanticModelError::UnresolvedComplexType {
                    owner: complex.name.clone(),
                    property: String::new(),
                    complex_type: qualified_name,
                }
                .into());
            }
        };

        let properties = complex
            .properties
            .iter()
            .map(|p| self.property(&type_name, &complex.namespace, &complex.name, p, false))
            .collect::<Result<Vec<_>>>()?;

        Ok(VdmComplexType {
            original_name: complex.name.clone(),
            description: self.type_description(&complex.namespace, &complex.name, None),
            qualified_name,
            type_name,
            factory_name,
            field_type,
            properties,
        })
    }

    fn entity(
        &mut self,
        set: &RawEntitySet,
        entity_type: &RawEntityType,
        class_name: String,
    ) -> Result<VdmEntity> {
        self.names
            .reserve(NameKind::StaticProperty, Some(&class_name), ALL_FIELDS);

        let properties = entity_type
            .properties
            .iter()
            .map(|p| {
                self.property(
                    &class_name,
                    &entity_type.namespace,
                    &entity_type.name,
                    p,
                    entity_type.is_key(&p.name),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let keys = properties.iter().filter(|p| p.is_key).cloned().collect();

        let mut navigation_properties = Vec::new();
        for nav in &entity_type.navigation_properties {
            if let Some(nav) = self.navigation_property(&class_name, entity_type, nav)? {
                navigation_properties.push(nav);
            }
        }

        let label = entity_type.label.as_deref().or(set.label.as_deref());
        Ok(VdmEntity {
            entity_set_name: set.name.clone(),
            entity_type_name: entity_type.name.clone(),
            description: self.type_description(&entity_type.namespace, &entity_type.name, label),
            class_name,
            properties,
            keys,
            navigation_properties,
        })
    }

    fn property(
        &mut self,
        owner: &str,
        namespace: &str,
        type_name: &str,
        raw: &RawProperty,
        is_key: bool,
    ) -> Result<VdmProperty> {
        let reference = TypeReference::parse(&raw.type_name)?;
        let (edm_type, js_type, field_type, is_complex) = match reference.element() {
            TypeReference::Primitive(name) => {
                let mapping = self.mapper.map_primitive(name)?;
                (name.clone(), mapping.target_type, mapping.field_type, false)
            }
            other => {
                let qualified = other.qualified_name().unwrap_or_default();
                let Some(complex) = self.complex.get(&qualified) else {
                    return Err(SemanticModelError::UnresolvedComplexType {
                        owner: type_name.to_string(),
                        property: raw.name.clone(),
                        complex_type: qualified,
                    }
                    .into());
                };
                let js_type = complex.type_name.clone();
                let field_type = complex.field_type.clone();
                (qualified, js_type, field_type, true)
            }
        };

        let swagger = self
            .input
            .swagger
            .and_then(|s| s.property_description(namespace, type_name, &raw.name));
        let description = swagger
            .or(raw.quickinfo.as_deref())
            .or(raw.label.as_deref())
            .unwrap_or_default()
            .to_string();

        Ok(VdmProperty {
            instance_property_name: self.names.instance_property_name(owner, &raw.name)?,
            static_property_name: self.names.static_property_name(owner, &raw.name)?,
            property_name_as_param: self.names.parameter_name(owner, &raw.name)?,
            original_name: raw.name.clone(),
            edm_type,
            js_type,
            field_type,
            nullable: !is_key && raw.nullable.unwrap_or(true),
            is_complex,
            is_key,
            description,
            max_length: raw.max_length.clone(),
            precision: raw.precision.clone(),
            scale: raw.scale.clone(),
        })
    }

    fn navigation_property(
        &mut self,
        owner: &str,
        entity_type: &RawEntityType,
        nav: &RawNavigationProperty,
    ) -> Result<Option<VdmNavigationProperty>> {
        let raw = self.input.raw;
        let location = format!("{}.{}", entity_type.name, nav.name);
        let Some(end) = raw
            .association(&nav.relationship)
            .and_then(|association| association.end(&nav.to_role))
        else {
            let reason = format!("role '{}' of '{}' is not declared", nav.to_role, nav.relationship);
            self.drop_navigation(location, reason);
            return Ok(None);
        };
        let Some(target_set) = raw.entity_sets_of(&end.entity_type).next() else {
            let reason = format!("target entity type '{}' has no entity set", end.entity_type);
            self.drop_navigation(location, reason);
            return Ok(None);
        };
        let Some(target_class) = self
            .names
            .lookup(NameKind::Class, None, &target_set.name)
            .map(str::to_string)
        else {
            let reason = format!("entity set '{}' has no class", target_set.name);
            self.drop_navigation(location, reason);
            return Ok(None);
        };

        Ok(Some(VdmNavigationProperty {
            instance_property_name: self.names.instance_property_name(owner, &nav.name)?,
            static_property_name: self.names.static_property_name(owner, &nav.name)?,
            property_name_as_param: self.names.parameter_name(owner, &nav.name)?,
            original_name: nav.name.clone(),
            multiplicity: if end.multiplicity.is_many() {
                VdmMultiplicity::Many
            } else {
                VdmMultiplicity::One
            },
            to_entity_class_name: target_class,
            to_entity_set_name: target_set.name.clone(),
        }))
    }

    fn drop_navigation(&mut self, location: String, reason: String) {
        self.diagnostics.push(
            Diagnostic::warning(
                "build",
                format!("dropping navigation property '{}': {}", location, reason),
            )
            .at(location),
        );
    }

    fn function_import(
        &mut self,
        function: &RawFunctionImport,
        function_name: String,
    ) -> Result<VdmFunctionImport> {
        let parameters_type_name = self.names.resolve_keyed(
            NameKind::Class,
            None,
            &format!("{}()", function.name),
            &format!("{}Parameters", function_name),
            None,
        )?;

        let parameters = function
            .parameters
            .iter()
            .map(|p| -> Result<VdmParameter> {
                let TypeReference::Primitive(edm_type) = TypeReference::parse(&p.type_name)? else {
                    return Err(SemanticModelError::UnsupportedParameterType {
                        function_import: function.name.clone(),
                        parameter: p.name.clone(),
                        parameter_type: p.type_name.clone(),
                    }
                    .into());
                };
                let mapping = self.mapper.map_primitive(&edm_type)?;
                Ok(VdmParameter {
                    parameter_name: self.names.parameter_name(&function_name, &p.name)?,
                    original_name: p.name.clone(),
                    edm_type,
                    js_type: mapping.target_type,
                    nullable: p.nullable.unwrap_or(false),
                    description: p.label.clone().unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(VdmFunctionImport {
            original_name: function.name.clone(),
            return_type: self.return_type(function)?,
            function_name,
            parameters_type_name,
            http_method: function.http_method.clone(),
            description: function.label.clone().unwrap_or_default(),
            parameters,
        })
    }

    fn return_type(&self, function: &RawFunctionImport) -> Result<VdmFunctionImportReturnType> {
        let Some(return_type) = function.return_type.as_deref() else {
            return Ok(VdmFunctionImportReturnType::Void);
        };
        let reference = TypeReference::parse(return_type)?;
        let is_multi = reference.is_collection();

        if let TypeReference::Primitive(name) = reference.element() {
            let edm: EdmType = name.parse()?;
            return Ok(VdmFunctionImportReturnType::EdmType {
                edm_type: name.clone(),
                js_type: self.mapper.target_type(edm).to_string(),
                builder_function: self.mapper.builder_function(edm),
                is_multi,
            });
        }

        let qualified = reference.qualified_name().unwrap_or_default();
        if let Some(complex) = self.complex.get(&qualified) {
            return Ok(VdmFunctionImportReturnType::ComplexType {
                type_name: complex.type_name.clone(),
                factory_name: complex.factory_name.clone(),
                builder_function: self.mapper.complex_builder_function(&complex.type_name),
                is_multi,
            });
        }

        let raw = self.input.raw;
        if raw.entity_type(&qualified).is_none() {
            return Err(SemanticModelError::UnresolvedReturnType {
                function_import: function.name.clone(),
                return_type: return_type.to_string(),
            }
            .into());
        }

        let entity_set = function
            .entity_set
            .as_deref()
            .and_then(|name| raw.entity_set(name))
            .filter(|set| set.entity_type == qualified)
            .or_else(|| raw.entity_sets_of(&qualified).next());
        let entity_class_name = entity_set
            .and_then(|set| self.names.lookup(NameKind::Class, None, &set.name))
            .ok_or_else(|| SemanticModelError::UnresolvedEntitySet {
                function_import: function.name.clone(),
                entity_type: qualified.clone(),
            })?;

        Ok(VdmFunctionImportReturnType::Entity {
            entity_class_name: entity_class_name.to_string(),
            is_multi,
        })
    }

    fn type_description(&self, namespace: &str, type_name: &str, label: Option<&str>) -> String {
        self.input
            .swagger
            .and_then(|s| s.type_description(namespace, type_name))
            .or(label)
            .unwrap_or_default()
            .to_string()
    }
}

/// `TestService` for `TEST_SERVICE`, `ZcustomService` for `ZCUSTOM`.
fn service_class_name(pascal: String) -> String {
    if pascal.ends_with("Service") {
        pascal
    } else {
        format!("{}Service", pascal)
    }
}
