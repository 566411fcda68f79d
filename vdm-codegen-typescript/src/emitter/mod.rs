//! Turns a service model into the files of its TypeScript package.
//!
//! Every file is built in memory as a [`CodeFile`]; nothing here touches the
//! filesystem. Imports are registered per declaration and merged per file.

mod complex_type;
mod entity;
mod function_imports;
mod index;
mod request_builder;

use eyre::Result;
use tracing::debug;
use vdmgen_codegen::{edm::EdmType, generation::ImportCollector};
use vdmgen_ir::{VdmProperty, VdmServiceMetadata};

use crate::{
    code_file::{CodeFile, EmittedFile},
    files::{PackageJson, TsConfig},
    type_mapper::TypeScriptTypeMapper,
};

pub(crate) use complex_type::complex_type_file;
pub(crate) use entity::entity_file;
pub(crate) use function_imports::{FUNCTION_IMPORTS_MODULE, function_imports_file};
pub(crate) use index::index_file;
pub(crate) use request_builder::{request_builder_file, request_builder_name};

/// Version written to package.json when none is configured.
pub const DEFAULT_PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Switches for [`emit_service`].
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Also emit a package.json per service.
    pub generate_package_json: bool,
    /// Version for package.json files, [`DEFAULT_PACKAGE_VERSION`] otherwise.
    pub version: Option<String>,
}

impl EmitOptions {
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_PACKAGE_VERSION)
    }
}

/// Emit every file of one service, paths prefixed with its directory name.
///
/// Fails with [`vdmgen_codegen::edm::UnknownEdmTypeError`] when a property or
/// parameter carries a primitive type outside the EDM set.
pub fn emit_service(service: &VdmServiceMetadata, options: &EmitOptions) -> Result<Vec<EmittedFile>> {
    let dir = &service.directory_name;
    let path = |module: &str| format!("{}/{}.ts", dir, module);
    let mut files = Vec::new();
    let mut modules = Vec::new();

    for entity in &service.entities {
        files.push(EmittedFile::source(
            path(&entity.class_name),
            entity_file(service, entity)?,
        ));
        modules.push(entity.class_name.clone());
    }

    for entity in &service.entities {
        let name = request_builder_name(entity);
        files.push(EmittedFile::source(path(&name), request_builder_file(entity)?));
        modules.push(name);
    }

    for complex_type in &service.complex_types {
        files.push(EmittedFile::source(
            path(&complex_type.type_name),
            complex_type_file(complex_type)?,
        ));
        modules.push(complex_type.type_name.clone());
    }

    if !service.function_imports.is_empty() {
        files.push(EmittedFile::source(
            path(FUNCTION_IMPORTS_MODULE),
            function_imports_file(service)?,
        ));
        modules.push(FUNCTION_IMPORTS_MODULE.to_string());
    }

    files.push(EmittedFile::source(path("index"), index_file(&modules)));

    files.push(EmittedFile::text(
        format!("{}/tsconfig.json", dir),
        TsConfig.render(),
    ));

    if options.generate_package_json {
        let package = PackageJson::service(
            &service.npm_package_name,
            options.version(),
            &service.original_file_name,
        )
        .with_homepage(service.documentation_url.clone());
        files.push(EmittedFile::text(
            format!("{}/package.json", dir),
            package.render()?,
        ));
    }

    debug!(
        service = %service.original_file_name,
        files = files.len(),
        "emitted service files"
    );
    Ok(files)
}

/// The package.json of an aggregator package depending on `packages`.
pub fn emit_aggregator<'a>(
    directory_name: &str,
    npm_package_name: &str,
    packages: impl IntoIterator<Item = &'a str>,
    options: &EmitOptions,
) -> Result<EmittedFile> {
    let package = PackageJson::aggregator(npm_package_name, options.version(), packages);
    Ok(EmittedFile::text(
        format!("{}/package.json", directory_name),
        package.render()?,
    ))
}

/// Module specifier of a file of the same service.
fn sibling(module: &str) -> String {
    format!("./{}", module)
}

/// Single-quoted TypeScript string literal.
fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// The primitive type of a non-complex property.
fn primitive(edm_type: &str) -> Result<EdmType> {
    Ok(edm_type.parse::<EdmType>()?)
}

/// Import the target type of a primitive, if it is not built in.
fn import_target_type(imports: &mut ImportCollector, js_type: &str) {
    if let Some(module) = TypeScriptTypeMapper::type_module(js_type) {
        imports.add(module, js_type);
    }
}

/// Doc text of a property: description, length facet and nullability.
fn property_doc(property: &VdmProperty) -> String {
    let mut lines = Vec::new();
    if !property.description.is_empty() {
        lines.push(property.description.clone());
    }
    if let Some(max_length) = &property.max_length {
        lines.push(format!("Maximum length: {}.", max_length));
    }
    if property.nullable {
        lines.push("@nullable".to_string());
    }
    lines.join("\n")
}

/// `{ Key: value, .. }` over the keys of an entity, one entry per line.
fn key_object<'a>(
    keys: impl IntoIterator<Item = &'a VdmProperty>,
    value: impl Fn(&VdmProperty) -> String,
) -> String {
    let entries: Vec<String> = keys
        .into_iter()
        .map(|key| format!("  {}: {}", key.original_name, value(key)))
        .collect();
    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{\n{}\n}}", entries.join(",\n"))
    }
}

/// Start a file from merged imports.
fn code_file(imports: &ImportCollector) -> CodeFile {
    CodeFile::new().imports(imports)
}
