//! `function-imports.ts`: one parameters interface and one request builder
//! function per function import.

use eyre::Result;
use vdmgen_codegen::generation::ImportCollector;
use vdmgen_ir::{VdmFunctionImport, VdmFunctionImportReturnType, VdmServiceMetadata};

use super::{import_target_type, primitive, sibling, string_literal};
use crate::{
    ast::{Const, Fn, Interface, InterfaceField, Param},
    code_file::CodeFile,
    type_mapper::CORE_MODULE,
};

pub(crate) const FUNCTION_IMPORTS_MODULE: &str = "function-imports";

/// Runtime helper turning the response body into the return type.
fn transformer(return_type: &VdmFunctionImportReturnType) -> &'static str {
    use VdmFunctionImportReturnType::*;
    match return_type {
        EdmType { is_multi: false, .. } => "transformReturnValueForEdmType",
        EdmType { is_multi: true, .. } => "transformReturnValueForEdmTypeList",
        Entity { is_multi: false, .. } => "transformReturnValueForEntity",
        Entity { is_multi: true, .. } => "transformReturnValueForEntityList",
        ComplexType { is_multi: false, .. } => "transformReturnValueForComplexType",
        ComplexType { is_multi: true, .. } => "transformReturnValueForComplexTypeList",
        Void => "transformReturnValueForUndefined",
    }
}

/// Second argument of the transformer.
fn transformer_argument(return_type: &VdmFunctionImportReturnType) -> &str {
    match return_type {
        VdmFunctionImportReturnType::EdmType {
            builder_function, ..
        }
        | VdmFunctionImportReturnType::ComplexType {
            builder_function, ..
        } => builder_function,
        VdmFunctionImportReturnType::Entity {
            entity_class_name, ..
        } => entity_class_name,
        VdmFunctionImportReturnType::Void => "(val) => undefined",
    }
}

/// The TypeScript type a request resolves to.
fn return_type_name(return_type: &VdmFunctionImportReturnType) -> String {
    if return_type.is_multi() {
        format!("{}[]", return_type.type_name())
    } else {
        return_type.type_name().to_string()
    }
}

fn import_return_type(imports: &mut ImportCollector, return_type: &VdmFunctionImportReturnType) {
    imports.add(CORE_MODULE, transformer(return_type));
    match return_type {
        VdmFunctionImportReturnType::EdmType { js_type, .. } => {
            imports.add(CORE_MODULE, "edmToTs");
            import_target_type(imports, js_type);
        }
        VdmFunctionImportReturnType::Entity {
            entity_class_name, ..
        } => imports.add(&sibling(entity_class_name), entity_class_name),
        VdmFunctionImportReturnType::ComplexType { type_name, .. } => {
            imports.add(&sibling(type_name), type_name)
        }
        VdmFunctionImportReturnType::Void => {}
    }
}

fn parameters_interface(function: &VdmFunctionImport) -> Interface {
    function.parameters.iter().fold(
        Interface::new(&function.parameters_type_name).doc(format!(
            "Type of the parameters to be passed to [[{}]].",
            function.function_name
        )),
        |interface, parameter| {
            let doc = if parameter.description.is_empty() {
                format!("{}.", parameter.original_name)
            } else {
                parameter.description.clone()
            };
            interface.field_with(
                InterfaceField::new(&parameter.parameter_name, &parameter.js_type)
                    .doc(doc)
                    .optional_if(parameter.nullable),
            )
        },
    )
}

fn request_builder_function(service: &VdmServiceMetadata, function: &VdmFunctionImport) -> Result<Fn> {
    let mut params = Vec::new();
    for parameter in &function.parameters {
        let edm = primitive(&parameter.edm_type)?;
        params.push(format!(
            "  {}: new FunctionImportParameter({}, '{}', parameters.{})",
            parameter.parameter_name,
            string_literal(&parameter.original_name),
            edm,
            parameter.parameter_name
        ));
    }
    let params = if params.is_empty() {
        "const params = {};".to_string()
    } else {
        format!("const params = {{\n{}\n}};", params.join(",\n"))
    };

    let return_type = &function.return_type;
    let request = format!(
        "return new FunctionImportRequestBuilder('{}', {}, {}, (data) => {}(data, {}), params);",
        function.http_method.to_lowercase(),
        string_literal(&service.service_path),
        string_literal(&function.original_name),
        transformer(return_type),
        transformer_argument(return_type)
    );

    let description = if function.description.is_empty() {
        format!("{}.", function.original_name)
    } else {
        function.description.clone()
    };

    Ok(Fn::new(&function.function_name)
        .doc(format!(
            "{}\n\n@param parameters - Object containing all parameters for the function import.\n@returns A request builder that allows to overwrite some of the values and execute the resulting request.",
            description
        ))
        .param(Param::new("parameters", &function.parameters_type_name))
        .returns(format!(
            "FunctionImportRequestBuilder<{}, {}>",
            function.parameters_type_name,
            return_type_name(return_type)
        ))
        .body(params)
        .body(request))
}

pub(crate) fn function_imports_file(service: &VdmServiceMetadata) -> Result<CodeFile> {
    let mut imports = ImportCollector::new();
    imports.add(CORE_MODULE, "FunctionImportRequestBuilder");

    let mut file = CodeFile::new();
    for function in &service.function_imports {
        if !function.parameters.is_empty() {
            imports.add(CORE_MODULE, "FunctionImportParameter");
        }
        for parameter in &function.parameters {
            import_target_type(&mut imports, &parameter.js_type);
        }
        import_return_type(&mut imports, &function.return_type);

        file = file
            .add(parameters_interface(function))
            .add(request_builder_function(service, function)?);
    }

    let names: Vec<String> = service
        .function_imports
        .iter()
        .map(|f| format!("  {}", f.function_name))
        .collect();
    let listing = format!("{{\n{}\n}}", names.join(",\n"));

    Ok(file
        .imports(&imports)
        .add(Const::new("functionImports", listing)))
}
