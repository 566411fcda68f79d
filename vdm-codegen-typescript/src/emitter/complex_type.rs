//! `<TypeName>.ts`: complex type interface, field class and `build` function.
//!
//! Nested complex type properties delegate to the nested type's own `build`,
//! in property declaration order.

use eyre::Result;
use vdmgen_codegen::{generation::ImportCollector, language::EdmTypeMapper};
use vdmgen_ir::{VdmComplexType, VdmProperty};

use super::{code_file, import_target_type, primitive, property_doc, sibling, string_literal};
use crate::{
    ast::{Class, Fn, Interface, InterfaceField, Namespace, Param, Property},
    code_file::CodeFile,
    type_mapper::{CORE_MODULE, TypeScriptTypeMapper},
};

pub(crate) fn complex_type_file(complex_type: &VdmComplexType) -> Result<CodeFile> {
    let mut imports = ImportCollector::new();
    imports.add_all(
        CORE_MODULE,
        ["ComplexTypeField", "Entity", "FieldType", "createComplexType"],
    );
    for property in &complex_type.properties {
        if property.is_complex {
            let module = sibling(&property.js_type);
            imports.add(&module, &property.js_type);
            imports.add(&module, &property.field_type);
        } else {
            import_target_type(&mut imports, &property.js_type);
            imports.add(CORE_MODULE, "edmToTs");
            imports.add(
                CORE_MODULE,
                &TypeScriptTypeMapper::complex_property_field_type(&property.field_type),
            );
        }
    }

    Ok(code_file(&imports)
        .add(complex_interface(complex_type))
        .add(field_class(complex_type)?)
        .add(build_namespace(complex_type)?))
}

fn complex_interface(complex_type: &VdmComplexType) -> Interface {
    let doc = if complex_type.description.is_empty() {
        complex_type.type_name.clone()
    } else {
        complex_type.description.clone()
    };
    complex_type
        .properties
        .iter()
        .fold(Interface::new(&complex_type.type_name).doc(doc), |interface, property| {
            interface.field_with(
                InterfaceField::new(&property.instance_property_name, &property.js_type)
                    .doc(property_doc(property))
                    .optional_if(property.nullable),
            )
        })
}

fn field_class(complex_type: &VdmComplexType) -> Result<Class> {
    let mut class = Class::new(&complex_type.field_type)
        .doc(format!(
            "{}\n@typeparam EntityT - Type of the entity the complex type field belongs to.",
            complex_type.field_type
        ))
        .type_params("EntityT extends Entity")
        .extends("ComplexTypeField<EntityT>");

    for property in &complex_type.properties {
        let name = string_literal(&property.original_name);
        let (field, value) = if property.is_complex {
            let field = &property.field_type;
            (field.clone(), format!("new {}({}, this)", field, name))
        } else {
            let edm = primitive(&property.edm_type)?;
            let field = TypeScriptTypeMapper::complex_property_field_type(&property.field_type);
            let value = format!("new {}({}, this, '{}')", field, name, edm);
            (field, value)
        };
        class = class.property(
            Property::new(&property.instance_property_name)
                .ty(format!("{}<EntityT>", field))
                .value(value)
                .doc(format!(
                    "Representation of the [[{}.{}]] property for query construction.\nUse to reference this property in query operations such as 'filter' in the fluent request API.",
                    complex_type.type_name, property.instance_property_name
                )),
        );
    }
    Ok(class)
}

/// `Key: (value: T) => ({ key: <conversion> })`
fn build_entry(property: &VdmProperty) -> Result<String> {
    let name = &property.instance_property_name;
    let conversion = if property.is_complex {
        format!("{}.build({})", property.js_type, name)
    } else {
        let edm = primitive(&property.edm_type)?;
        TypeScriptTypeMapper.to_target_expr(edm, name)
    };
    Ok(format!(
        "{}: ({}: {}) => ({{ {}: {} }})",
        property.original_name, name, property.js_type, name, conversion
    ))
}

fn build_namespace(complex_type: &VdmComplexType) -> Result<Namespace> {
    let entries = complex_type
        .properties
        .iter()
        .map(build_entry)
        .collect::<Result<Vec<_>>>()?;
    let body = if entries.is_empty() {
        "return createComplexType(json, {});".to_string()
    } else {
        let entries: Vec<String> = entries.iter().map(|e| format!("  {}", e)).collect();
        format!(
            "return createComplexType(json, {{\n{}\n}});",
            entries.join(",\n")
        )
    };

    let mut json_types = vec!["FieldType".to_string()];
    for property in complex_type.properties.iter().filter(|p| p.is_complex) {
        if !json_types.contains(&property.js_type) {
            json_types.push(property.js_type.clone());
        }
    }

    Ok(Namespace::new(&complex_type.type_name).statement(
        Fn::new("build")
            .doc(format!(
                "Builds a `{}` from its JSON representation.",
                complex_type.type_name
            ))
            .param(Param::new(
                "json",
                format!("{{ [keys: string]: {} }}", json_types.join(" | ")),
            ))
            .returns(&complex_type.type_name)
            .body(body),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::DeclarationKind, test_support::shop_service};

    #[test]
    fn test_flat_complex_type() {
        let service = shop_service();
        let money = service.complex_type("Money").unwrap();
        let file = complex_type_file(money).unwrap();

        assert_eq!(file.import_count(), 2);
        assert_eq!(file.count(DeclarationKind::Class), 1);
        assert_eq!(file.count(DeclarationKind::Interface), 1);
        assert_eq!(file.count(DeclarationKind::Namespace), 1);

        let code = file.render();
        assert!(code.starts_with(
            "import { ComplexTypeBigNumberPropertyField, ComplexTypeField, ComplexTypeStringPropertyField, Entity, FieldType, createComplexType, edmToTs } from '@sap-cloud-sdk/core';\n\
             import { BigNumber } from 'bignumber.js';\n\n"
        ));
        assert!(code.contains("export interface Money {\n"));
        assert!(code.contains("  amount?: BigNumber;\n"));
        assert!(code.contains(
            "export class MoneyField<EntityT extends Entity> extends ComplexTypeField<EntityT> {\n"
        ));
        assert!(code.contains(
            "  amount: ComplexTypeBigNumberPropertyField<EntityT> = new ComplexTypeBigNumberPropertyField('Amount', this, 'Edm.Decimal');\n"
        ));
        assert!(code.contains(
            "export namespace Money {\n\
             \x20 /**\n\
             \x20  * Builds a `Money` from its JSON representation.\n\
             \x20  */\n\
             \x20 export function build(json: { [keys: string]: FieldType }): Money {\n\
             \x20   return createComplexType(json, {\n\
             \x20     Amount: (amount: BigNumber) => ({ amount: edmToTs(amount, 'Edm.Decimal') }),\n\
             \x20     Currency: (currency: string) => ({ currency: edmToTs(currency, 'Edm.String') })\n\
             \x20   });\n\
             \x20 }\n\
             }\n"
        ));
    }

    #[test]
    fn test_nested_complex_type_delegates_to_build() {
        let service = shop_service();
        let price = service.complex_type("Price").unwrap();
        let file = complex_type_file(price).unwrap();
        let code = file.render();

        assert!(code.contains("import { Money, MoneyField } from './Money';\n"));
        assert!(code.contains(
            "  net: MoneyField<EntityT> = new MoneyField('Net', this);\n"
        ));
        assert!(code.contains("export function build(json: { [keys: string]: FieldType | Money }): Price {\n"));
        assert!(code.contains("      Net: (net: Money) => ({ net: Money.build(net) })"));
    }
}
