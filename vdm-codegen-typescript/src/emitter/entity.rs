//! `<ClassName>.ts`: entity class, its interface and its field descriptors.

use eyre::Result;
use vdmgen_codegen::generation::ImportCollector;
use vdmgen_ir::{VdmEntity, VdmNavigationProperty, VdmProperty, VdmServiceMetadata};

use super::{
    code_file, import_target_type, key_object, primitive, property_doc, request_builder_name,
    sibling, string_literal,
};
use crate::{
    ast::{Class, Const, Interface, InterfaceField, Method, Namespace, Param, Property},
    code_file::CodeFile,
    type_mapper::CORE_MODULE,
};

pub(crate) fn entity_file(service: &VdmServiceMetadata, entity: &VdmEntity) -> Result<CodeFile> {
    let class_name = &entity.class_name;
    let request_builder = request_builder_name(entity);

    let mut imports = ImportCollector::new();
    imports.add_all(
        CORE_MODULE,
        ["AllFields", "CustomField", "Entity", "EntityBuilderType", "Selectable"],
    );
    imports.add(&sibling(&request_builder), &request_builder);

    for property in &entity.properties {
        if property.is_complex {
            let module = sibling(&property.js_type);
            imports.add(&module, &property.js_type);
            imports.add(&module, &property.field_type);
        } else {
            import_target_type(&mut imports, &property.js_type);
            imports.add(CORE_MODULE, &property.field_type);
        }
    }
    for nav in &entity.navigation_properties {
        imports.add(CORE_MODULE, link_type(nav));
        if &nav.to_entity_class_name != class_name {
            let module = sibling(&nav.to_entity_class_name);
            imports.add(&module, &nav.to_entity_class_name);
            imports.add_type(&module, &format!("{}Type", nav.to_entity_class_name));
        }
    }

    Ok(code_file(&imports)
        .add(entity_class(service, entity, &request_builder))
        .add(entity_interface(entity))
        .add(entity_namespace(entity)?))
}

fn link_type(nav: &VdmNavigationProperty) -> &'static str {
    if nav.multiplicity.is_many() {
        "Link"
    } else {
        "OneToOneLink"
    }
}

fn entity_class(service: &VdmServiceMetadata, entity: &VdmEntity, request_builder: &str) -> Class {
    let class_name = &entity.class_name;
    let mut doc = format!(
        "This class represents the entity \"{}\" of service \"{}\".",
        entity.entity_set_name, service.original_file_name
    );
    if !entity.description.is_empty() {
        doc.push('\n');
        doc.push_str(&entity.description);
    }

    let mut class = Class::new(class_name)
        .doc(doc)
        .extends("Entity")
        .implements(format!("{}Type", class_name))
        .property(
            Property::new("_entityName")
                .static_()
                .value(string_literal(&entity.entity_set_name))
                .doc(format!("Technical entity name for {}.", class_name)),
        )
        .property(
            Property::new("_serviceName")
                .static_()
                .value(string_literal(&service.original_file_name))
                .doc(format!("Technical service name for {}.", class_name)),
        )
        .property(
            Property::new("_defaultServicePath")
                .static_()
                .value(string_literal(&service.service_path))
                .doc("Default url path for the according service."),
        );

    for property in &entity.properties {
        class = class.property(
            Property::new(&property.instance_property_name)
                .ty(&property.js_type)
                .nullable(property.nullable)
                .doc(property_doc(property)),
        );
    }

    for nav in &entity.navigation_properties {
        let (ty, kind) = if nav.multiplicity.is_many() {
            (format!("{}[]", nav.to_entity_class_name), "One-to-many")
        } else {
            (nav.to_entity_class_name.clone(), "One-to-one")
        };
        class = class.property(
            Property::new(&nav.instance_property_name)
                .ty(ty)
                .nullable(!nav.multiplicity.is_many())
                .doc(format!(
                    "{} navigation property to the [[{}]] entity.",
                    kind, nav.to_entity_class_name
                )),
        );
    }

    let keys = key_object(&entity.keys, |key| format!("this.{}", key.instance_property_name));
    class
        .method(
            Method::new("getKeys")
                .doc("Key properties of this entity, by their names on the wire.")
                .returns("{ [key: string]: any }")
                .body(format!("return {};", keys)),
        )
        .method(
            Method::new("builder")
                .static_()
                .doc(format!(
                    "Returns an entity builder to construct instances of `{0}`.\n@returns A builder that constructs instances of entity type `{0}`.",
                    class_name
                ))
                .returns(format!("EntityBuilderType<{0}, {0}Type>", class_name))
                .body(format!("return Entity.entityBuilder({});", class_name)),
        )
        .method(
            Method::new("requestBuilder")
                .static_()
                .doc(format!(
                    "Returns a request builder to construct requests for operations on the `{}` entity type.",
                    class_name
                ))
                .returns(request_builder)
                .body(format!("return new {}();", request_builder)),
        )
        .method(
            Method::new("customField")
                .static_()
                .doc(format!(
                    "Returns a selectable object that allows the selection of custom field in a get request for the entity `{}`.\n@param fieldName Name of the custom field to select",
                    class_name
                ))
                .param(Param::new("fieldName", "string"))
                .returns(format!("CustomField<{}>", class_name))
                .body(format!("return Entity.customFieldSelector(fieldName, {});", class_name)),
        )
}

fn entity_interface(entity: &VdmEntity) -> Interface {
    let mut interface = Interface::new(format!("{}Type", entity.class_name));
    for property in &entity.properties {
        interface = interface.field_with(
            InterfaceField::new(&property.instance_property_name, &property.js_type)
                .optional_if(property.nullable),
        );
    }
    for nav in &entity.navigation_properties {
        let many = nav.multiplicity.is_many();
        let ty = if many {
            format!("{}Type[]", nav.to_entity_class_name)
        } else {
            format!("{}Type", nav.to_entity_class_name)
        };
        interface = interface
            .field_with(InterfaceField::new(&nav.instance_property_name, ty).optional_if(!many));
    }
    interface
}

/// One descriptor constant per property, typed `<FieldType><ClassName>`.
fn property_descriptor(class_name: &str, property: &VdmProperty) -> Result<Const> {
    let field = &property.field_type;
    let value = if property.is_complex {
        format!(
            "new {}({}, {})",
            field,
            string_literal(&property.original_name),
            class_name
        )
    } else {
        let edm = primitive(&property.edm_type)?;
        format!(
            "new {}({}, {}, '{}')",
            field,
            string_literal(&property.original_name),
            class_name,
            edm
        )
    };
    Ok(Const::new(&property.static_property_name, value)
        .ty(format!("{}<{}>", field, class_name))
        .doc(format!(
            "Static representation of the [[{}]] property for query construction.\nUse to reference this property in query operations such as 'select' in the fluent request API.",
            property.instance_property_name
        )))
}

fn link_descriptor(class_name: &str, nav: &VdmNavigationProperty) -> Const {
    let link = link_type(nav);
    Const::new(
        &nav.static_property_name,
        format!(
            "new {}({}, {}, {})",
            link,
            string_literal(&nav.original_name),
            class_name,
            nav.to_entity_class_name
        ),
    )
    .ty(format!("{}<{}, {}>", link, class_name, nav.to_entity_class_name))
    .doc(format!(
        "Static representation of the [[{}]] navigation property for query construction.\nUse to reference this property in query operations such as 'select' in the fluent request API.",
        nav.instance_property_name
    ))
}

fn entity_namespace(entity: &VdmEntity) -> Result<Namespace> {
    let class_name = &entity.class_name;

    let mut descriptors = Vec::new();
    for property in &entity.properties {
        descriptors.push(property_descriptor(class_name, property)?);
    }
    descriptors.extend(
        entity
            .navigation_properties
            .iter()
            .map(|nav| link_descriptor(class_name, nav)),
    );

    // Distinct descriptor types, in order of first use
    let mut field_types: Vec<String> = Vec::new();
    for property in &entity.properties {
        let ty = format!("{}<{}>", property.field_type, class_name);
        if !field_types.contains(&ty) {
            field_types.push(ty);
        }
    }
    for nav in &entity.navigation_properties {
        let ty = format!("{}<{}, {}>", link_type(nav), class_name, nav.to_entity_class_name);
        if !field_types.contains(&ty) {
            field_types.push(ty);
        }
    }
    let all_fields_type = if field_types.is_empty() {
        format!("Array<Selectable<{}>>", class_name)
    } else {
        format!("Array<{}>", field_types.join(" | "))
    };

    let static_names: Vec<&str> = entity
        .properties
        .iter()
        .map(|p| p.static_property_name.as_str())
        .chain(
            entity
                .navigation_properties
                .iter()
                .map(|n| n.static_property_name.as_str()),
        )
        .collect();
    let all_fields = list_literal(class_name, &static_names);

    let key_names: Vec<String> = entity
        .keys
        .iter()
        .map(|k| format!("{}.{}", class_name, k.static_property_name))
        .collect();
    let selectable = format!("Selectable<{}>", class_name);
    let key_map = format!("{{ [keys: string]: {} }}", selectable);

    Ok(Namespace::new(class_name)
        .statements(descriptors)
        .statement(
            Const::new("_allFields", all_fields)
                .ty(all_fields_type)
                .doc(format!("All fields of the {} entity.", class_name)),
        )
        .statement(
            Const::new("ALL_FIELDS", format!("new AllFields('*', {})", class_name))
                .ty(format!("AllFields<{}>", class_name))
                .doc("All fields selector."),
        )
        .statement(
            Const::new("_keyFields", format!("[{}]", key_names.join(", ")))
                .ty(format!("Array<{}>", selectable))
                .doc(format!("All key fields of the {} entity.", class_name)),
        )
        .statement(
            Const::new(
                "_keys",
                format!(
                    "{0}._keyFields.reduce((acc: {1}, field: {2}) => {{\n  acc[field._fieldName] = field;\n  return acc;\n}}, {{}})",
                    class_name, key_map, selectable
                ),
            )
            .ty(key_map.clone())
            .doc(format!(
                "Mapping of all key field names to the respective static field property {}.",
                class_name
            )),
        ))
}

/// `[\n  X.A,\n  X.B\n]`, or `[]` when empty.
fn list_literal(class_name: &str, names: &[&str]) -> String {
    if names.is_empty() {
        return "[]".to_string();
    }
    let entries: Vec<String> = names
        .iter()
        .map(|name| format!("  {}.{}", class_name, name))
        .collect();
    format!("[\n{}\n]", entries.join(",\n"))
}

#[cfg(test)]
mod tests {
    use vdmgen_codegen::builder::{CodeBuilder, Renderable};

    use super::*;
    use crate::{
        ast::DeclarationKind,
        test_support::{shop_service, tree_service},
    };

    fn render(node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(node);
        builder.build()
    }

    #[test]
    fn test_entity_file_declarations() {
        let service = shop_service();
        let order = service.entity("Order").unwrap();
        let file = entity_file(&service, order).unwrap();

        assert_eq!(file.count(DeclarationKind::Class), 1);
        assert_eq!(file.count(DeclarationKind::Interface), 1);
        assert_eq!(file.count(DeclarationKind::Namespace), 1);
    }

    #[test]
    fn test_entity_imports_are_merged() {
        let service = shop_service();
        let order = service.entity("Order").unwrap();
        let code = entity_file(&service, order).unwrap().render();

        assert!(code.starts_with(
            "import { AllFields, CustomField, DateField, Entity, EntityBuilderType, Link, Selectable, StringField } from '@sap-cloud-sdk/core';\n"
        ));
        assert!(code.contains("import { OrderRequestBuilder } from './OrderRequestBuilder';\n"));
        assert!(code.contains("import { Money, MoneyField } from './Money';\n"));
        assert!(code.contains("import { Moment } from 'moment';\n"));
        assert!(code.contains("import { Item } from './Item';\n"));
        assert!(code.contains("import type { ItemType } from './Item';\n"));
        assert_eq!(code.matches("from '@sap-cloud-sdk/core'").count(), 1);
    }

    #[test]
    fn test_entity_class_shape() {
        let service = shop_service();
        let order = service.entity("Order").unwrap();
        let code = render(&entity_class(&service, order, "OrderRequestBuilder"));

        assert!(code.starts_with("/**\n * This class represents the entity \"A_Order\" of service \"API_SHOP_SRV\".\n */\n"));
        assert!(code.contains("export class Order extends Entity implements OrderType {\n"));
        assert!(code.contains("  static _entityName = 'A_Order';\n"));
        assert!(code.contains("  static _serviceName = 'API_SHOP_SRV';\n"));
        assert!(code.contains("  static _defaultServicePath = '/sap/opu/odata/sap/API_SHOP_SRV';\n"));
        assert!(code.contains("  orderId!: string;\n"));
        assert!(code.contains("  total!: Money;\n"));
        assert!(code.contains("  createdAt?: Moment;\n"));
        assert!(code.contains("  toItems!: Item[];\n"));
        assert!(code.contains(
            "  getKeys(): { [key: string]: any } {\n    return {\n      OrderId: this.orderId\n    };\n  }\n"
        ));
        assert!(code.contains(
            "  static builder(): EntityBuilderType<Order, OrderType> {\n    return Entity.entityBuilder(Order);\n  }\n"
        ));
        assert!(code.contains(
            "  static requestBuilder(): OrderRequestBuilder {\n    return new OrderRequestBuilder();\n  }\n"
        ));
        assert!(code.contains("  static customField(fieldName: string): CustomField<Order> {\n"));
    }

    #[test]
    fn test_entity_interface() {
        let service = shop_service();
        let item = service.entity("Item").unwrap();
        assert_eq!(
            render(&entity_interface(item)),
            "export interface ItemType {\n  orderId: string;\n  itemNo: BigNumber;\n  toOrder?: OrderType;\n}\n"
        );
    }

    #[test]
    fn test_entity_descriptors() {
        let service = shop_service();
        let order = service.entity("Order").unwrap();
        let code = render(&entity_namespace(order).unwrap());

        assert!(code.starts_with("export namespace Order {\n"));
        assert!(code.contains(
            "  export const ORDER_ID: StringField<Order> = new StringField('OrderId', Order, 'Edm.String');\n"
        ));
        assert!(code.contains(
            "  export const TOTAL: MoneyField<Order> = new MoneyField('Total', Order);\n"
        ));
        assert!(code.contains(
            "  export const CREATED_AT: DateField<Order> = new DateField('CreatedAt', Order, 'Edm.DateTimeOffset');\n"
        ));
        assert!(code.contains(
            "  export const TO_ITEMS: Link<Order, Item> = new Link('to_Items', Order, Item);\n"
        ));
        assert!(code.contains(
            "  export const _allFields: Array<StringField<Order> | MoneyField<Order> | DateField<Order> | Link<Order, Item>> = [\n    Order.ORDER_ID,\n    Order.TOTAL,\n    Order.CREATED_AT,\n    Order.TO_ITEMS\n  ];\n"
        ));
        assert!(code.contains("  export const ALL_FIELDS: AllFields<Order> = new AllFields('*', Order);\n"));
        assert!(code.contains("  export const _keyFields: Array<Selectable<Order>> = [Order.ORDER_ID];\n"));
        assert!(code.contains("    acc[field._fieldName] = field;\n"));
    }

    #[test]
    fn test_one_to_one_link() {
        let service = shop_service();
        let item = service.entity("Item").unwrap();
        let code = render(&entity_namespace(item).unwrap());
        assert!(code.contains(
            "  export const TO_ORDER: OneToOneLink<Item, Order> = new OneToOneLink('to_Order', Item, Order);\n"
        ));
    }

    #[test]
    fn test_self_referencing_entity() {
        let service = tree_service();
        let node = service.entity("Node").unwrap();
        let code = entity_file(&service, node).unwrap().render();

        assert!(!code.contains("from './Node'"));
        assert!(code.starts_with(
            "import { AllFields, CustomField, Entity, EntityBuilderType, Link, OneToOneLink, Selectable, StringField } from '@sap-cloud-sdk/core';\n"
        ));
        assert!(code.contains("  toParent?: Node;\n"));
        assert!(code.contains("  toChildren!: Node[];\n"));
        assert!(code.contains(
            "  export const TO_PARENT: OneToOneLink<Node, Node> = new OneToOneLink('to_Parent', Node, Node);\n"
        ));
        assert!(code.contains(
            "  export const TO_CHILDREN: Link<Node, Node> = new Link('to_Children', Node, Node);\n"
        ));
    }

    #[test]
    fn test_unknown_primitive_is_fatal() {
        let service = shop_service();
        let mut order = service.entity("Order").unwrap().clone();
        order.properties[0].edm_type = "Edm.Stream".to_string();
        let err = entity_file(&service, &order).unwrap_err();
        assert!(err.to_string().contains("Edm.Stream"));
    }
}
