//! `<ClassName>RequestBuilder.ts`

use eyre::Result;
use vdmgen_codegen::generation::ImportCollector;
use vdmgen_ir::VdmEntity;

use super::{code_file, import_target_type, key_object, sibling};
use crate::{
    ast::{Class, Method, Param},
    code_file::CodeFile,
    type_mapper::CORE_MODULE,
};

pub(crate) fn request_builder_name(entity: &VdmEntity) -> String {
    format!("{}RequestBuilder", entity.class_name)
}

pub(crate) fn request_builder_file(entity: &VdmEntity) -> Result<CodeFile> {
    let class_name = &entity.class_name;

    let mut imports = ImportCollector::new();
    imports.add_all(
        CORE_MODULE,
        [
            "CreateRequestBuilder",
            "DeleteRequestBuilder",
            "GetAllRequestBuilder",
            "GetByKeyRequestBuilder",
            "RequestBuilder",
            "UpdateRequestBuilder",
        ],
    );
    for key in &entity.keys {
        import_target_type(&mut imports, &key.js_type);
    }
    imports.add(&sibling(class_name), class_name);

    let key_params: Vec<Param> = entity
        .keys
        .iter()
        .map(|key| Param::new(&key.property_name_as_param, &key.js_type))
        .collect();
    let keys = key_object(&entity.keys, |key| key.property_name_as_param.clone());
    let param_docs: String = entity
        .keys
        .iter()
        .map(|key| {
            format!(
                "\n@param {} Key property. See [[{}.{}]].",
                key.property_name_as_param, class_name, key.instance_property_name
            )
        })
        .collect();

    let class = Class::new(request_builder_name(entity))
        .doc(format!(
            "Request builder class for operations supported on the [[{}]] entity.",
            class_name
        ))
        .extends(format!("RequestBuilder<{}>", class_name))
        .method(
            Method::new("getByKey")
                .doc(format!(
                    "Returns a request builder for retrieving one `{0}` entity based on its keys.{1}\n@returns A request builder for creating requests to retrieve one `{0}` entity based on its keys.",
                    class_name, param_docs
                ))
                .params(key_params.clone())
                .returns(format!("GetByKeyRequestBuilder<{}>", class_name))
                .body(format!("return new GetByKeyRequestBuilder({}, {});", class_name, keys)),
        )
        .method(
            Method::new("getAll")
                .doc(format!(
                    "Returns a request builder for querying all `{0}` entities.\n@returns A request builder for creating requests to retrieve all `{0}` entities.",
                    class_name
                ))
                .returns(format!("GetAllRequestBuilder<{}>", class_name))
                .body(format!("return new GetAllRequestBuilder({});", class_name)),
        )
        .method(
            Method::new("create")
                .doc(format!(
                    "Returns a request builder for creating a `{0}` entity.\n@param entity The entity to be created\n@returns A request builder for creating requests that create an entity of type `{0}`.",
                    class_name
                ))
                .param(Param::new("entity", class_name))
                .returns(format!("CreateRequestBuilder<{}>", class_name))
                .body(format!("return new CreateRequestBuilder({}, entity);", class_name)),
        )
        .method(
            Method::new("update")
                .doc(format!(
                    "Returns a request builder for updating an entity of type `{0}`.\n@param entity The entity to be updated\n@returns A request builder for creating requests that update an entity of type `{0}`.",
                    class_name
                ))
                .param(Param::new("entity", class_name))
                .returns(format!("UpdateRequestBuilder<{}>", class_name))
                .body(format!("return new UpdateRequestBuilder({}, entity);", class_name)),
        )
        .method(
            Method::new("delete")
                .doc(format!(
                    "Returns a request builder for deleting an entity of type `{0}`.{1}\n@returns A request builder for creating requests that delete an entity of type `{0}`.",
                    class_name, param_docs
                ))
                .params(key_params)
                .returns(format!("DeleteRequestBuilder<{}>", class_name))
                .body(format!("return new DeleteRequestBuilder({}, {});", class_name, keys)),
        );

    Ok(code_file(&imports).add(class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::shop_service;

    #[test]
    fn test_request_builder_name() {
        let service = shop_service();
        assert_eq!(
            request_builder_name(service.entity("Order").unwrap()),
            "OrderRequestBuilder"
        );
    }

    #[test]
    fn test_request_builder_with_composite_key() {
        let service = shop_service();
        let code = request_builder_file(service.entity("Item").unwrap())
            .unwrap()
            .render();

        assert!(code.starts_with(
            "import { CreateRequestBuilder, DeleteRequestBuilder, GetAllRequestBuilder, GetByKeyRequestBuilder, RequestBuilder, UpdateRequestBuilder } from '@sap-cloud-sdk/core';\n\
             import { BigNumber } from 'bignumber.js';\n\
             import { Item } from './Item';\n\n"
        ));
        assert!(code.contains("export class ItemRequestBuilder extends RequestBuilder<Item> {\n"));
        assert!(code.contains(
            "  getByKey(orderId: string, itemNo: BigNumber): GetByKeyRequestBuilder<Item> {\n    return new GetByKeyRequestBuilder(Item, {\n      OrderId: orderId,\n      ItemNo: itemNo\n    });\n  }\n"
        ));
        assert!(code.contains(
            "  getAll(): GetAllRequestBuilder<Item> {\n    return new GetAllRequestBuilder(Item);\n  }\n"
        ));
        assert!(code.contains("  create(entity: Item): CreateRequestBuilder<Item> {\n"));
        assert!(code.contains("  update(entity: Item): UpdateRequestBuilder<Item> {\n"));
        assert!(code.contains("  delete(orderId: string, itemNo: BigNumber): DeleteRequestBuilder<Item> {\n"));
        assert!(code.contains("   * @param itemNo Key property. See [[Item.itemNo]].\n"));
    }
}
