//! Catalog operation planning.

use serde_json::{json, Map, Value};

use super::dispatch::idempotency_key;
use super::params::Params;
use super::request::{OperationRequest, RequestPlan};
use super::CatalogOperation;
use crate::error::SquareError;

pub(super) fn plan(
    operation: &CatalogOperation,
    params: &Params<'_>,
    item_index: usize,
) -> Result<RequestPlan, SquareError> {
    match operation {
        CatalogOperation::Get => {
            let object_id = params.required_str("objectId")?;
            let additional = params.collection("additionalFields");
            let mut query = Vec::new();
            if additional.bool_or("include_related_objects", false) {
                query.push(("include_related_objects".to_string(), "true".to_string()));
            }
            if let Some(version) = additional.i64_opt("catalog_version") {
                query.push(("catalog_version".to_string(), version.to_string()));
            }
            Ok(RequestPlan::single(
                OperationRequest::get(format!("/catalog/object/{}", object_id)).with_query(query),
            ))
        }
        CatalogOperation::List => {
            let filters = params.collection("filters");
            let mut query = Vec::new();
            if let Some(types) = filters.str_opt("types") {
                query.push(("types".to_string(), types.to_string()));
            }
            if let Some(version) = filters.i64_opt("catalog_version") {
                query.push(("catalog_version".to_string(), version.to_string()));
            }

            if params.bool_or("returnAll", false) {
                let request = OperationRequest::get("/catalog/list").with_query(query);
                Ok(RequestPlan::all_items(request, "objects"))
            } else {
                query.push(("limit".to_string(), params.u64_or("limit", 100).to_string()));
                let request = OperationRequest::get("/catalog/list").with_query(query);
                Ok(RequestPlan::single(request).pluck("objects"))
            }
        }
        CatalogOperation::BatchRetrieve => {
            let additional = params.collection("additionalFields");
            let mut body = Map::new();
            body.insert("object_ids".into(), json!(params.id_list("objectIds")?));
            if additional.bool_or("include_related_objects", false) {
                body.insert("include_related_objects".into(), json!(true));
            }
            if let Some(version) = additional.i64_opt("catalog_version") {
                body.insert("catalog_version".into(), json!(version));
            }
            Ok(RequestPlan::single(OperationRequest::post(
                "/catalog/batch-retrieve",
                Value::Object(body),
            )))
        }
        CatalogOperation::BatchUpsert => {
            let body = json!({
                "idempotency_key": idempotency_key(params, "idempotencyKey", item_index),
                "batches": params.json_required("batches", "Batches field")?,
            });
            Ok(RequestPlan::single(OperationRequest::post(
                "/catalog/batch-upsert",
                body,
            )))
        }
        CatalogOperation::GetCatalogInfo => {
            Ok(RequestPlan::single(OperationRequest::get("/catalog/info")))
        }
        CatalogOperation::SearchObjects => {
            let additional = params.collection("additionalFields");
            let mut body = Map::new();
            if let Some(query) = params.json_opt("searchQuery", "Search Query field")? {
                body.insert("query".into(), query);
            }
            if let Some(types) = additional.id_list_opt("object_types") {
                body.insert("object_types".into(), json!(types));
            }
            if additional.bool_or("include_deleted_objects", false) {
                body.insert("include_deleted_objects".into(), json!(true));
            }
            if additional.bool_or("include_related_objects", false) {
                body.insert("include_related_objects".into(), json!(true));
            }

            if params.bool_or("returnAll", false) {
                let request = OperationRequest::post("/catalog/search", Value::Object(body));
                Ok(RequestPlan::all_items(request, "objects"))
            } else {
                body.insert("limit".into(), json!(params.u64_or("limit", 100)));
                let request = OperationRequest::post("/catalog/search", Value::Object(body));
                Ok(RequestPlan::single(request).pluck("objects"))
            }
        }
        CatalogOperation::SearchItems => {
            let additional = params.collection("additionalFields");
            let mut body = Map::new();
            if let Some(query) = params.json_opt("searchQuery", "Search Query field")? {
                body.insert("query".into(), query);
            }
            if let Some(ids) = additional.id_list_opt("category_ids") {
                body.insert("category_ids".into(), json!(ids));
            }
            if let Some(levels) = additional.id_list_opt("stock_levels") {
                body.insert("stock_levels".into(), json!(levels));
            }
            if let Some(ids) = additional.id_list_opt("enabled_location_ids") {
                body.insert("enabled_location_ids".into(), json!(ids));
            }
            if let Some(types) = additional.id_list_opt("product_types") {
                body.insert("product_types".into(), json!(types));
            }
            if let Some(filters) =
                additional.json_opt("custom_attribute_filters", "Custom Attribute Filters")?
            {
                body.insert("custom_attribute_filters".into(), filters);
            }

            if params.bool_or("returnAll", false) {
                let request =
                    OperationRequest::post("/catalog/search-catalog-items", Value::Object(body));
                Ok(RequestPlan::all_items(request, "items"))
            } else {
                body.insert("limit".into(), json!(params.u64_or("limit", 100)));
                let request =
                    OperationRequest::post("/catalog/search-catalog-items", Value::Object(body));
                Ok(RequestPlan::single(request).pluck("items"))
            }
        }
        CatalogOperation::UpdateItemModifierLists => {
            let mut body = Map::new();
            body.insert("item_ids".into(), json!(params.id_list("itemIds")?));
            if let Some(ids) = params.id_list_opt("modifierListsToEnable") {
                body.insert("modifier_lists_to_enable".into(), json!(ids));
            }
            if let Some(ids) = params.id_list_opt("modifierListsToDisable") {
                body.insert("modifier_lists_to_disable".into(), json!(ids));
            }
            Ok(RequestPlan::single(OperationRequest::post(
                "/catalog/update-item-modifier-lists",
                Value::Object(body),
            )))
        }
    }
}
