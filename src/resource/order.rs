//! Order operation planning.

use serde_json::{json, Map, Value};

use super::dispatch::idempotency_key;
use super::params::Params;
use super::request::{OperationRequest, RequestPlan};
use super::OrderOperation;
use crate::error::SquareError;

pub(super) fn plan(
    operation: &OrderOperation,
    params: &Params<'_>,
    item_index: usize,
) -> Result<RequestPlan, SquareError> {
    match operation {
        OrderOperation::Create => {
            let location_id = params.required_str("locationId")?;
            let additional = params.collection("additionalFields");

            let mut order = Map::new();
            order.insert("location_id".into(), json!(location_id));
            if let Some(Value::Object(details)) = params.json_opt("orderDetails", "Order Details")? {
                order.extend(details);
            }
            if let Some(customer_id) = additional.str_opt("customer_id") {
                order.insert("customer_id".into(), json!(customer_id));
            }
            if let Some(reference_id) = additional.str_opt("reference_id") {
                order.insert("reference_id".into(), json!(reference_id));
            }
            if let Some(state) = additional.str_opt("state") {
                order.insert("state".into(), json!(state));
            }

            let body = json!({
                "order": order,
                "idempotency_key": idempotency_key(&additional, "idempotency_key", item_index),
            });
            Ok(RequestPlan::single(OperationRequest::post("/orders", body)))
        }
        OrderOperation::Get => {
            let order_id = params.required_str("orderId")?;
            Ok(RequestPlan::single(OperationRequest::get(format!("/orders/{}", order_id))))
        }
        OrderOperation::BatchRetrieve => {
            let body = json!({
                "location_id": params.required_str("locationId")?,
                "order_ids": params.id_list("orderIds")?,
            });
            Ok(RequestPlan::single(OperationRequest::post(
                "/orders/batch-retrieve",
                body,
            )))
        }
        OrderOperation::Search => {
            let search_filters = params.collection("searchFilters");
            let sort = params.collection("sort");

            let mut filter = Map::new();
            if let Some(ids) = search_filters.id_list_opt("location_ids") {
                filter.insert("location_ids".into(), json!(ids));
            }
            if let Some(ids) = search_filters.id_list_opt("customer_ids") {
                filter.insert("customer_filter".into(), json!({ "customer_ids": ids }));
            }
            if let Some(states) = search_filters.array_opt("state_filter") {
                filter.insert("state_filter".into(), json!({ "states": states }));
            }
            if let Some(value) = search_filters.json_opt("date_time_filter", "Date Time Filter")? {
                filter.insert("date_time_filter".into(), value);
            }
            if let Some(value) =
                search_filters.json_opt("fulfillment_filter", "Fulfillment Filter")?
            {
                filter.insert("fulfillment_filter".into(), value);
            }
            if let Some(value) = search_filters.json_opt("source_filter", "Source Filter")? {
                filter.insert("source_filter".into(), value);
            }

            let mut query = Map::new();
            query.insert("filter".into(), Value::Object(filter));
            if let Some(sort_field) = sort.str_opt("sort_field") {
                query.insert(
                    "sort".into(),
                    json!({
                        "sort_field": sort_field,
                        "sort_order": sort.str_opt("sort_order").unwrap_or("DESC"),
                    }),
                );
            }

            let mut body = Map::new();
            body.insert("query".into(), Value::Object(query));

            if params.bool_or("returnAll", false) {
                let request = OperationRequest::post("/orders/search", Value::Object(body));
                Ok(RequestPlan::all_items(request, "orders"))
            } else {
                body.insert("limit".into(), json!(params.u64_or("limit", 100)));
                let request = OperationRequest::post("/orders/search", Value::Object(body));
                Ok(RequestPlan::single(request).pluck("orders"))
            }
        }
        OrderOperation::Update => {
            let order_id = params.required_str("orderId")?;
            let additional = params.collection("additionalFields");

            let mut body = match params.json_required("orderUpdates", "Order Updates")? {
                Value::Object(updates) => updates,
                _ => Map::new(),
            };
            body.insert(
                "idempotency_key".into(),
                json!(idempotency_key(&additional, "idempotency_key", item_index)),
            );

            Ok(RequestPlan::single(OperationRequest::put(
                format!("/orders/{}", order_id),
                Value::Object(body),
            )))
        }
        OrderOperation::Pay => {
            let order_id = params.required_str("orderId")?;
            let additional = params.collection("additionalFields");

            let mut body = Map::new();
            body.insert(
                "idempotency_key".into(),
                json!(idempotency_key(&additional, "idempotency_key", item_index)),
            );
            if let Some(ids) = params.id_list_opt("paymentIds") {
                body.insert("payment_ids".into(), json!(ids));
            }
            if let Some(version) = additional.i64_opt("order_version") {
                body.insert("order_version".into(), json!(version));
            }

            Ok(RequestPlan::single(OperationRequest::post(
                format!("/orders/{}/pay", order_id),
                Value::Object(body),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Method;
    use serde_json::json;

    fn plan_for(operation: OrderOperation, values: Value, item_index: usize) -> RequestPlan {
        plan(&operation, &Params::new(&values), item_index).expect("planning should succeed")
    }

    #[test]
    fn create_merges_details_and_additional_fields_into_the_order() {
        let plan = plan_for(
            OrderOperation::Create,
            json!({
                "locationId": "L-1",
                "orderDetails": r#"{"line_items": [{"name": "Tea", "quantity": "1"}]}"#,
                "additionalFields": { "customer_id": "c-1", "state": "OPEN" },
            }),
            0,
        );
        assert_eq!(plan.request.path, "/orders");
        assert_eq!(plan.request.body["order"]["location_id"], "L-1");
        assert_eq!(plan.request.body["order"]["customer_id"], "c-1");
        assert_eq!(plan.request.body["order"]["state"], "OPEN");
        assert_eq!(
            plan.request.body["order"]["line_items"],
            json!([{ "name": "Tea", "quantity": "1" }])
        );
    }

    #[test]
    fn create_synthesizes_a_per_item_idempotency_key() {
        let values = json!({ "locationId": "L-1" });
        let plan = plan_for(OrderOperation::Create, values.clone(), 2);
        let key = plan.request.body["idempotency_key"]
            .as_str()
            .expect("key should be a string");

        let (millis, index) = key.rsplit_once('-').expect("key should contain a dash");
        assert_eq!(index, "2");
        assert!(!millis.is_empty());
        assert!(millis.chars().all(|c| c.is_ascii_digit()));

        let other = plan_for(OrderOperation::Create, values, 3);
        assert_ne!(other.request.body["idempotency_key"], key);
    }

    #[test]
    fn create_prefers_the_caller_idempotency_key() {
        let plan = plan_for(
            OrderOperation::Create,
            json!({
                "locationId": "L-1",
                "additionalFields": { "idempotency_key": "fixed" },
            }),
            5,
        );
        assert_eq!(plan.request.body["idempotency_key"], "fixed");
    }

    #[test]
    fn batch_retrieve_splits_order_ids() {
        let plan = plan_for(
            OrderOperation::BatchRetrieve,
            json!({ "locationId": "L-1", "orderIds": "o-1, o-2" }),
            0,
        );
        assert_eq!(
            plan.request.body,
            json!({ "location_id": "L-1", "order_ids": ["o-1", "o-2"] })
        );
    }

    #[test]
    fn search_assembles_nested_filters() {
        let plan = plan_for(
            OrderOperation::Search,
            json!({
                "searchFilters": {
                    "location_ids": "L-1, L-2",
                    "customer_ids": "c-1",
                    "state_filter": ["OPEN", "COMPLETED"],
                    "date_time_filter": r#"{"created_at": {"start_at": "2024-01-01T00:00:00Z"}}"#,
                },
                "sort": { "sort_field": "CREATED_AT" },
                "returnAll": true,
            }),
            0,
        );
        assert_eq!(plan.paginate, Some("orders"));
        assert_eq!(
            plan.request.body,
            json!({
                "query": {
                    "filter": {
                        "location_ids": ["L-1", "L-2"],
                        "customer_filter": { "customer_ids": ["c-1"] },
                        "state_filter": { "states": ["OPEN", "COMPLETED"] },
                        "date_time_filter": { "created_at": { "start_at": "2024-01-01T00:00:00Z" } },
                    },
                    "sort": { "sort_field": "CREATED_AT", "sort_order": "DESC" },
                },
            })
        );
    }

    #[test]
    fn search_skips_empty_state_filters_and_sort() {
        let plan = plan_for(
            OrderOperation::Search,
            json!({ "searchFilters": { "state_filter": [] } }),
            0,
        );
        assert_eq!(plan.pluck, Some("orders"));
        assert_eq!(
            plan.request.body,
            json!({ "query": { "filter": {} }, "limit": 100 })
        );
    }

    #[test]
    fn search_rejects_malformed_date_time_filters() {
        let values = json!({ "searchFilters": { "date_time_filter": "{oops" } });
        let err = plan(&OrderOperation::Search, &Params::new(&values), 0).unwrap_err();
        assert_eq!(err.to_string(), "Date Time Filter must be valid JSON");
    }

    #[test]
    fn update_requires_parseable_order_updates() {
        let values = json!({ "orderId": "o-1", "orderUpdates": "{not json" });
        let err = plan(&OrderOperation::Update, &Params::new(&values), 0).unwrap_err();
        assert_eq!(err.to_string(), "Order Updates must be valid JSON");

        let values = json!({ "orderId": "o-1" });
        let err = plan(&OrderOperation::Update, &Params::new(&values), 0).unwrap_err();
        assert!(matches!(err, SquareError::Validation(_)));
    }

    #[test]
    fn update_spreads_updates_and_adds_the_key() {
        let plan = plan_for(
            OrderOperation::Update,
            json!({
                "orderId": "o-1",
                "orderUpdates": r#"{"order": {"version": 2, "state": "COMPLETED"}}"#,
            }),
            1,
        );
        assert_eq!(plan.request.method, Method::Put);
        assert_eq!(plan.request.path, "/orders/o-1");
        assert_eq!(
            plan.request.body["order"],
            json!({ "version": 2, "state": "COMPLETED" })
        );
        assert!(plan.request.body["idempotency_key"].is_string());
    }

    #[test]
    fn pay_gates_payment_ids_and_order_version() {
        let plan = plan_for(
            OrderOperation::Pay,
            json!({
                "orderId": "o-9",
                "paymentIds": "p-1, p-2",
                "additionalFields": { "order_version": 3 },
            }),
            0,
        );
        assert_eq!(plan.request.path, "/orders/o-9/pay");
        assert_eq!(plan.request.body["payment_ids"], json!(["p-1", "p-2"]));
        assert_eq!(plan.request.body["order_version"], 3);

        let plan = plan_for(OrderOperation::Pay, json!({ "orderId": "o-9" }), 0);
        assert_eq!(plan.request.body.get("payment_ids"), None);
        assert_eq!(plan.request.body.get("order_version"), None);
    }
}
