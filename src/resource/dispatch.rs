//! Top-level operation dispatch.
//!
//! Planning is pure: every operation maps parameters to a request plan
//! here, and all parameter validation happens before anything touches the
//! network.

use chrono::Utc;
use serde_json::{json, Map, Value};

use super::params::Params;
use super::request::RequestPlan;
use super::{booking, catalog, customer, invoice, order, ResourceOperation};
use crate::error::SquareError;

/// Build the request plan for one item.
pub fn plan(
    operation: &ResourceOperation,
    params: &Params<'_>,
    item_index: usize,
) -> Result<RequestPlan, SquareError> {
    match operation {
        ResourceOperation::Booking(op) => booking::plan(op, params),
        ResourceOperation::Catalog(op) => catalog::plan(op, params, item_index),
        ResourceOperation::Customer(op) => customer::plan(op, params),
        ResourceOperation::Invoice(op) => invoice::plan(op, params),
        ResourceOperation::Order(op) => order::plan(op, params, item_index),
    }
}

/// Caller-supplied idempotency key, or one synthesized from the current
/// time in milliseconds and the item index (unique within a run).
pub(super) fn idempotency_key(source: &Params<'_>, key: &str, item_index: usize) -> String {
    match source.str_opt(key) {
        Some(key) => key.to_string(),
        None => format!("{}-{}", Utc::now().timestamp_millis(), item_index),
    }
}

/// Filter body shared by the customer and invoice search operations.
pub(super) fn id_filter_search_body(params: &Params<'_>) -> Map<String, Value> {
    let search_fields = params.collection("searchFields");

    let mut filter = Map::new();
    if let Some(ids) = search_fields.id_list_opt("location_ids") {
        filter.insert("location_ids".into(), json!(ids));
    }
    if let Some(ids) = search_fields.id_list_opt("customer_ids") {
        filter.insert("customer_ids".into(), json!(ids));
    }

    let mut body = Map::new();
    body.insert("query".into(), json!({ "filter": filter }));
    body
}
