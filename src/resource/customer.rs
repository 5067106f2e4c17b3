//! Customer operation planning.

use serde_json::{json, Map, Value};

use super::dispatch::id_filter_search_body;
use super::params::Params;
use super::request::{OperationRequest, RequestPlan};
use super::CustomerOperation;
use crate::error::SquareError;

pub(super) fn plan(
    operation: &CustomerOperation,
    params: &Params<'_>,
) -> Result<RequestPlan, SquareError> {
    match operation {
        CustomerOperation::Create => {
            let mut body = Map::new();
            body.insert("given_name".into(), json!(params.required_str("given_name")?));
            body.extend(params.object("additionalFields"));
            Ok(RequestPlan::single(OperationRequest::post(
                "/customers",
                Value::Object(body),
            )))
        }
        CustomerOperation::Get => {
            let customer_id = params.required_str("customerId")?;
            // Customer lookups can report failures inside a 2xx body.
            Ok(
                RequestPlan::single(OperationRequest::get(format!("/customers/{}", customer_id)))
                    .reject_error_envelope(),
            )
        }
        CustomerOperation::GetAll => {
            if params.bool_or("returnAll", false) {
                Ok(RequestPlan::all_items(
                    OperationRequest::get("/customers"),
                    "customers",
                ))
            } else {
                let query = vec![("limit".to_string(), params.u64_or("limit", 100).to_string())];
                Ok(RequestPlan::single(
                    OperationRequest::get("/customers").with_query(query),
                ))
            }
        }
        CustomerOperation::Update => {
            let customer_id = params.required_str("customerId")?;
            let update_fields = params.object("updateFields");
            if update_fields.is_empty() {
                return Err(SquareError::Validation(
                    "Please enter at least one field to update for the customer".to_string(),
                ));
            }
            Ok(RequestPlan::single(OperationRequest::put(
                format!("/customers/{}", customer_id),
                Value::Object(update_fields),
            )))
        }
        CustomerOperation::Delete => {
            let customer_id = params.required_str("customerId")?;
            Ok(RequestPlan::single(OperationRequest::delete(format!(
                "/customers/{}",
                customer_id
            ))))
        }
        CustomerOperation::Search => {
            let mut body = id_filter_search_body(params);
            if params.bool_or("returnAll", false) {
                let request = OperationRequest::post("/customers/search", Value::Object(body));
                Ok(RequestPlan::all_items(request, "customers"))
            } else {
                body.insert("limit".into(), json!(params.u64_or("limit", 100)));
                Ok(RequestPlan::single(OperationRequest::post(
                    "/customers/search",
                    Value::Object(body),
                )))
            }
        }
    }
}
