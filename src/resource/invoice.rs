//! Invoice operation planning.

use serde_json::{json, Map, Value};

use super::dispatch::id_filter_search_body;
use super::params::Params;
use super::request::{OperationRequest, RequestPlan};
use super::InvoiceOperation;
use crate::error::SquareError;

pub(super) fn plan(
    operation: &InvoiceOperation,
    params: &Params<'_>,
) -> Result<RequestPlan, SquareError> {
    match operation {
        InvoiceOperation::Create => {
            let mut body = Map::new();
            body.insert("location_id".into(), json!(params.required_str("location_id")?));
            body.extend(params.object("additionalFields"));
            Ok(RequestPlan::single(OperationRequest::post(
                "/invoices",
                Value::Object(body),
            )))
        }
        InvoiceOperation::Get => {
            let invoice_id = params.required_str("invoiceId")?;
            Ok(RequestPlan::single(OperationRequest::get(format!("/invoices/{}", invoice_id))))
        }
        InvoiceOperation::GetAll => {
            if params.bool_or("returnAll", false) {
                Ok(RequestPlan::all_items(
                    OperationRequest::get("/invoices"),
                    "invoices",
                ))
            } else {
                let query = vec![("limit".to_string(), params.u64_or("limit", 100).to_string())];
                Ok(RequestPlan::single(
                    OperationRequest::get("/invoices").with_query(query),
                ))
            }
        }
        InvoiceOperation::Update => {
            let invoice_id = params.required_str("invoiceId")?;
            let version = params.required_i64("version")?;
            let update_fields = params.object("updateFields");
            if update_fields.is_empty() {
                return Err(SquareError::Validation(
                    "Please enter at least one field to update for the invoice".to_string(),
                ));
            }

            let mut invoice = Map::new();
            invoice.insert("version".into(), json!(version));
            invoice.extend(update_fields);

            Ok(RequestPlan::single(OperationRequest::put(
                format!("/invoices/{}", invoice_id),
                json!({ "invoice": invoice }),
            )))
        }
        InvoiceOperation::Delete => {
            let invoice_id = params.required_str("invoiceId")?;
            let version = params.required_i64("version")?;
            Ok(RequestPlan::single(OperationRequest::delete_with_body(
                format!("/invoices/{}", invoice_id),
                json!({ "version": version }),
            )))
        }
        InvoiceOperation::Search => {
            let mut body = id_filter_search_body(params);
            if params.bool_or("returnAll", false) {
                let request = OperationRequest::post("/invoices/search", Value::Object(body));
                Ok(RequestPlan::all_items(request, "invoices"))
            } else {
                body.insert("limit".into(), json!(params.u64_or("limit", 100)));
                Ok(RequestPlan::single(OperationRequest::post(
                    "/invoices/search",
                    Value::Object(body),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Method;
    use serde_json::json;

    fn plan_for(operation: InvoiceOperation, values: Value) -> RequestPlan {
        plan(&operation, &Params::new(&values)).expect("planning should succeed")
    }

    #[test]
    fn update_nests_the_version_under_invoice() {
        let plan = plan_for(
            InvoiceOperation::Update,
            json!({
                "invoiceId": "inv-1",
                "version": 4,
                "updateFields": { "payment_requests": [] },
            }),
        );
        assert_eq!(plan.request.method, Method::Put);
        assert_eq!(plan.request.path, "/invoices/inv-1");
        assert_eq!(
            plan.request.body,
            json!({ "invoice": { "version": 4, "payment_requests": [] } })
        );
    }

    #[test]
    fn update_rejects_an_empty_field_set() {
        let values = json!({ "invoiceId": "inv-1", "version": 4, "updateFields": {} });
        let err = plan(&InvoiceOperation::Update, &Params::new(&values)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter at least one field to update for the invoice"
        );
    }

    #[test]
    fn update_requires_a_version() {
        let values = json!({ "invoiceId": "inv-1", "updateFields": { "title": "Oct" } });
        let err = plan(&InvoiceOperation::Update, &Params::new(&values)).unwrap_err();
        assert!(matches!(err, SquareError::Validation(_)));
    }

    #[test]
    fn delete_sends_the_version_in_the_body() {
        let plan = plan_for(
            InvoiceOperation::Delete,
            json!({ "invoiceId": "inv-2", "version": 7 }),
        );
        assert_eq!(plan.request.method, Method::Delete);
        assert_eq!(plan.request.path, "/invoices/inv-2");
        assert_eq!(plan.request.body, json!({ "version": 7 }));
    }

    #[test]
    fn search_paginates_the_invoices_field() {
        let plan = plan_for(
            InvoiceOperation::Search,
            json!({
                "searchFields": { "location_ids": "L-1,L-2" },
                "returnAll": true,
            }),
        );
        assert_eq!(plan.request.path, "/invoices/search");
        assert_eq!(plan.paginate, Some("invoices"));
        assert_eq!(
            plan.request.body,
            json!({ "query": { "filter": { "location_ids": ["L-1", "L-2"] } } })
        );
    }

    #[test]
    fn create_merges_additional_fields() {
        let plan = plan_for(
            InvoiceOperation::Create,
            json!({
                "location_id": "L-9",
                "additionalFields": { "primary_recipient": { "customer_id": "c-1" } },
            }),
        );
        assert_eq!(
            plan.request.body,
            json!({
                "location_id": "L-9",
                "primary_recipient": { "customer_id": "c-1" },
            })
        );
    }
}
