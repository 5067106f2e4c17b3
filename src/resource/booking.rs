//! Booking operation planning.

use serde_json::{json, Map, Value};

use super::params::Params;
use super::request::{OperationRequest, RequestPlan};
use super::BookingOperation;
use crate::error::SquareError;

/// Listing filter parameters and the query keys they map to.
const LIST_FILTERS: &[(&str, &str)] = &[
    ("locationId", "location_id"),
    ("teamMemberId", "team_member_id"),
    ("customerId", "customer_id"),
    ("startAtMin", "start_at_min"),
    ("startAtMax", "start_at_max"),
];

pub(super) fn plan(
    operation: &BookingOperation,
    params: &Params<'_>,
) -> Result<RequestPlan, SquareError> {
    match operation {
        BookingOperation::Create => {
            let mut body = Map::new();
            body.insert("location_id".into(), json!(params.required_str("locationId")?));
            body.extend(params.object("additionalFields"));
            Ok(RequestPlan::single(OperationRequest::post(
                "/bookings",
                Value::Object(body),
            )))
        }
        BookingOperation::Get => {
            let booking_id = params.required_str("bookingId")?;
            Ok(RequestPlan::single(OperationRequest::get(format!("/bookings/{}", booking_id))))
        }
        BookingOperation::GetAll => {
            let filters = params.collection("filters");
            let mut query = Vec::new();
            for (param, key) in LIST_FILTERS {
                if let Some(value) = filters.str_opt(param) {
                    query.push((key.to_string(), value.to_string()));
                }
            }

            if params.bool_or("returnAll", false) {
                let request = OperationRequest::get("/bookings").with_query(query);
                Ok(RequestPlan::all_items(request, "bookings"))
            } else {
                query.push(("limit".to_string(), params.u64_or("limit", 50).to_string()));
                Ok(RequestPlan::single(
                    OperationRequest::get("/bookings").with_query(query),
                ))
            }
        }
        BookingOperation::Update => {
            let booking_id = params.required_str("bookingId")?;
            let body = json!({ "booking": params.object("updateFields") });
            Ok(RequestPlan::single(OperationRequest::put(
                format!("/bookings/{}", booking_id),
                body,
            )))
        }
        BookingOperation::Cancel => {
            let booking_id = params.required_str("bookingId")?;
            // The current booking version is not fetched first; cancelling a
            // booking past version 1 fails the optimistic concurrency check.
            let body = json!({
                "booking_version": 1,
                "cancellation_reason": params.required_str("cancellationReason")?,
            });
            Ok(RequestPlan::single(OperationRequest::post(
                format!("/bookings/{}/cancel", booking_id),
                body,
            )))
        }
        BookingOperation::SearchAvailability => {
            let query = params.required_value("query")?.clone();
            Ok(RequestPlan::single(OperationRequest::post(
                "/bookings/availability/search",
                json!({ "query": query }),
            )))
        }
        BookingOperation::GetBusinessProfile => Ok(RequestPlan::single(OperationRequest::get(
            "/bookings/business-booking-profile",
        ))),
        BookingOperation::GetLocationProfile => {
            let location_id = params.required_str("locationId")?;
            Ok(RequestPlan::single(OperationRequest::get(format!(
                "/bookings/location-booking-profiles/{}",
                location_id
            ))))
        }
        BookingOperation::GetLocationProfiles => Ok(RequestPlan::single(OperationRequest::get(
            "/bookings/location-booking-profiles",
        ))),
        BookingOperation::GetTeamMemberProfile => {
            let team_member_id = params.required_str("teamMemberId")?;
            Ok(RequestPlan::single(OperationRequest::get(format!(
                "/bookings/team-member-booking-profiles/{}",
                team_member_id
            ))))
        }
        BookingOperation::GetTeamMemberProfiles => {
            let mut query = Vec::new();
            if params.bool_or("bookableOnly", false) {
                query.push(("bookable_only".to_string(), "true".to_string()));
            }
            if let Some(location_id) = params.str_opt("locationId") {
                query.push(("location_id".to_string(), location_id.to_string()));
            }
            Ok(RequestPlan::single(
                OperationRequest::get("/bookings/team-member-booking-profiles").with_query(query),
            ))
        }
    }
}
