//! Per-item parameter access.
//!
//! Parameters arrive from the host form layer as one JSON object per item.
//! Unset optional fields come through as empty strings, zeroes, or false,
//! so the presence-aware accessors treat those values as absent.

use serde_json::{Map, Value};

use crate::error::SquareError;

/// Borrowed view over one item's parameter object.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    values: Option<&'a Map<String, Value>>,
}

impl<'a> Params<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            values: value.as_object(),
        }
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        self.values.and_then(|map| map.get(key))
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.raw(key).filter(|value| is_set(value))
    }

    /// Required string parameter.
    pub fn required_str(&self, key: &str) -> Result<&'a str, SquareError> {
        self.present(key)
            .and_then(Value::as_str)
            .ok_or_else(|| missing(key))
    }

    /// Required parameter of any shape.
    pub fn required_value(&self, key: &str) -> Result<&'a Value, SquareError> {
        self.present(key).ok_or_else(|| missing(key))
    }

    /// Required integer; zero counts as a real value here (record versions).
    pub fn required_i64(&self, key: &str) -> Result<i64, SquareError> {
        self.raw(key)
            .and_then(Value::as_i64)
            .ok_or_else(|| missing(key))
    }

    /// Optional string, `None` when unset or empty.
    pub fn str_opt(&self, key: &str) -> Option<&'a str> {
        self.present(key).and_then(Value::as_str)
    }

    /// Optional integer, zero treated as unset per the form conventions.
    pub fn i64_opt(&self, key: &str) -> Option<i64> {
        self.present(key).and_then(Value::as_i64)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.raw(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn u64_or(&self, key: &str, default: u64) -> u64 {
        self.raw(key).and_then(Value::as_u64).unwrap_or(default)
    }

    /// Nested parameter collection (additional fields, filters, sort).
    /// Missing collections read as empty.
    pub fn collection(&self, key: &str) -> Params<'a> {
        Params {
            values: self.raw(key).and_then(Value::as_object),
        }
    }

    /// Owned copy of a nested object, empty when unset.
    pub fn object(&self, key: &str) -> Map<String, Value> {
        self.raw(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// Optional non-empty array, passed through as-is.
    pub fn array_opt(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.present(key)
            .and_then(Value::as_array)
            .filter(|values| !values.is_empty())
    }

    /// Required comma-separated ID list, each entry trimmed.
    pub fn id_list(&self, key: &str) -> Result<Vec<String>, SquareError> {
        self.required_str(key).map(split_ids)
    }

    /// Optional comma-separated ID list.
    pub fn id_list_opt(&self, key: &str) -> Option<Vec<String>> {
        self.str_opt(key).map(split_ids)
    }

    /// Optional raw-JSON field. A string value must parse; anything already
    /// structured passes through. `label` names the field in the failure
    /// message.
    pub fn json_opt(&self, key: &str, label: &'static str) -> Result<Option<Value>, SquareError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(raw)) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|_| SquareError::InvalidJson { field: label }),
            Some(value) => Ok(Some(value.clone())),
        }
    }

    /// Required raw-JSON field. An empty string is present but unparseable,
    /// so it reports invalid JSON rather than a missing parameter.
    pub fn json_required(&self, key: &str, label: &'static str) -> Result<Value, SquareError> {
        match self.raw(key).ok_or_else(|| missing(key))? {
            Value::String(raw) => {
                serde_json::from_str(raw).map_err(|_| SquareError::InvalidJson { field: label })
            }
            value => Ok(value.clone()),
        }
    }
}

fn missing(key: &str) -> SquareError {
    SquareError::Validation(format!("required parameter \"{}\" is missing", key))
}

/// Presence per the host form layer: empty strings, zero, and false are
/// placeholders for "not set".
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',').map(|id| id.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_lists_split_on_commas_and_trim() {
        let values = json!({ "objectIds": " A, B ,C " });
        let params = Params::new(&values);
        assert_eq!(params.id_list("objectIds").unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn empty_strings_read_as_absent() {
        let values = json!({ "locationId": "", "customerId": "c-1" });
        let params = Params::new(&values);
        assert_eq!(params.str_opt("locationId"), None);
        assert_eq!(params.str_opt("customerId"), Some("c-1"));
        assert!(params.required_str("locationId").is_err());
    }

    #[test]
    fn zero_and_false_read_as_absent() {
        let values = json!({ "catalog_version": 0, "bookable_only": false });
        let params = Params::new(&values);
        assert_eq!(params.i64_opt("catalog_version"), None);
        assert!(!params.bool_or("bookable_only", false));
    }

    #[test]
    fn json_opt_parses_strings_and_passes_structures_through() {
        let values = json!({
            "searchQuery": r#"{"exact_query": {"attribute_name": "name"}}"#,
            "orderDetails": { "line_items": [] },
        });
        let params = Params::new(&values);

        let parsed = params.json_opt("searchQuery", "Search Query field").unwrap();
        assert_eq!(
            parsed,
            Some(json!({ "exact_query": { "attribute_name": "name" } }))
        );

        let passed = params.json_opt("orderDetails", "Order Details").unwrap();
        assert_eq!(passed, Some(json!({ "line_items": [] })));

        assert_eq!(params.json_opt("absent", "Absent field").unwrap(), None);
    }

    #[test]
    fn json_opt_reports_the_field_label_on_bad_input() {
        let values = json!({ "batches": "{not json" });
        let params = Params::new(&values);
        let err = params.json_opt("batches", "Batches field").unwrap_err();
        assert_eq!(err.to_string(), "Batches field must be valid JSON");
    }

    #[test]
    fn json_required_rejects_empty_strings_as_invalid() {
        let values = json!({ "orderUpdates": "" });
        let params = Params::new(&values);
        let err = params
            .json_required("orderUpdates", "Order Updates")
            .unwrap_err();
        assert!(matches!(err, SquareError::InvalidJson { field } if field == "Order Updates"));
    }

    #[test]
    fn required_i64_accepts_zero_versions() {
        let values = json!({ "version": 0 });
        let params = Params::new(&values);
        assert_eq!(params.required_i64("version").unwrap(), 0);
    }

    #[test]
    fn collections_nest_and_default_to_empty() {
        let values = json!({ "additionalFields": { "customer_id": "c-9" } });
        let params = Params::new(&values);
        assert_eq!(
            params.collection("additionalFields").str_opt("customer_id"),
            Some("c-9")
        );
        assert_eq!(params.collection("filters").str_opt("anything"), None);
        assert!(params.object("filters").is_empty());
    }

    #[test]
    fn arrays_must_be_non_empty_to_count() {
        let values = json!({ "state_filter": [], "states": ["OPEN"] });
        let params = Params::new(&values);
        assert!(params.array_opt("state_filter").is_none());
        assert_eq!(params.array_opt("states").unwrap().len(), 1);
    }
}
