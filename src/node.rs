//! Item-by-item execution.
//!
//! A node is configured once with a resolved (resource, operation) pair and
//! then processes input items strictly in order, one request per item. With
//! continue-on-fail enabled a failing item becomes an `{error}` record and
//! the run moves on; otherwise the run aborts at the failing item and later
//! items are never processed.

use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ItemError, SquareError};
use crate::resource::{self, Params, ResourceOperation};
use crate::square::http::SquareClient;

/// One unit of input: the parameter values the host resolved for this item.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub params: Value,
}

impl WorkItem {
    pub fn new(params: Value) -> Self {
        Self { params }
    }
}

/// One output record, tagged with the input item it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub json: Value,
    pub item_index: usize,
}

impl ResultRecord {
    fn error(message: String, item_index: usize) -> Self {
        Self {
            json: json!({ "error": message }),
            item_index,
        }
    }
}

/// Executes one operation against a batch of items.
pub struct SquareNode {
    client: SquareClient,
    operation: ResourceOperation,
    continue_on_fail: bool,
}

impl SquareNode {
    /// Resolve the (resource, operation) pair once. An unknown pair fails
    /// here, before any item is processed.
    pub fn new(
        client: SquareClient,
        resource: &str,
        operation: &str,
    ) -> Result<Self, SquareError> {
        let operation = ResourceOperation::resolve(resource, operation)?;
        Ok(Self {
            client,
            operation,
            continue_on_fail: false,
        })
    }

    /// Record item failures as `{error}` outputs instead of aborting the run.
    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Process every item in order. Array responses flatten into one record
    /// per element, all tagged with the originating item index.
    pub async fn execute(&self, items: &[WorkItem]) -> Result<Vec<ResultRecord>, ItemError> {
        let mut return_data = Vec::new();

        for (item_index, item) in items.iter().enumerate() {
            match self.process_item(item, item_index).await {
                Ok(response) => push_records(&mut return_data, response, item_index),
                Err(err) if self.continue_on_fail => {
                    debug!("Item {} failed, continuing: {}", item_index, err);
                    return_data.push(ResultRecord::error(err.to_string(), item_index));
                }
                Err(source) => {
                    return Err(ItemError {
                        item_index,
                        source,
                    })
                }
            }
        }

        Ok(return_data)
    }

    async fn process_item(
        &self,
        item: &WorkItem,
        item_index: usize,
    ) -> Result<Value, SquareError> {
        let params = Params::new(&item.params);
        let plan = resource::plan(&self.operation, &params, item_index)?;

        if let Some(field) = plan.paginate {
            let items = self.client.call_all_items(&plan.request, field).await?;
            return Ok(Value::Array(items));
        }

        let response = self.client.call(&plan.request).await?;

        if plan.reject_error_envelope {
            if let Some(error) = response.get("error").filter(|error| !error.is_null()) {
                let message = error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                return Err(SquareError::Remote(message));
            }
        }

        match plan.pluck {
            Some(field) => Ok(response
                .get(field)
                .filter(|value| !value.is_null())
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new()))),
            None => Ok(response),
        }
    }
}

/// Flatten array responses into one record per element; everything else is
/// a single record.
fn push_records(out: &mut Vec<ResultRecord>, response: Value, item_index: usize) {
    match response {
        Value::Array(values) => out.extend(
            values
                .into_iter()
                .map(|json| ResultRecord { json, item_index }),
        ),
        json => out.push(ResultRecord { json, item_index }),
    }
}
