//! Error taxonomy for dispatch, transport, and per-item execution.

use thiserror::Error;

/// Everything that can go wrong while planning or performing one operation.
#[derive(Debug, Error)]
pub enum SquareError {
    #[error("{field} must be valid JSON")]
    InvalidJson { field: &'static str },

    #[error("{0}")]
    Validation(String),

    #[error("the resource \"{0}\" is not known")]
    UnknownResource(String),

    #[error("the operation \"{operation}\" is not supported for resource \"{resource}\"")]
    UnsupportedOperation {
        resource: &'static str,
        operation: String,
    },

    /// A 2xx response that carried an error object in its body.
    #[error("{0}")]
    Remote(String),

    #[error("Square request failed with status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("pagination exceeded {max_pages} pages without exhausting the cursor")]
    PageLimit { max_pages: usize },
}

/// A failure pinned to the input item that caused it.
#[derive(Debug, Error)]
#[error("item {item_index}: {source}")]
pub struct ItemError {
    pub item_index: usize,
    #[source]
    pub source: SquareError,
}
