//! Request plans produced by operation planning.

use serde_json::Value;
use std::fmt;

/// HTTP methods the API surface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One concrete HTTP request: method, path, JSON body, query parameters.
/// A `Null` body means no body is sent.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    pub method: Method,
    pub path: String,
    pub body: Value,
    pub query: Vec<(String, String)>,
}

impl OperationRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: Value::Null,
            query: Vec::new(),
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body,
            query: Vec::new(),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body,
            query: Vec::new(),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: Value::Null,
            query: Vec::new(),
        }
    }

    pub fn delete_with_body(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body,
            query: Vec::new(),
        }
    }

    /// Attach query parameters.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Set one query parameter, replacing any existing value for the key.
    pub fn set_query(&mut self, key: &str, value: &str) {
        self.query.retain(|(existing, _)| existing != key);
        self.query.push((key.to_string(), value.to_string()));
    }
}

/// How a planned request should be executed and its response shaped.
#[derive(Debug, Clone)]
pub struct RequestPlan {
    pub request: OperationRequest,
    /// When set, follow the response cursor and accumulate this array field.
    pub paginate: Option<&'static str>,
    /// When set, return this array field of a single response, empty when
    /// the field is absent.
    pub pluck: Option<&'static str>,
    /// Treat a 2xx body carrying an `error` object as a failure.
    pub reject_error_envelope: bool,
}

impl RequestPlan {
    /// One request, response returned as-is.
    pub fn single(request: OperationRequest) -> Self {
        Self {
            request,
            paginate: None,
            pluck: None,
            reject_error_envelope: false,
        }
    }

    /// Cursor walk accumulating `field` across pages.
    pub fn all_items(request: OperationRequest, field: &'static str) -> Self {
        Self {
            request,
            paginate: Some(field),
            pluck: None,
            reject_error_envelope: false,
        }
    }

    pub fn pluck(mut self, field: &'static str) -> Self {
        self.pluck = Some(field);
        self
    }

    pub fn reject_error_envelope(mut self) -> Self {
        self.reject_error_envelope = true;
        self
    }
}
