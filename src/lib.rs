//! Square commerce API connector for workflow hosts.
//!
//! Maps (resource, operation) pairs plus per-item parameters onto Square
//! REST calls: request planning, credential-based endpoint selection,
//! cursor pagination, and per-item continue-on-fail error isolation.

pub mod error;
pub mod node;
pub mod resource;
pub mod square;

pub use error::{ItemError, SquareError};
pub use node::{ResultRecord, SquareNode, WorkItem};
pub use resource::{Method, OperationRequest, RequestPlan, ResourceOperation};
pub use square::credentials::{CredentialsError, Environment, SquareCredentials};
pub use square::http::SquareClient;
