//! Resource and operation dispatch.
//!
//! The host hands over the resource and operation as strings; they resolve
//! here into typed variants once per run, so every operation is planned by
//! an exhaustive match instead of string comparisons per item.

mod booking;
mod catalog;
mod customer;
mod dispatch;
mod invoice;
mod order;
pub mod params;
pub mod request;

pub use dispatch::plan;
pub use params::Params;
pub use request::{Method, OperationRequest, RequestPlan};

use crate::error::SquareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOperation {
    Create,
    Get,
    GetAll,
    Update,
    Cancel,
    SearchAvailability,
    GetBusinessProfile,
    GetLocationProfile,
    GetLocationProfiles,
    GetTeamMemberProfile,
    GetTeamMemberProfiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOperation {
    Get,
    List,
    BatchRetrieve,
    BatchUpsert,
    GetCatalogInfo,
    SearchObjects,
    SearchItems,
    UpdateItemModifierLists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerOperation {
    Create,
    Get,
    GetAll,
    Update,
    Delete,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceOperation {
    Create,
    Get,
    GetAll,
    Update,
    Delete,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOperation {
    Create,
    Get,
    BatchRetrieve,
    Search,
    Update,
    Pay,
}

impl BookingOperation {
    fn parse(operation: &str) -> Option<Self> {
        Some(match operation {
            "create" => Self::Create,
            "get" => Self::Get,
            "getAll" => Self::GetAll,
            "update" => Self::Update,
            "cancel" => Self::Cancel,
            "searchAvailability" => Self::SearchAvailability,
            "getBusinessProfile" => Self::GetBusinessProfile,
            "getLocationProfile" => Self::GetLocationProfile,
            "getLocationProfiles" => Self::GetLocationProfiles,
            "getTeamMemberProfile" => Self::GetTeamMemberProfile,
            "getTeamMemberProfiles" => Self::GetTeamMemberProfiles,
            _ => return None,
        })
    }
}

impl CatalogOperation {
    fn parse(operation: &str) -> Option<Self> {
        Some(match operation {
            "get" => Self::Get,
            "list" => Self::List,
            "batchRetrieve" => Self::BatchRetrieve,
            "batchUpsert" => Self::BatchUpsert,
            "getCatalogInfo" => Self::GetCatalogInfo,
            "searchObjects" => Self::SearchObjects,
            "searchItems" => Self::SearchItems,
            "updateItemModifierLists" => Self::UpdateItemModifierLists,
            _ => return None,
        })
    }
}

impl CustomerOperation {
    fn parse(operation: &str) -> Option<Self> {
        Some(match operation {
            "create" => Self::Create,
            "get" => Self::Get,
            "getAll" => Self::GetAll,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "search" => Self::Search,
            _ => return None,
        })
    }
}

impl InvoiceOperation {
    fn parse(operation: &str) -> Option<Self> {
        Some(match operation {
            "create" => Self::Create,
            "get" => Self::Get,
            "getAll" => Self::GetAll,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "search" => Self::Search,
            _ => return None,
        })
    }
}

impl OrderOperation {
    fn parse(operation: &str) -> Option<Self> {
        Some(match operation {
            "create" => Self::Create,
            "get" => Self::Get,
            "batchRetrieve" => Self::BatchRetrieve,
            "search" => Self::Search,
            "update" => Self::Update,
            "pay" => Self::Pay,
            _ => return None,
        })
    }
}

/// A fully resolved (resource, operation) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOperation {
    Booking(BookingOperation),
    Catalog(CatalogOperation),
    Customer(CustomerOperation),
    Invoice(InvoiceOperation),
    Order(OrderOperation),
}

impl ResourceOperation {
    /// Resolve the host's strings into a typed pair. Unknown resources and
    /// unsupported operations fail here, before any item is processed.
    pub fn resolve(resource: &str, operation: &str) -> Result<Self, SquareError> {
        match resource {
            "booking" => BookingOperation::parse(operation)
                .map(Self::Booking)
                .ok_or_else(|| unsupported("booking", operation)),
            "catalog" => CatalogOperation::parse(operation)
                .map(Self::Catalog)
                .ok_or_else(|| unsupported("catalog", operation)),
            "customer" => CustomerOperation::parse(operation)
                .map(Self::Customer)
                .ok_or_else(|| unsupported("customer", operation)),
            "invoice" => InvoiceOperation::parse(operation)
                .map(Self::Invoice)
                .ok_or_else(|| unsupported("invoice", operation)),
            "order" => OrderOperation::parse(operation)
                .map(Self::Order)
                .ok_or_else(|| unsupported("order", operation)),
            other => Err(SquareError::UnknownResource(other.to_string())),
        }
    }
}

fn unsupported(resource: &'static str, operation: &str) -> SquareError {
    SquareError::UnsupportedOperation {
        resource,
        operation: operation.to_string(),
    }
}
