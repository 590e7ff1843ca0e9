//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope.

use serde::Serialize;
use toycraft_core::types::DbId;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload of the counting endpoints.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub total: u64,
}

/// Payload of bulk creation endpoints.
#[derive(Debug, Serialize)]
pub struct IdsResponse {
    pub ids: Vec<DbId>,
}
