//! Shared response envelope types for API handlers.
//!
//! Single resources are returned bare; collections use one of the
//! envelopes below so clients always find rows under `data`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paginated list envelope: `{ "data", "total", "limit", "offset" }`.
///
/// `total` counts every matching row regardless of pagination. `limit`
/// and `offset` echo what was applied and serialize as `null` when absent.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `{ "message": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
