use std::sync::Arc;

use stockpile_core::conversion::PriceTable;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. The only handle through which storage is reached.
    pub pool: stockpile_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Token prices used by the conversion endpoints.
    pub prices: Arc<PriceTable>,
}
