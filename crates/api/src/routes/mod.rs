pub mod health;
pub mod resources;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /resources                 create (POST), list (GET)
/// /resources/{id}            get, update (PUT), delete
///
/// /prices                    price table (GET)
/// /convert                   token conversion (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/resources", resources::router())
        .route("/prices", get(handlers::conversion::list_prices))
        .route("/convert", get(handlers::conversion::convert))
}
