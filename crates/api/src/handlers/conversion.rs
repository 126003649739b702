//! Handlers for the token price table and conversion calculator.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use stockpile_core::conversion::{Conversion, ConversionError, TokenPrice};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/convert`.
#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
}

/// Conversion result plus the four-decimal display string.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    #[serde(flatten)]
    pub conversion: Conversion,
    pub formatted: String,
}

/// GET /api/prices
///
/// The full price table in listing order.
pub async fn list_prices(State(state): State<AppState>) -> Json<DataResponse<Vec<TokenPrice>>> {
    Json(DataResponse {
        data: state.prices.tokens().to_vec(),
    })
}

/// GET /api/convert?from=&to=&amount=
pub async fn convert(
    State(state): State<AppState>,
    params: Result<Query<ConvertParams>, QueryRejection>,
) -> AppResult<Json<ConvertResponse>> {
    let Query(params) = params?;

    let (Some(from), Some(to)) = (
        params.from.filter(|s| !s.is_empty()),
        params.to.filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Missing required query parameters: from, to".into(),
        ));
    };

    let amount = params
        .amount
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .ok_or(ConversionError::InvalidAmount)?;

    let conversion = state.prices.convert(&from, &to, amount)?;
    let formatted = conversion.formatted_output();

    Ok(Json(ConvertResponse {
        conversion,
        formatted,
    }))
}
