//! Handlers for the `/resources` collection.
//!
//! Each handler validates its input before the repository is called, so a
//! rejected request never reaches storage.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use stockpile_core::error::CoreError;
use stockpile_core::resource::{parse_resource_id, RESOURCE_ENTITY};
use stockpile_core::types::DbId;
use stockpile_db::models::resource::{
    CreateResourceRequest, Resource, ResourceListParams, UpdateResourceRequest,
};
use stockpile_db::repositories::ResourceRepo;

use crate::error::{AppError, AppResult};
use crate::response::{ListResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/resources
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateResourceRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Resource>)> {
    let Json(payload) = payload?;
    let input = payload.validate()?;

    let resource = ResourceRepo::create(&state.pool, &input).await?;

    tracing::info!(resource_id = resource.id, status = %resource.status, "Resource created");

    Ok((StatusCode::CREATED, Json(resource)))
}

/// GET /api/resources
///
/// Supports `?status=&name=&limit=&offset=`. `total` ignores pagination.
/// Parameters are read as raw pairs so repeated or malformed values never
/// reject the request.
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<ListResponse<Resource>>> {
    let filter = ResourceListParams::from_pairs(pairs).into_filter();

    let data = ResourceRepo::find_all(&state.pool, &filter).await?;
    let total = ResourceRepo::count(&state.pool, &filter).await?;

    Ok(Json(ListResponse {
        data,
        total,
        limit: filter.limit,
        offset: filter.offset,
    }))
}

/// GET /api/resources/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Resource>> {
    let id = parse_resource_id(&raw_id)?;

    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(resource))
}

/// PUT /api/resources/{id}
///
/// Partial update: omitted or `null` fields keep their value.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateResourceRequest>, JsonRejection>,
) -> AppResult<Json<Resource>> {
    let id = parse_resource_id(&raw_id)?;
    let Json(payload) = payload?;
    let input = payload.validate()?;

    let resource = ResourceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(resource_id = id, "Resource updated");

    Ok(Json(resource))
}

/// DELETE /api/resources/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_resource_id(&raw_id)?;

    if !ResourceRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(resource_id = id, "Resource deleted");

    Ok(Json(MessageResponse {
        message: "Resource deleted successfully",
    }))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: RESOURCE_ENTITY,
        id,
    })
}
