//! Resource entity model, request payloads, and list filters.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockpile_core::error::CoreError;
use stockpile_core::resource::{validate_create, validate_update};
use stockpile_core::types::{DbId, Timestamp};

pub use stockpile_core::resource::{CreateResource, ResourceStatus, UpdateResource};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `resources` table. Serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: ResourceStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of `POST /api/resources` before validation.
///
/// Every field is optional at the wire level so a missing field surfaces as
/// a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateResourceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl CreateResourceRequest {
    pub fn validate(self) -> Result<CreateResource, CoreError> {
        validate_create(self.name, self.description, self.status)
    }
}

/// Body of `PUT /api/resources/{id}`. Any subset of fields; `null` counts
/// as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResourceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl UpdateResourceRequest {
    pub fn validate(self) -> Result<UpdateResource, CoreError> {
        validate_update(self.name, self.description, self.status)
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Narrows which resources `find_all` / `count` return.
///
/// `status` is matched exactly and is not checked against the enumeration,
/// so an unknown value simply matches nothing. `limit` / `offset` only
/// apply to `find_all`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub status: Option<String>,
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /api/resources`.
///
/// Kept as raw strings; [`ResourceListParams::into_filter`] applies the
/// lenient parsing rules so listing never fails on bad parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceListParams {
    pub status: Option<String>,
    pub name: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ResourceListParams {
    /// Collect decoded query pairs. The first occurrence of a repeated key
    /// wins; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "status" => &mut params.status,
                "name" => &mut params.name,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Empty values are dropped; `limit` / `offset` that are not integers
    /// are ignored. Zero and negative integers pass through unchanged.
    pub fn into_filter(self) -> ResourceFilter {
        ResourceFilter {
            status: self.status.filter(|s| !s.is_empty()),
            name: self.name.filter(|s| !s.is_empty()),
            limit: parse_int(self.limit.as_deref()),
            offset: parse_int(self.offset.as_deref()),
        }
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}
