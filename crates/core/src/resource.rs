//! Resource status enumeration and input validation rules.
//!
//! The HTTP layer runs every inbound payload through these rules before
//! anything reaches the repository. The storage layer repeats the status
//! check as a `CHECK` constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in not-found errors and log fields.
pub const RESOURCE_ENTITY: &str = "Resource";

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: name, description, status";
pub const INVALID_STATUS_MESSAGE: &str = "Status must be either \"active\" or \"inactive\"";
pub const INVALID_ID_MESSAGE: &str = "Invalid resource ID";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a resource. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Active,
    Inactive,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 2] = [ResourceStatus::Active, ResourceStatus::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = CoreError;

    /// Exact, case-sensitive match against `active` / `inactive`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(INVALID_STATUS_MESSAGE.to_string()))
    }
}

/// Row decoding goes through this impl (`#[sqlx(try_from = "String")]`).
impl TryFrom<String> for ResourceStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Validation rules
// ---------------------------------------------------------------------------

/// Validated input for a new resource. Produced by [`validate_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResource {
    pub name: String,
    pub description: String,
    pub status: ResourceStatus,
}

/// Validated partial update. `None` means "leave unchanged".
/// Produced by [`validate_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateResource {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ResourceStatus>,
}

impl UpdateResource {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Validate a create payload.
///
/// All three fields are required and must be non-empty; the missing-field
/// check runs before the status check so a payload that is both incomplete
/// and carries a bad status reports the missing fields.
pub fn validate_create(
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
) -> Result<CreateResource, CoreError> {
    let (Some(name), Some(description), Some(status)) = (
        non_empty(name),
        non_empty(description),
        non_empty(status),
    ) else {
        return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    };

    Ok(CreateResource {
        name,
        description,
        status: status.parse()?,
    })
}

/// Validate a partial update payload. Any subset of fields may be present.
pub fn validate_update(
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
) -> Result<UpdateResource, CoreError> {
    let status = status.map(|s| s.parse::<ResourceStatus>()).transpose()?;
    check_not_empty("name", name.as_deref())?;
    check_not_empty("description", description.as_deref())?;

    Ok(UpdateResource {
        name,
        description,
        status,
    })
}

/// Parse a path id segment. Only a complete base-10 integer is accepted.
pub fn parse_resource_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| CoreError::Validation(INVALID_ID_MESSAGE.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn check_not_empty(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some("") => Err(CoreError::Validation(format!("{field} must not be empty"))),
        _ => Ok(()),
    }
}
