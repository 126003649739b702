//! Repository for the `resources` table.

use stockpile_core::types::DbId;

use crate::models::resource::{CreateResource, Resource, ResourceFilter, UpdateResource};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, created_at, updated_at";

/// Storage clock expression: RFC 3339 UTC with millisecond precision.
const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Shared `WHERE` clause for filtered reads. `?1` is the status, `?2` the
/// escaped `LIKE` pattern for the name substring.
const FILTER_CLAUSE: &str = "WHERE (?1 IS NULL OR status = ?1) \
     AND (?2 IS NULL OR name LIKE ?2 ESCAPE '\\')";

/// Provides CRUD operations for resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Insert a new resource, returning the created row.
    ///
    /// Both timestamps come from a single evaluation of the storage clock,
    /// so `created_at == updated_at` on a fresh row.
    pub async fn create(pool: &DbPool, input: &CreateResource) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (name, description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, {NOW}, {NOW})
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a resource by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = ?1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List resources matching `filter`, most recently created first.
    ///
    /// Rows sharing a `created_at` keep insertion order. A missing limit is
    /// unbounded (`LIMIT -1`), a missing offset starts at the first row.
    pub async fn find_all(
        pool: &DbPool,
        filter: &ResourceFilter,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM resources
             {FILTER_CLAUSE}
             ORDER BY created_at DESC, id ASC
             LIMIT ?3 OFFSET ?4"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(filter.status.as_deref())
            .bind(name_pattern(filter))
            .bind(filter.limit.unwrap_or(-1))
            .bind(filter.offset.unwrap_or(0))
            .fetch_all(pool)
            .await
    }

    /// Count resources matching the `status` / `name` parts of `filter`.
    /// Pagination fields are ignored.
    pub async fn count(pool: &DbPool, filter: &ResourceFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM resources {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.status.as_deref())
            .bind(name_pattern(filter))
            .fetch_one(pool)
            .await
    }

    /// Update a resource. Only non-`None` fields in `input` are applied.
    ///
    /// An empty `input` returns the current row without touching
    /// `updated_at`. Otherwise `updated_at` is refreshed, never moving
    /// backwards even if the clock does. Returns `None` if no row with the
    /// given `id` exists. The write is a single statement, so a concurrent
    /// delete either wins (→ `None`) or loses; the row is never recreated.
    #[tracing::instrument(skip(pool, input))]
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateResource,
    ) -> Result<Option<Resource>, sqlx::Error> {
        if input.is_empty() {
            tracing::debug!("Empty update, returning current row");
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE resources SET
                name = COALESCE(?1, name),
                description = COALESCE(?2, description),
                status = COALESCE(?3, status),
                updated_at = max(updated_at, {NOW})
             WHERE id = ?4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(input.name.as_deref())
            .bind(input.description.as_deref())
            .bind(input.status.map(|s| s.as_str()))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a resource by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the `LIKE` pattern for a substring match on `name`.
fn name_pattern(filter: &ResourceFilter) -> Option<String> {
    filter
        .name
        .as_deref()
        .map(|name| format!("%{}%", escape_like(name)))
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
