//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request payloads as they arrive over HTTP
//! - Query parameter and filter types for list endpoints

pub mod resource;
