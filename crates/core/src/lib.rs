//! Stockpile domain layer.
//!
//! Holds the types shared by the storage and HTTP crates: identifiers and
//! timestamps, the error taxonomy, resource input validation, and the
//! currency conversion engine.

pub mod conversion;
pub mod error;
pub mod resource;
pub mod types;
