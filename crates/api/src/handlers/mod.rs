pub mod conversion;
pub mod fallback;
pub mod resources;
