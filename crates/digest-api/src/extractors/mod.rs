//! Axum extractors for request handling
//!
//! Custom extractors for path parameters, JSON bodies, and validated queries.

mod path;
mod validated;

pub use path::{ChatIdPath, RecordPath, TypedPath};
pub use validated::{JsonBody, ValidatedQuery};
