//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Message link formatting for digest entries

pub mod links;
pub mod requests;
pub mod responses;

pub use links::message_link;
pub use requests::DigestQuery;
pub use responses::{
    DigestItem, DigestResponse, HealthChecks, HealthResponse, ReactionEventAck,
    ReactionRecordResponse, ReadinessResponse,
};
