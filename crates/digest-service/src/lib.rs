//! # digest-service
//!
//! Application layer: the reaction counter, the digest resolver, record
//! administration, and the DTOs exchanged with the HTTP layer.

pub mod dto;
pub mod services;

pub use dto::{
    DigestItem, DigestQuery, DigestResponse, HealthResponse, ReactionEventAck,
    ReactionRecordResponse, ReadinessResponse,
};
pub use services::{
    DigestService, ReactionCounterService, ReactionRecordService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
