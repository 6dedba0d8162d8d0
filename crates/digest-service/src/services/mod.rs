//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate the reaction store.

pub mod context;
pub mod counter;
pub mod digest;
pub mod error;
pub mod record;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use counter::ReactionCounterService;
pub use digest::DigestService;
pub use error::{ServiceError, ServiceResult};
pub use record::ReactionRecordService;
