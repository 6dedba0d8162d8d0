//! # digest-core
//!
//! Domain layer for the reaction digest: reaction records, the storage-agnostic
//! query model, inbound events, and the repository traits implemented by the
//! database layer. This crate has no dependency on infrastructure.

pub mod entities;
pub mod error;
pub mod events;
pub mod query;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{DigestEntry, DigestPeriod, NewReactionRecord, ReactionKey, ReactionRecord};
pub use error::DomainError;
pub use events::{ChatKind, DigestRequested, ReactionChanged};
pub use query::{
    Column, ColumnValue, Entity, Filter, FilterOp, Pager, Projection, QueryConfig, QueryOptions,
    ReactionColumn, ReactionQueryConfig, ReactionSearch, ReactionSelect, Select, SortDirection,
    SortField,
};
pub use traits::{ReactionRepository, ReactionStore, ReactionTransaction, RepoResult};
pub use value_objects::{ChatId, IdParseError, MessageId};
