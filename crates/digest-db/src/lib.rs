//! # digest-db
//!
//! Database layer implementing the reaction store with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Rendering of the storage-agnostic query model to SQL
//! - `PgReactionRepository`, usable on the pool or bound to a transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use digest_db::{create_pool, ensure_schema, PgReactionRepository, PoolConfig};
//! use digest_core::{ReactionKey, ReactionRepository};
//!
//! async fn example(config: &PoolConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     ensure_schema(&pool).await?;
//!
//!     let repo = PgReactionRepository::new(pool);
//!     let record = repo.find_by_key(ReactionKey::from_raw(42, -100)).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod sql;

// Re-export commonly used types
pub use pool::{create_pool, ensure_schema, PgPool, PoolConfig};
pub use repositories::{PgReactionRepository, PgReactionTransaction, TransactionHandle};
