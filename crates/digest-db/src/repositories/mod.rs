//! Repository implementations
//!
//! PostgreSQL implementation of the reaction store defined in digest-core.
//! The repository runs on the pool or on a shared transaction handle.

mod error;
mod reaction;
mod transaction;

pub use error::map_db_error;
pub use reaction::{PgReactionRepository, PgReactionTransaction};
pub use transaction::TransactionHandle;
