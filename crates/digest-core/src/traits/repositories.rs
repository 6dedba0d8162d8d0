//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{DigestEntry, NewReactionRecord, ReactionKey, ReactionRecord};
use crate::error::DomainError;
use crate::query::{Pager, QueryOptions, ReactionColumn, ReactionSearch};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the single record matching `search`.
    ///
    /// Returns `Ok(None)` when nothing matches and
    /// `DomainError::MultipleResults` when more than one row does.
    async fn find_one(
        &self,
        search: &ReactionSearch,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Option<ReactionRecord>>;

    /// Find a record by its key
    async fn find_by_key(&self, key: ReactionKey) -> RepoResult<Option<ReactionRecord>> {
        self.find_one(&ReactionSearch::by_key(key), QueryOptions::new())
            .await
    }

    /// List records matching `search`, one page at a time
    async fn find_many(
        &self,
        search: &ReactionSearch,
        pager: Pager,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Vec<ReactionRecord>>;

    /// Like `find_many` but only materializes the digest columns
    async fn find_entries(
        &self,
        search: &ReactionSearch,
        pager: Pager,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Vec<DigestEntry>>;

    /// Count records matching `search`, ignoring pagination
    async fn count(
        &self,
        search: &ReactionSearch,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<i64>;

    /// Insert a record; a duplicate key is a `ConstraintViolation`
    async fn insert(&self, record: &NewReactionRecord) -> RepoResult<ReactionRecord>;

    /// Update the mutable columns by key; `false` when no row was affected
    async fn update(&self, record: &ReactionRecord) -> RepoResult<bool>;

    /// Delete by key; `false` when no row was affected
    async fn delete(&self, key: ReactionKey) -> RepoResult<bool>;
}

// ============================================================================
// Transactions
// ============================================================================

/// A store that can open transactions over reaction records
#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Repository outside any transaction
    fn reactions(&self) -> &dyn ReactionRepository;

    /// Begin a transaction
    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>>;

    /// Check that the backend is reachable
    async fn ping(&self) -> RepoResult<()>;
}

/// An open transaction. Dropping it without `commit` rolls back.
#[async_trait]
pub trait ReactionTransaction: Send + Sync {
    /// Repository bound to this transaction
    fn reactions(&self) -> &dyn ReactionRepository;

    /// Block until no other transaction holds `key`; released at commit or rollback
    async fn lock_key(&self, key: ReactionKey) -> RepoResult<()>;

    async fn commit(self: Box<Self>) -> RepoResult<()>;

    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}
