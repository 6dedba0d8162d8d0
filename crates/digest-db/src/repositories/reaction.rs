//! PostgreSQL implementation of the reaction repository and store

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use digest_core::entities::{DigestEntry, NewReactionRecord, ReactionKey, ReactionRecord};
use digest_core::error::DomainError;
use digest_core::query::{
    Entity, Pager, Projection, QueryOptions, ReactionColumn, ReactionQueryConfig, ReactionSearch,
    ReactionSelect,
};
use digest_core::traits::{ReactionRepository, ReactionStore, ReactionTransaction, RepoResult};

use crate::mappers::ReactionInsert;
use crate::models::{DigestEntryModel, MessageReactionModel};
use crate::sql::{build_update, SelectBuilder};

use super::error::map_db_error;
use super::transaction::{finished, TransactionHandle};

/// Run `$fut` against the pool, or against the bound transaction when there is one
macro_rules! on_executor {
    ($repo:expr, |$conn:ident| $fut:expr) => {
        match &$repo.transaction {
            None => {
                let $conn = &$repo.pool;
                $fut.await.map_err(map_db_error)
            }
            Some(handle) => {
                let mut guard = handle.lock().await;
                match guard.as_mut() {
                    Some(tx) => {
                        let $conn = &mut **tx;
                        $fut.await.map_err(map_db_error)
                    }
                    None => Err(finished()),
                }
            }
        }
    };
}

const DIGEST_COLUMNS: [ReactionColumn; 3] = [
    ReactionColumn::ReactionsCount,
    ReactionColumn::MessageId,
    ReactionColumn::ChatId,
];

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
    transaction: Option<TransactionHandle>,
    config: Arc<ReactionQueryConfig>,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository with the default query configuration
    pub fn new(pool: PgPool) -> Self {
        Self::with_config(pool, ReactionQueryConfig::new())
    }

    /// Create a repository with custom default filters and sort
    pub fn with_config(pool: PgPool, config: ReactionQueryConfig) -> Self {
        Self {
            pool,
            transaction: None,
            config: Arc::new(config),
        }
    }

    /// A repository bound to `handle`, sharing this repository's query
    /// configuration. `self` stays usable outside the transaction.
    pub fn with_transaction(&self, handle: &TransactionHandle) -> Self {
        Self {
            pool: self.pool.clone(),
            transaction: Some(handle.clone()),
            config: Arc::clone(&self.config),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn is_transactional(&self) -> bool {
        self.transaction.is_some()
    }

    fn compose(
        &self,
        search: &ReactionSearch,
        options: QueryOptions<ReactionColumn>,
        pager: Pager,
        projection: Projection<ReactionColumn>,
    ) -> ReactionSelect {
        self.config
            .select(search.to_filters(), options, pager, projection)
    }

    async fn fetch_records(&self, select: &ReactionSelect) -> RepoResult<Vec<ReactionRecord>> {
        let mut qb = SelectBuilder::new(select).build();
        debug!(sql = qb.sql(), "Fetching reaction records");
        let query = qb.build_query_as::<MessageReactionModel>();
        let rows = on_executor!(self, |conn| query.fetch_all(conn))?;
        Ok(rows.into_iter().map(ReactionRecord::from).collect())
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_one(
        &self,
        search: &ReactionSearch,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Option<ReactionRecord>> {
        let select = self.compose(search, options, Pager::ExactlyOne, Projection::Full);
        let mut rows = self.fetch_records(&select).await?;

        if rows.len() > 1 {
            return Err(DomainError::MultipleResults {
                entity: ReactionRecord::TABLE,
            });
        }
        Ok(rows.pop())
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        search: &ReactionSearch,
        pager: Pager,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Vec<ReactionRecord>> {
        let select = self.compose(search, options, pager, Projection::Full);
        self.fetch_records(&select).await
    }

    #[instrument(skip(self))]
    async fn find_entries(
        &self,
        search: &ReactionSearch,
        pager: Pager,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Vec<DigestEntry>> {
        let select = self.compose(
            search,
            options,
            pager,
            Projection::Columns(DIGEST_COLUMNS.to_vec()),
        );
        let mut qb = SelectBuilder::new(&select).build();
        let query = qb.build_query_as::<DigestEntryModel>();
        let rows = on_executor!(self, |conn| query.fetch_all(conn))?;

        Ok(rows.into_iter().map(DigestEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(
        &self,
        search: &ReactionSearch,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<i64> {
        let select = self.compose(search, options, Pager::CountOnly, Projection::Full);
        let mut qb = SelectBuilder::new(&select).build_count();
        let query = qb.build_query_scalar::<i64>();
        on_executor!(self, |conn| query.fetch_one(conn))
    }

    #[instrument(skip(self))]
    async fn insert(&self, record: &NewReactionRecord) -> RepoResult<ReactionRecord> {
        let insert = ReactionInsert::new(record);
        let query = sqlx::query_as::<_, MessageReactionModel>(
            r#"
            INSERT INTO message_reactions (message_id, chat_id, reactions_count, created_at)
            VALUES ($1, $2, $3, COALESCE($4, NOW()))
            RETURNING message_id, chat_id, reactions_count, created_at
            "#,
        )
        .bind(insert.message_id)
        .bind(insert.chat_id)
        .bind(insert.reactions_count)
        .bind(insert.created_at);

        let model = on_executor!(self, |conn| query.fetch_one(conn))?;
        Ok(ReactionRecord::from(model))
    }

    #[instrument(skip(self))]
    async fn update(&self, record: &ReactionRecord) -> RepoResult<bool> {
        let mut qb = build_update(record);
        let query = qb.build();
        let result = on_executor!(self, |conn| query.execute(conn))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: ReactionKey) -> RepoResult<bool> {
        let query = sqlx::query(
            r#"
            DELETE FROM message_reactions WHERE message_id = $1 AND chat_id = $2
            "#,
        )
        .bind(key.message_id.into_inner())
        .bind(key.chat_id.into_inner());

        let result = on_executor!(self, |conn| query.execute(conn))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ReactionStore for PgReactionRepository {
    fn reactions(&self) -> &dyn ReactionRepository {
        self
    }

    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>> {
        let handle = TransactionHandle::begin(&self.pool).await?;
        Ok(Box::new(PgReactionTransaction {
            repo: self.with_transaction(&handle),
            handle,
        }))
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

/// An open PostgreSQL transaction over reaction records
pub struct PgReactionTransaction {
    handle: TransactionHandle,
    repo: PgReactionRepository,
}

#[async_trait]
impl ReactionTransaction for PgReactionTransaction {
    fn reactions(&self) -> &dyn ReactionRepository {
        &self.repo
    }

    /// Takes a transaction-scoped advisory lock on the key's lock id
    #[instrument(skip(self))]
    async fn lock_key(&self, key: ReactionKey) -> RepoResult<()> {
        let query = sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(key.lock_id());
        on_executor!(self.repo, |conn| query.execute(conn))?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.handle.commit().await
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        self.handle.rollback().await
    }
}
