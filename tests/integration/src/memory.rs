//! In-memory reaction store
//!
//! Queries are evaluated with `Select::apply`, so the same composed query
//! that the database layer renders to SQL runs here over a map of rows.
//! Transactions take per-key locks and stage their writes until commit.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex as KeyLock, OwnedMutexGuard};

use digest_core::{
    DigestEntry, DomainError, Entity, NewReactionRecord, Pager, Projection, QueryOptions,
    ReactionColumn, ReactionKey, ReactionQueryConfig, ReactionRecord, ReactionRepository,
    ReactionSearch, ReactionSelect, ReactionStore, ReactionTransaction, RepoResult,
};

type Rows = BTreeMap<ReactionKey, ReactionRecord>;
/// `None` stages a delete
type Staged = BTreeMap<ReactionKey, Option<ReactionRecord>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct Shared {
    rows: Mutex<Rows>,
    key_locks: Mutex<HashMap<ReactionKey, Arc<KeyLock<()>>>>,
    unavailable: AtomicBool,
}

impl Shared {
    fn key_lock(&self, key: ReactionKey) -> Arc<KeyLock<()>> {
        Arc::clone(lock(&self.key_locks).entry(key).or_default())
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StorageUnavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

/// Repository over the shared rows, optionally bound to a transaction's staged writes
#[derive(Clone)]
pub struct MemoryRepository {
    shared: Arc<Shared>,
    staged: Option<Arc<Mutex<Staged>>>,
    config: Arc<ReactionQueryConfig>,
}

impl MemoryRepository {
    /// Committed rows overlaid with this transaction's staged writes
    fn snapshot(&self) -> Rows {
        let mut rows = lock(&self.shared.rows).clone();
        if let Some(staged) = &self.staged {
            for (key, row) in lock(staged).iter() {
                match row {
                    Some(record) => rows.insert(*key, record.clone()),
                    None => rows.remove(key),
                };
            }
        }
        rows
    }

    fn write(&self, key: ReactionKey, row: Option<ReactionRecord>) {
        match &self.staged {
            Some(staged) => {
                lock(staged).insert(key, row);
            }
            None => {
                let mut rows = lock(&self.shared.rows);
                match row {
                    Some(record) => rows.insert(key, record),
                    None => rows.remove(&key),
                };
            }
        }
    }

    fn compose(
        &self,
        search: &ReactionSearch,
        options: QueryOptions<ReactionColumn>,
        pager: Pager,
    ) -> ReactionSelect {
        self.config
            .select(search.to_filters(), options, pager, Projection::Full)
    }

    fn run(&self, select: &ReactionSelect) -> RepoResult<Vec<ReactionRecord>> {
        self.shared.check_available()?;
        let rows = self.snapshot();
        Ok(select.apply(rows.values()).into_iter().cloned().collect())
    }
}

#[async_trait]
impl ReactionRepository for MemoryRepository {
    async fn find_one(
        &self,
        search: &ReactionSearch,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Option<ReactionRecord>> {
        let select = self.compose(search, options, Pager::ExactlyOne);
        let mut rows = self.run(&select)?;
        if rows.len() > 1 {
            return Err(DomainError::MultipleResults {
                entity: ReactionRecord::TABLE,
            });
        }
        Ok(rows.pop())
    }

    async fn find_many(
        &self,
        search: &ReactionSearch,
        pager: Pager,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Vec<ReactionRecord>> {
        self.run(&self.compose(search, options, pager))
    }

    async fn find_entries(
        &self,
        search: &ReactionSearch,
        pager: Pager,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<Vec<DigestEntry>> {
        let rows = self.run(&self.compose(search, options, pager))?;
        Ok(rows.iter().map(DigestEntry::from).collect())
    }

    async fn count(
        &self,
        search: &ReactionSearch,
        options: QueryOptions<ReactionColumn>,
    ) -> RepoResult<i64> {
        self.shared.check_available()?;
        let select = self.compose(search, options, Pager::CountOnly);
        let rows = self.snapshot();
        Ok(i64::try_from(select.count(rows.values())).unwrap_or(i64::MAX))
    }

    async fn insert(&self, record: &NewReactionRecord) -> RepoResult<ReactionRecord> {
        self.shared.check_available()?;
        let key = record.key();
        if self.snapshot().contains_key(&key) {
            return Err(DomainError::ConstraintViolation(format!(
                "duplicate key {key}"
            )));
        }
        let stored = record.clone().into_record(Utc::now());
        self.write(key, Some(stored.clone()));
        Ok(stored)
    }

    async fn update(&self, record: &ReactionRecord) -> RepoResult<bool> {
        self.shared.check_available()?;
        let key = record.key();
        let Some(existing) = self.snapshot().remove(&key) else {
            return Ok(false);
        };
        // created_at is immutable
        let updated = ReactionRecord {
            reactions_count: record.reactions_count,
            ..existing
        };
        self.write(key, Some(updated));
        Ok(true)
    }

    async fn delete(&self, key: ReactionKey) -> RepoResult<bool> {
        self.shared.check_available()?;
        if !self.snapshot().contains_key(&key) {
            return Ok(false);
        }
        self.write(key, None);
        Ok(true)
    }
}

/// In-memory `ReactionStore`
#[derive(Clone)]
pub struct MemoryStore {
    repo: MemoryRepository,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_config(ReactionQueryConfig::new())
    }

    pub fn with_config(config: ReactionQueryConfig) -> Self {
        Self {
            repo: MemoryRepository {
                shared: Arc::new(Shared::default()),
                staged: None,
                config: Arc::new(config),
            },
        }
    }

    /// Make every call fail with `StorageUnavailable`
    pub fn set_available(&self, available: bool) {
        self.repo
            .shared
            .unavailable
            .store(!available, Ordering::SeqCst);
    }

    /// Number of committed rows
    pub fn len(&self) -> usize {
        lock(&self.repo.shared.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReactionStore for MemoryStore {
    fn reactions(&self) -> &dyn ReactionRepository {
        &self.repo
    }

    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>> {
        self.repo.shared.check_available()?;
        Ok(Box::new(MemoryTransaction {
            repo: MemoryRepository {
                shared: Arc::clone(&self.repo.shared),
                staged: Some(Arc::new(Mutex::new(Staged::new()))),
                config: Arc::clone(&self.repo.config),
            },
            held: KeyLock::new((HashSet::new(), Vec::new())),
        }))
    }

    async fn ping(&self) -> RepoResult<()> {
        self.repo.shared.check_available()
    }
}

/// Open in-memory transaction. Dropping it discards the staged writes and
/// releases its key locks.
pub struct MemoryTransaction {
    repo: MemoryRepository,
    held: KeyLock<(HashSet<ReactionKey>, Vec<OwnedMutexGuard<()>>)>,
}

impl MemoryTransaction {
    fn take_staged(&self) -> Staged {
        self.repo
            .staged
            .as_ref()
            .map(|staged| std::mem::take(&mut *lock(staged)))
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReactionTransaction for MemoryTransaction {
    fn reactions(&self) -> &dyn ReactionRepository {
        &self.repo
    }

    /// Re-entrant within one transaction
    async fn lock_key(&self, key: ReactionKey) -> RepoResult<()> {
        let mut held = self.held.lock().await;
        if held.0.contains(&key) {
            return Ok(());
        }
        let guard = self.repo.shared.key_lock(key).lock_owned().await;
        held.0.insert(key);
        held.1.push(guard);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.repo.shared.check_available()?;
        let staged = self.take_staged();
        let mut rows = lock(&self.repo.shared.rows);
        for (key, row) in staged {
            match row {
                Some(record) => rows.insert(key, record),
                None => rows.remove(&key),
            };
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        drop(self.take_staged());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest_core::{ChatId, SortField};

    #[tokio::test]
    async fn test_staged_writes_are_private_until_commit() {
        let store = MemoryStore::new();
        let key = ReactionKey::from_raw(1, 10);

        let tx = store.begin().await.unwrap();
        tx.lock_key(key).await.unwrap();
        tx.reactions()
            .insert(&NewReactionRecord::new(key, 3))
            .await
            .unwrap();
        assert!(tx.reactions().find_by_key(key).await.unwrap().is_some());
        assert!(store.reactions().find_by_key(key).await.unwrap().is_none());

        tx.commit().await.unwrap();
        let record = store.reactions().find_by_key(key).await.unwrap().unwrap();
        assert_eq!(record.reactions_count, Some(3));
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let store = MemoryStore::new();
        let key = ReactionKey::from_raw(1, 10);

        let tx = store.begin().await.unwrap();
        tx.lock_key(key).await.unwrap();
        tx.reactions()
            .insert(&NewReactionRecord::new(key, 1))
            .await
            .unwrap();
        drop(tx);

        assert!(store.is_empty());
        // the key lock was released with the transaction
        let tx = store.begin().await.unwrap();
        tx.lock_key(key).await.unwrap();
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_queries_follow_select_semantics() {
        let store = MemoryStore::new();
        for (message_id, count) in [(1, 4), (2, 9), (3, 4)] {
            store
                .reactions()
                .insert(&NewReactionRecord::new(ReactionKey::from_raw(message_id, 10), count))
                .await
                .unwrap();
        }

        let search = ReactionSearch::by_chat(ChatId::new(10));
        let options = QueryOptions::new().sort_by(SortField::desc(ReactionColumn::ReactionsCount));
        let entries = store
            .reactions()
            .find_entries(&search, Pager::first(3), options)
            .await
            .unwrap();
        let ids: Vec<i64> = entries.iter().map(|e| e.message_id.into_inner()).collect();
        // ties break on the key columns
        assert_eq!(ids, vec![2, 1, 3]);

        let err = store
            .reactions()
            .find_one(&search, QueryOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MultipleResults { .. }));
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = MemoryStore::new();
        store.set_available(false);
        assert!(matches!(
            store.ping().await,
            Err(DomainError::StorageUnavailable(_))
        ));
        store.set_available(true);
        store.ping().await.unwrap();
    }
}
