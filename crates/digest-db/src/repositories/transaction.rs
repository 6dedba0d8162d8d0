//! Shared transaction handle

use std::sync::Arc;

use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::{Mutex, MutexGuard};

use digest_core::error::DomainError;
use digest_core::traits::RepoResult;

use super::error::map_db_error;

/// A database transaction shared by every repository bound to it.
///
/// Cloning the handle shares the transaction. Once committed or rolled
/// back, bound repositories fail instead of falling back to the pool.
/// Dropping the last clone of an open transaction rolls it back.
#[derive(Clone)]
pub struct TransactionHandle {
    inner: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl TransactionHandle {
    /// Begin a transaction on `pool`
    pub async fn begin(pool: &PgPool) -> RepoResult<Self> {
        let tx = pool.begin().await.map_err(map_db_error)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Some(tx))),
        })
    }

    /// Exclusive access to the open transaction, `None` once it has finished
    pub(crate) async fn lock(&self) -> MutexGuard<'_, Option<Transaction<'static, Postgres>>> {
        self.inner.lock().await
    }

    pub async fn commit(&self) -> RepoResult<()> {
        self.take().await?.commit().await.map_err(map_db_error)
    }

    pub async fn rollback(&self) -> RepoResult<()> {
        self.take().await?.rollback().await.map_err(map_db_error)
    }

    async fn take(&self) -> RepoResult<Transaction<'static, Postgres>> {
        self.inner.lock().await.take().ok_or_else(finished)
    }
}

pub(crate) fn finished() -> DomainError {
    DomainError::InternalError("transaction already finished".to_string())
}
