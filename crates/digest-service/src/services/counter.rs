//! Reaction counter service
//!
//! Folds reaction-change events into the per-message aggregate count.

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use digest_core::traits::ReactionTransaction;
use digest_core::{DomainError, NewReactionRecord, ReactionChanged, ReactionRecord};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction counter service
pub struct ReactionCounterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionCounterService<'a> {
    /// Create a new ReactionCounterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply one event and return the stored record
    pub async fn apply(&self, event: &ReactionChanged) -> ServiceResult<ReactionRecord> {
        self.apply_with_cancel(event, &CancellationToken::new())
            .await
    }

    /// Apply one event, aborting when `cancel` fires or the configured
    /// transaction deadline passes. An aborted transaction is rolled back.
    #[instrument(skip(self, cancel), fields(key = %event.key()))]
    pub async fn apply_with_cancel(
        &self,
        event: &ReactionChanged,
        cancel: &CancellationToken,
    ) -> ServiceResult<ReactionRecord> {
        let config = self.ctx.counter_config();

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(DomainError::Cancelled.into()),
            result = tokio::time::timeout(config.transaction_timeout(), self.run(event)) => {
                result.unwrap_or_else(|_| {
                    Err(DomainError::DeadlineExceeded(config.transaction_timeout_ms).into())
                })
            }
        }
    }

    /// Apply one event, logging and dropping it on failure.
    ///
    /// Events are processed at most once; a failed update is not retried.
    pub async fn process(
        &self,
        event: &ReactionChanged,
        cancel: &CancellationToken,
    ) -> Option<ReactionRecord> {
        match self.apply_with_cancel(event, cancel).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!(
                    message_id = %event.message_id,
                    chat_id = %event.chat_id,
                    error = %e,
                    "Dropping reaction event"
                );
                None
            }
        }
    }

    async fn run(&self, event: &ReactionChanged) -> ServiceResult<ReactionRecord> {
        let tx = self.ctx.store().begin().await?;

        match Self::read_modify_write(tx.as_ref(), event).await {
            Ok(record) => {
                tx.commit().await?;
                Ok(record)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn read_modify_write(
        tx: &dyn ReactionTransaction,
        event: &ReactionChanged,
    ) -> ServiceResult<ReactionRecord> {
        let key = event.key();
        tx.lock_key(key).await?;

        let Some(mut record) = tx.reactions().find_by_key(key).await? else {
            let record = tx
                .reactions()
                .insert(&NewReactionRecord::new(key, event.initial_count()))
                .await?;
            info!(
                message_id = %key.message_id,
                chat_id = %key.chat_id,
                reactions_count = record.count(),
                "Reaction record created"
            );
            return Ok(record);
        };

        let delta = event.delta();
        let count = record.apply_delta(delta);
        if count < 0 {
            warn!(
                message_id = %key.message_id,
                chat_id = %key.chat_id,
                reactions_count = count,
                "Reaction count went negative"
            );
        }

        if !tx.reactions().update(&record).await? {
            return Err(ServiceError::internal(format!(
                "reaction record {key} disappeared while locked"
            )));
        }
        debug!(delta, reactions_count = count, "Reaction record updated");

        Ok(record)
    }
}
