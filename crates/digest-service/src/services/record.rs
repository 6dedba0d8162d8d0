//! Reaction record administration

use tracing::{info, instrument};

use digest_core::{ReactionKey, ReactionRecord};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reads and removes single reaction records
pub struct ReactionRecordService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionRecordService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get one record by key
    #[instrument(skip(self))]
    pub async fn get(&self, key: ReactionKey) -> ServiceResult<ReactionRecord> {
        self.ctx
            .reaction_repo()
            .find_by_key(key)
            .await?
            .ok_or_else(|| ServiceError::not_found("Reaction record", key.to_string()))
    }

    /// Delete one record by key, serialized with counter updates on the key lock
    #[instrument(skip(self))]
    pub async fn delete(&self, key: ReactionKey) -> ServiceResult<()> {
        let tx = self.ctx.store().begin().await?;
        tx.lock_key(key).await?;
        let deleted = tx.reactions().delete(key).await?;
        tx.commit().await?;

        if !deleted {
            return Err(ServiceError::not_found("Reaction record", key.to_string()));
        }
        info!(message_id = %key.message_id, chat_id = %key.chat_id, "Reaction record deleted");
        Ok(())
    }
}
