//! Reaction entity <-> model mapper

use chrono::{DateTime, Utc};

use digest_core::entities::{DigestEntry, NewReactionRecord, ReactionRecord};
use digest_core::value_objects::{ChatId, MessageId};

use crate::models::{DigestEntryModel, MessageReactionModel};

/// Convert MessageReactionModel to ReactionRecord entity
impl From<MessageReactionModel> for ReactionRecord {
    fn from(model: MessageReactionModel) -> Self {
        ReactionRecord {
            message_id: MessageId::new(model.message_id),
            chat_id: ChatId::new(model.chat_id),
            reactions_count: model.reactions_count,
            created_at: model.created_at,
        }
    }
}

/// Convert a digest projection row to a DigestEntry
impl From<DigestEntryModel> for DigestEntry {
    fn from(model: DigestEntryModel) -> Self {
        DigestEntry {
            reactions_count: model.reactions_count.unwrap_or(0),
            message_id: MessageId::new(model.message_id),
            chat_id: ChatId::new(model.chat_id),
        }
    }
}

/// Bind values for inserting a new record
#[derive(Debug, Clone, Copy)]
pub struct ReactionInsert {
    pub message_id: i64,
    pub chat_id: i64,
    pub reactions_count: Option<i32>,
    /// `None` lets the column default assign the time
    pub created_at: Option<DateTime<Utc>>,
}

impl ReactionInsert {
    pub fn new(record: &NewReactionRecord) -> Self {
        Self {
            message_id: record.message_id.into_inner(),
            chat_id: record.chat_id.into_inner(),
            reactions_count: record.reactions_count,
            created_at: record.created_at,
        }
    }
}
