//! Reaction record - the aggregate reaction count of one message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ChatId, MessageId};

/// Composite key identifying one reaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReactionKey {
    pub message_id: MessageId,
    pub chat_id: ChatId,
}

impl ReactionKey {
    /// Create a new key
    pub const fn new(message_id: MessageId, chat_id: ChatId) -> Self {
        Self {
            message_id,
            chat_id,
        }
    }

    /// Create a key from raw platform values
    pub const fn from_raw(message_id: i64, chat_id: i64) -> Self {
        Self::new(MessageId::new(message_id), ChatId::new(chat_id))
    }

    /// Fold both ids into one 64-bit value, used as the advisory lock key.
    ///
    /// Distinct keys may collide; a collision only serializes two unrelated
    /// updates, it never merges them.
    pub fn lock_id(&self) -> i64 {
        let message = self.message_id.into_inner() as u64;
        let chat = self.chat_id.into_inner() as u64;
        (chat.rotate_left(32) ^ message.wrapping_mul(0x9E37_79B9_7F4A_7C15)) as i64
    }
}

impl std::fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.chat_id, self.message_id)
    }
}

/// Persisted reaction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    /// Nullable at the storage level; the counter always writes a value
    pub reactions_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl ReactionRecord {
    /// Key of this record
    #[inline]
    pub fn key(&self) -> ReactionKey {
        ReactionKey {
            message_id: self.message_id,
            chat_id: self.chat_id,
        }
    }

    /// Current count, treating a missing value as zero
    #[inline]
    pub fn count(&self) -> i32 {
        self.reactions_count.unwrap_or(0)
    }

    /// Apply a signed delta to the count
    pub fn apply_delta(&mut self, delta: i32) -> i32 {
        let next = self.count().saturating_add(delta);
        self.reactions_count = Some(next);
        next
    }
}

/// Values for inserting a new reaction record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReactionRecord {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    pub reactions_count: Option<i32>,
    /// Assigned by the store when `None`
    pub created_at: Option<DateTime<Utc>>,
}

impl NewReactionRecord {
    /// Create an insert for `key` with the given starting count
    pub fn new(key: ReactionKey, reactions_count: i32) -> Self {
        Self {
            message_id: key.message_id,
            chat_id: key.chat_id,
            reactions_count: Some(reactions_count),
            created_at: None,
        }
    }

    /// Set an explicit creation time
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[inline]
    pub fn key(&self) -> ReactionKey {
        ReactionKey {
            message_id: self.message_id,
            chat_id: self.chat_id,
        }
    }

    /// Materialize the record, filling `created_at` with `now` when unset
    pub fn into_record(self, now: DateTime<Utc>) -> ReactionRecord {
        ReactionRecord {
            message_id: self.message_id,
            chat_id: self.chat_id,
            reactions_count: self.reactions_count,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}
