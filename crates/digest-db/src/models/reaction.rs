//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the message_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct MessageReactionModel {
    pub message_id: i64,
    pub chat_id: i64,
    pub reactions_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Digest projection of a reaction row
#[derive(Debug, Clone, FromRow)]
pub struct DigestEntryModel {
    pub reactions_count: Option<i32>,
    pub message_id: i64,
    pub chat_id: i64,
}
