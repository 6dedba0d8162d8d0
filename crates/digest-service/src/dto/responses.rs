//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use digest_core::{ChatId, DigestPeriod, MessageId, ReactionRecord};

// ============================================================================
// Digest Response Types
// ============================================================================

/// One ranked message of a digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestItem {
    pub reactions_count: i32,
    pub message_id: MessageId,
    /// Empty when the chat has no public link
    pub link: String,
}

/// Ranked, time-windowed report of the most-reacted messages of a chat
#[derive(Debug, Clone, Serialize)]
pub struct DigestResponse {
    pub chat_id: ChatId,
    pub period: DigestPeriod,
    pub title: String,
    /// Rows in the window, ignoring the page size
    pub total: i64,
    pub items: Vec<DigestItem>,
}

impl DigestResponse {
    /// Title line for `period`
    pub fn title_for(period: DigestPeriod) -> String {
        format!("Top reactions in this chat for {}:", period.title())
    }

    /// Render as chat message text: the title, then one line per item
    pub fn to_text(&self) -> String {
        std::iter::once(self.title.clone())
            .chain(self.items.iter().map(|item| {
                format!("Reactions: {} Link: {}", item.reactions_count, item.link)
            }))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Record Response Types
// ============================================================================

/// Stored reaction record
#[derive(Debug, Clone, Serialize)]
pub struct ReactionRecordResponse {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    pub reactions_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<ReactionRecord> for ReactionRecordResponse {
    fn from(record: ReactionRecord) -> Self {
        Self {
            message_id: record.message_id,
            chat_id: record.chat_id,
            reactions_count: record.reactions_count,
            created_at: record.created_at,
        }
    }
}

/// Acknowledgement of a reaction event. The event is accepted even when the
/// update failed and was dropped.
#[derive(Debug, Clone, Serialize)]
pub struct ReactionEventAck {
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions_count: Option<i32>,
}

impl ReactionEventAck {
    pub fn from_outcome(record: Option<&ReactionRecord>) -> Self {
        Self {
            applied: record.is_some(),
            reactions_count: record.map(ReactionRecord::count),
        }
    }
}

// ============================================================================
// Health Check Types
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
