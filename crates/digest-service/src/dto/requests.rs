//! Request DTOs for API endpoints
//!
//! Request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use digest_core::{ChatId, ChatKind, DigestRequested};

/// Query string of the digest endpoint
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DigestQuery {
    /// `hour`, `day`, `week`, `month`, `all`, or the `digest:` callback form
    #[validate(length(min = 1, max = 32, message = "period must be 1-32 characters"))]
    pub period: String,

    #[validate(range(min = 1, message = "limit must be positive"))]
    pub limit: Option<i64>,

    #[serde(default)]
    pub chat_type: ChatKind,

    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub username: Option<String>,

    pub thread_id: Option<i64>,
}

impl DigestQuery {
    /// Attach the chat from the request path
    pub fn into_request(self, chat_id: ChatId) -> DigestRequested {
        DigestRequested {
            chat_id,
            period: self.period,
            page_size: self.limit,
            chat_kind: self.chat_type,
            username: self.username,
            thread_id: self.thread_id,
        }
    }
}
