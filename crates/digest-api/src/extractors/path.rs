//! Path parameter extractors
//!
//! Type-safe extraction of chat and message ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use digest_core::{ChatId, MessageId, ReactionKey};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Extract path parameters, rejecting with an `ApiError`
#[derive(Debug, Clone)]
pub struct TypedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for TypedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(TypedPath(inner))
    }
}

/// Path parameters with chat_id
#[derive(Debug, serde::Deserialize)]
pub struct ChatIdPath {
    pub chat_id: String,
}

impl ChatIdPath {
    /// Parse chat_id as ChatId
    pub fn chat_id(&self) -> Result<ChatId, ApiError> {
        self.chat_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid chat_id format"))
    }
}

/// Path parameters with chat_id and message_id
#[derive(Debug, serde::Deserialize)]
pub struct RecordPath {
    pub chat_id: String,
    pub message_id: String,
}

impl RecordPath {
    /// Parse both ids into the record key
    pub fn key(&self) -> Result<ReactionKey, ApiError> {
        let chat_id: ChatId = self
            .chat_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid chat_id format"))?;
        let message_id: MessageId = self
            .message_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid message_id format"))?;
        Ok(ReactionKey::new(message_id, chat_id))
    }
}
