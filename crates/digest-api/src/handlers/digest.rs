//! Digest handlers

use axum::extract::State;
use digest_service::{DigestQuery, DigestResponse, DigestService};

use crate::extractors::{ChatIdPath, TypedPath, ValidatedQuery};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Get the digest of a chat
///
/// GET /api/v1/chats/{chat_id}/digest
pub async fn get_digest(
    State(state): State<AppState>,
    TypedPath(path): TypedPath<ChatIdPath>,
    ValidatedQuery(query): ValidatedQuery<DigestQuery>,
) -> ApiResult<ApiJson<DigestResponse>> {
    let request = query.into_request(path.chat_id()?);
    let digest = DigestService::new(state.service_context())
        .resolve(&request)
        .await?;
    Ok(ApiJson(digest))
}

/// Get the digest of a chat rendered as chat message text
///
/// GET /api/v1/chats/{chat_id}/digest/text
pub async fn get_digest_text(
    State(state): State<AppState>,
    TypedPath(path): TypedPath<ChatIdPath>,
    ValidatedQuery(query): ValidatedQuery<DigestQuery>,
) -> ApiResult<String> {
    let request = query.into_request(path.chat_id()?);
    let digest = DigestService::new(state.service_context())
        .resolve(&request)
        .await?;
    Ok(digest.to_text())
}
