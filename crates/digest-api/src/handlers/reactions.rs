//! Reaction event and record handlers

use axum::extract::State;
use digest_core::ReactionChanged;
use digest_service::{
    ReactionCounterService, ReactionEventAck, ReactionRecordResponse, ReactionRecordService,
};

use crate::extractors::{JsonBody, RecordPath, TypedPath};
use crate::response::{Accepted, ApiJson, ApiResult, NoContent};
use crate::state::AppState;

/// Apply a reaction change event
///
/// POST /api/v1/reactions/events
///
/// Always 202 once the body parses. A failed update is logged and dropped.
pub async fn post_event(
    State(state): State<AppState>,
    JsonBody(event): JsonBody<ReactionChanged>,
) -> Accepted<ApiJson<ReactionEventAck>> {
    let record = ReactionCounterService::new(state.service_context())
        .process(&event, state.shutdown_token())
        .await;
    Accepted(ApiJson(ReactionEventAck::from_outcome(record.as_ref())))
}

/// Get the stored record of a message
///
/// GET /api/v1/chats/{chat_id}/messages/{message_id}/reactions
pub async fn get_record(
    State(state): State<AppState>,
    TypedPath(path): TypedPath<RecordPath>,
) -> ApiResult<ApiJson<ReactionRecordResponse>> {
    let record = ReactionRecordService::new(state.service_context())
        .get(path.key()?)
        .await?;
    Ok(ApiJson(record.into()))
}

/// Delete the stored record of a message
///
/// DELETE /api/v1/chats/{chat_id}/messages/{message_id}/reactions
pub async fn delete_record(
    State(state): State<AppState>,
    TypedPath(path): TypedPath<RecordPath>,
) -> ApiResult<NoContent> {
    ReactionRecordService::new(state.service_context())
        .delete(path.key()?)
        .await?;
    Ok(NoContent)
}
