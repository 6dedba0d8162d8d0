//! Reaction counter integration tests
//!
//! Run with: cargo test -p integration-tests --test counter_tests

use std::sync::Arc;

use digest_core::{ChatId, DomainError, ReactionKey, ReactionStore};
use digest_service::ReactionCounterService;
use integration_tests::{reaction_event, test_context, unique_chat_id, MemoryStore};
use tokio_util::sync::CancellationToken;

async fn stored_count(store: &MemoryStore, message_id: i64, chat_id: ChatId) -> Option<i32> {
    store
        .reactions()
        .find_by_key(ReactionKey::from_raw(message_id, chat_id.into_inner()))
        .await
        .unwrap()
        .map(|record| record.count())
}

#[tokio::test]
async fn test_first_event_then_delta() {
    let store = Arc::new(MemoryStore::new());
    let ctx = test_context(Arc::clone(&store));
    let counter = ReactionCounterService::new(&ctx);
    let chat_id = ChatId::new(100);

    let record = counter
        .apply(&reaction_event(42, chat_id, &[], &["👍"]))
        .await
        .unwrap();
    assert_eq!(record.reactions_count, Some(1));

    let record = counter
        .apply(&reaction_event(42, chat_id, &["👍"], &["👍", "🔥"]))
        .await
        .unwrap();
    assert_eq!(record.reactions_count, Some(2));
    assert_eq!(stored_count(&store, 42, chat_id).await, Some(2));
}

#[tokio::test]
async fn test_count_is_first_set_plus_later_deltas() {
    let store = Arc::new(MemoryStore::new());
    let ctx = test_context(Arc::clone(&store));
    let counter = ReactionCounterService::new(&ctx);
    let chat_id = unique_chat_id();

    let events = [
        reaction_event(7, chat_id, &[], &["👍", "🔥", "🎉"]),
        reaction_event(7, chat_id, &["👍"], &[]),
        reaction_event(7, chat_id, &[], &["❤", "👀"]),
        reaction_event(7, chat_id, &["🔥", "🎉"], &["🔥"]),
    ];
    for event in &events {
        counter.apply(event).await.unwrap();
    }

    // 3 + (0 - 1) + (2 - 0) + (1 - 2)
    assert_eq!(stored_count(&store, 7, chat_id).await, Some(3));
}

#[tokio::test]
async fn test_duplicate_emoji_counts_once() {
    let store = Arc::new(MemoryStore::new());
    let ctx = test_context(Arc::clone(&store));
    let chat_id = unique_chat_id();

    ReactionCounterService::new(&ctx)
        .apply(&reaction_event(1, chat_id, &[], &["👍", "👍"]))
        .await
        .unwrap();
    assert_eq!(stored_count(&store, 1, chat_id).await, Some(1));
}

#[tokio::test]
async fn test_count_may_go_negative() {
    let store = Arc::new(MemoryStore::new());
    let ctx = test_context(Arc::clone(&store));
    let counter = ReactionCounterService::new(&ctx);
    let chat_id = unique_chat_id();

    // a removal seen before any addition
    counter
        .apply(&reaction_event(5, chat_id, &["👍"], &[]))
        .await
        .unwrap();
    counter
        .apply(&reaction_event(5, chat_id, &["🔥"], &[]))
        .await
        .unwrap();
    assert_eq!(stored_count(&store, 5, chat_id).await, Some(-1));
}

#[tokio::test]
async fn test_repeated_first_event_applies_as_delta() {
    let store = Arc::new(MemoryStore::new());
    let ctx = test_context(Arc::clone(&store));
    let counter = ReactionCounterService::new(&ctx);
    let chat_id = unique_chat_id();
    let event = reaction_event(9, chat_id, &[], &["👍", "🔥"]);

    counter.apply(&event).await.unwrap();
    counter.apply(&event).await.unwrap();

    // no per-event idempotency key is tracked
    assert_eq!(stored_count(&store, 9, chat_id).await, Some(4));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_events_never_lose_updates() {
    let store = Arc::new(MemoryStore::new());
    let ctx = Arc::new(test_context(Arc::clone(&store)));
    let chat_id = unique_chat_id();

    let tasks: Vec<_> = (0..25)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            tokio::spawn(async move {
                ReactionCounterService::new(&ctx)
                    .apply(&reaction_event(3, chat_id, &[], &["👍"]))
                    .await
                    .unwrap();
            })
        })
        .collect();
    for result in futures::future::join_all(tasks).await {
        result.unwrap();
    }

    assert_eq!(stored_count(&store, 3, chat_id).await, Some(25));
    assert_eq!(store.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_keys_are_independent() {
    let store = Arc::new(MemoryStore::new());
    let ctx = Arc::new(test_context(Arc::clone(&store)));
    let chat_id = unique_chat_id();

    let tasks: Vec<_> = (0..30)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            tokio::spawn(async move {
                ReactionCounterService::new(&ctx)
                    .apply(&reaction_event(i % 3, chat_id, &[], &["👍", "🔥"]))
                    .await
                    .unwrap();
            })
        })
        .collect();
    for result in futures::future::join_all(tasks).await {
        result.unwrap();
    }

    for message_id in 0..3 {
        assert_eq!(stored_count(&store, message_id, chat_id).await, Some(20));
    }
}

#[tokio::test]
async fn test_cancelled_event_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let ctx = test_context(Arc::clone(&store));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = ReactionCounterService::new(&ctx)
        .apply_with_cancel(&reaction_event(1, unique_chat_id(), &[], &["👍"]), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err.as_domain(), Some(DomainError::Cancelled)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_failed_event_is_dropped() {
    let store = Arc::new(MemoryStore::new());
    let ctx = test_context(Arc::clone(&store));
    let chat_id = unique_chat_id();

    store.set_available(false);
    let processed = ReactionCounterService::new(&ctx)
        .process(&reaction_event(1, chat_id, &[], &["👍"]), &CancellationToken::new())
        .await;
    assert!(processed.is_none());

    store.set_available(true);
    assert!(store.is_empty());
}
