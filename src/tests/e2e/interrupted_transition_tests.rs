use crate::modules::bookmarks::core::bookmarked_job::ApplicationStatus;
use crate::modules::bookmarks::core::errors::BookmarkError;
use crate::modules::bookmarks::core::transitions::{TransitionKind, TransitionStep};
use crate::modules::bookmarks::store::{
    ACTIVE_KEY, BookmarkStore, COMPLETED_KEY, PENDING_TRANSITION_KEY,
};
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::tests::fixtures::clock::fixed_clock;
use crate::tests::fixtures::jobs::JobPostingBuilder;
use std::sync::Arc;

async fn store_with_active(
    storage: Arc<InMemoryKeyValueStore>,
    ids: &[&str],
) -> BookmarkStore<InMemoryKeyValueStore> {
    let store = BookmarkStore::new(storage, fixed_clock());
    for id in ids {
        store
            .add_bookmark(JobPostingBuilder::new().job_id(*id).build(), None, None)
            .await
            .unwrap();
    }
    store
}

#[tokio::test]
async fn a_restart_finishes_a_completion_cut_off_after_its_first_write() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let crashed = store_with_active(storage.clone(), &["A", "B"]).await;
    storage.fail_writes_to(ACTIVE_KEY).await;

    let result = crashed.mark_as_completed("A").await;
    assert!(matches!(
        result,
        Err(BookmarkError::PartialTransition {
            kind: TransitionKind::Complete,
            missing: TransitionStep::RemoveFromSource,
            ..
        })
    ));
    crashed.snapshot().await.check_invariants().unwrap();
    drop(crashed);

    storage.clear_failures().await;
    let restarted = BookmarkStore::new(storage.clone(), fixed_clock());
    restarted.refresh().await.unwrap();

    let snapshot = restarted.snapshot().await;
    snapshot.check_invariants().unwrap();
    assert_eq!(
        snapshot.active.iter().map(|j| j.job_id.as_str()).collect::<Vec<_>>(),
        vec!["B"]
    );
    assert_eq!(snapshot.completed.len(), 1);
    assert_eq!(snapshot.completed[0].application_status, ApplicationStatus::Completed);
    assert_eq!(storage.get(PENDING_TRANSITION_KEY).await.unwrap(), None);
    assert_eq!(restarted.pending_transition().await, None);
}

#[tokio::test]
async fn a_failed_first_write_moves_nothing_and_leaves_no_marker() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = store_with_active(storage.clone(), &["A"]).await;
    storage.fail_writes_to(COMPLETED_KEY).await;

    let result = store.mark_as_completed("A").await;

    assert!(matches!(result, Err(BookmarkError::Persistence { .. })));
    assert_eq!(result.unwrap_err().to_string(), "Failed to mark as completed");
    assert!(store.is_bookmarked("A").await);
    assert!(store.completed().await.is_empty());
    assert_eq!(storage.get(PENDING_TRANSITION_KEY).await.unwrap(), None);
    assert!(store.is_dirty());

    storage.clear_failures().await;
    store.mark_as_completed("A").await.unwrap();
    assert!(!store.is_bookmarked("A").await);
    assert!(!store.is_dirty());
}

#[tokio::test]
async fn a_failed_write_never_shows_up_in_memory() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = store_with_active(storage.clone(), &["A"]).await;
    storage.fail_writes_to(ACTIVE_KEY).await;

    let result = store
        .add_bookmark(JobPostingBuilder::new().job_id("B").build(), None, None)
        .await;

    assert_eq!(result.unwrap_err().to_string(), "Failed to save bookmark");
    assert!(!store.is_bookmarked("B").await);
    assert!(store.is_dirty());

    // the next mutation reloads first, so it works from what storage actually holds
    storage.clear_failures().await;
    let added = store
        .add_bookmark(JobPostingBuilder::new().job_id("B").build(), None, None)
        .await
        .unwrap();
    let active = store.active().await;
    assert_eq!(active.len(), 2);
    assert_eq!(active[1], added);
}

#[tokio::test]
async fn overlapping_calls_for_one_job_see_each_others_result() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let store = Arc::new(store_with_active(storage.clone(), &["A"]).await);
    storage.set_delay_ms(5);

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.mark_as_completed("A").await }
    });
    tokio::task::yield_now().await;
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.remove_bookmark("A").await }
    });

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    // whichever ran first, the job ends up in exactly one place
    let snapshot = store.snapshot().await;
    snapshot.check_invariants().unwrap();
    match (first, second) {
        (Ok(_), Err(BookmarkError::NotFound { .. })) => {
            assert_eq!(snapshot.completed.len(), 1);
        }
        (Err(BookmarkError::NotFound { .. }), Ok(())) => {
            assert!(snapshot.completed.is_empty());
        }
        other => panic!("unexpected outcomes: {other:?}"),
    }
    assert!(snapshot.active.is_empty());
}
