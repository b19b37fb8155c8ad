use crate::modules::bookmarks::core::bookmarked_job::{
    ApplicationStatus, BookmarkPatch, parse_deadline,
};
use crate::modules::bookmarks::core::errors::BookmarkError;
use crate::modules::bookmarks::core::outcome::MutationOutcome;
use crate::modules::bookmarks::store::BookmarkStore;
use crate::modules::bookmarks::use_cases::list_bookmarks::handler::ActiveSort;
use crate::shared::core::clock::FixedClock;
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::tests::fixtures::clock::fixed_now;
use crate::tests::fixtures::jobs::JobPostingBuilder;
use chrono::Duration;
use std::sync::Arc;

fn store_over(
    storage: Arc<InMemoryKeyValueStore>,
    clock: Arc<FixedClock>,
) -> BookmarkStore<InMemoryKeyValueStore> {
    BookmarkStore::new(storage, clock)
}

async fn assert_invariants(store: &BookmarkStore<InMemoryKeyValueStore>) {
    store
        .snapshot()
        .await
        .check_invariants()
        .expect("residency invariants broken");
}

#[tokio::test]
async fn tracks_a_job_from_bookmark_to_completion_and_back() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let clock = Arc::new(FixedClock::new(fixed_now()));
    let store = store_over(storage.clone(), clock.clone());
    store.refresh().await.unwrap();

    let added = store
        .add_bookmark(JobPostingBuilder::new().job_id("A").build(), None, None)
        .await
        .unwrap();
    assert_eq!(store.active().await, vec![added.clone()]);
    assert!(store.completed().await.is_empty());
    assert_invariants(&store).await;

    store
        .update_bookmark(
            "A",
            BookmarkPatch::default()
                .status(ApplicationStatus::Applied)
                .notes(Some("sent portfolio".into())),
        )
        .await
        .unwrap();
    assert_invariants(&store).await;

    clock.advance(Duration::days(10));
    let completed = store.mark_as_completed("A").await.unwrap();
    assert!(store.active().await.is_empty());
    assert_eq!(store.completed().await, vec![completed.clone()]);
    assert_eq!(completed.application_status, ApplicationStatus::Completed);
    assert_eq!(completed.completed_at, Some(fixed_now() + Duration::days(10)));
    assert_eq!(completed.notes.as_deref(), Some("sent portfolio"));
    assert_eq!(completed.bookmarked_at, added.bookmarked_at);
    assert!(!store.is_bookmarked("A").await);
    assert_invariants(&store).await;

    let reactivated = store.move_to_active("A").await.unwrap();
    assert!(store.completed().await.is_empty());
    assert_eq!(store.active().await, vec![reactivated.clone()]);
    assert_eq!(reactivated.application_status, ApplicationStatus::InProgress);
    assert_eq!(reactivated.completed_at, None);
    assert!(store.is_bookmarked("A").await);
    assert_invariants(&store).await;
}

#[tokio::test]
async fn reports_a_duplicate_add_with_the_ui_message() {
    let store = store_over(
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(FixedClock::new(fixed_now())),
    );
    let posting = JobPostingBuilder::new().job_id("A").build();

    let first = store.add_bookmark(posting.clone(), None, None).await;
    let second = store.add_bookmark(posting, None, None).await;

    assert_eq!(MutationOutcome::from(&first), MutationOutcome::ok());
    let outcome = MutationOutcome::from(&second);
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Job already bookmarked"));
    assert_eq!(store.active().await.len(), 1);
}

#[tokio::test]
async fn survives_a_restart_over_the_same_storage() {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let clock = Arc::new(FixedClock::new(fixed_now()));
    let store = store_over(storage.clone(), clock.clone());

    let mut posting = JobPostingBuilder::new().job_id("A").build();
    posting
        .extra
        .insert("job_apply_link".into(), "https://jobs.test/a".into());
    let added = store
        .add_bookmark(posting, parse_deadline("2025-04-20"), Some("remote ok".into()))
        .await
        .unwrap();
    store
        .add_bookmark(JobPostingBuilder::new().job_id("B").build(), None, None)
        .await
        .unwrap();
    let completed = store.mark_as_completed("B").await.unwrap();

    let restarted = store_over(storage, clock);
    restarted.refresh().await.unwrap();

    assert_eq!(restarted.get_bookmark("A").await, Some(added));
    assert_eq!(restarted.get_completed_application("B").await, Some(completed));
    assert_eq!(restarted.snapshot().await, store.snapshot().await);
}

#[tokio::test]
async fn removes_only_active_bookmarks_and_only_once() {
    let store = store_over(
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(FixedClock::new(fixed_now())),
    );
    for id in ["A", "B"] {
        store
            .add_bookmark(JobPostingBuilder::new().job_id(id).build(), None, None)
            .await
            .unwrap();
    }
    store.mark_as_completed("B").await.unwrap();

    assert!(store.remove_bookmark("A").await.is_ok());
    assert!(matches!(
        store.remove_bookmark("A").await,
        Err(BookmarkError::NotFound { .. })
    ));
    assert!(matches!(
        store.remove_bookmark("B").await,
        Err(BookmarkError::NotFound { .. })
    ));
    assert!(store.get_completed_application("B").await.is_some());
}

#[tokio::test]
async fn lists_deadlines_in_order_with_their_urgency() {
    let clock = Arc::new(FixedClock::new(fixed_now()));
    let store = store_over(Arc::new(InMemoryKeyValueStore::new()), clock);
    let deadlines = [
        ("none", None),
        ("overdue", Some(fixed_now() - Duration::hours(1))),
        ("soon", Some(fixed_now() + Duration::days(5))),
        ("later", Some(fixed_now() + Duration::days(30))),
    ];
    for (id, deadline) in deadlines {
        store
            .add_bookmark(JobPostingBuilder::new().job_id(id).build(), deadline, None)
            .await
            .unwrap();
    }

    let views = store.list_active(ActiveSort::Deadline).await;
    let rows: Vec<_> = views
        .iter()
        .map(|v| {
            (
                v.job.job_id.as_str(),
                v.urgency.map(|u| u.as_str()),
                v.deadline_label.as_deref(),
            )
        })
        .collect();

    assert_eq!(
        rows,
        vec![
            ("overdue", Some("overdue"), Some("1d overdue")),
            ("soon", Some("soon"), Some("5d left")),
            ("later", Some("comfortable"), Some("30d left")),
            ("none", None, None),
        ]
    );
}
