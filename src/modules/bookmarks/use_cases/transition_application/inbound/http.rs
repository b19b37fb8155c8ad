use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::modules::bookmarks::adapters::inbound::http_responses::mutation_response;
use crate::shell::state::AppState;

pub async fn mark_as_completed(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let result = state.store.mark_as_completed(&job_id).await;
    mutation_response(result, StatusCode::OK)
}

pub async fn move_to_active(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let result = state.store.move_to_active(&job_id).await;
    mutation_response(result, StatusCode::OK)
}

/// `bookmark` carries the record whose transition was finished, absent when nothing was pending.
pub async fn resume_pending(State(state): State<AppState>) -> Response {
    let result = state.store.resume_pending_transition().await;
    mutation_response(result, StatusCode::OK)
}

#[cfg(test)]
mod transition_application_http_inbound_tests {
    use axum::{Router, http::StatusCode, routing::get, routing::post};
    use rstest::{fixture, rstest};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::modules::bookmarks::store::ACTIVE_KEY;
    use crate::modules::bookmarks::use_cases::list_bookmarks::inbound::http as list_http;
    use crate::shared::infrastructure::key_value_store::KeyValueStore;
    use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
    use crate::tests::fixtures::jobs::active_job;
    use crate::tests::fixtures::state::{app_state, body_json, empty_request};

    fn app(storage: Arc<InMemoryKeyValueStore>) -> Router {
        Router::new()
            .route("/bookmarks/{job_id}/complete", post(super::mark_as_completed))
            .route(
                "/applications/completed/{job_id}/reactivate",
                post(super::move_to_active),
            )
            .route("/transitions/pending/resume", post(super::resume_pending))
            .route("/status", get(list_http::status))
            .with_state(app_state(storage))
    }

    #[fixture]
    async fn storage() -> Arc<InMemoryKeyValueStore> {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        storage
            .seed(ACTIVE_KEY, &serde_json::to_string(&vec![active_job("a")]).unwrap())
            .await;
        storage
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_complete_and_reactivate_a_bookmark(
        #[future] storage: Arc<InMemoryKeyValueStore>,
    ) {
        let app = app(storage.await);

        let completed = app
            .clone()
            .oneshot(empty_request("POST", "/bookmarks/a/complete"))
            .await
            .unwrap();
        assert_eq!(completed.status(), StatusCode::OK);
        let json = body_json(completed).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["bookmark"]["application_status"], "Completed");
        assert!(json["bookmark"]["completed_at"].is_string());

        let reactivated = app
            .oneshot(empty_request(
                "POST",
                "/applications/completed/a/reactivate",
            ))
            .await
            .unwrap();
        assert_eq!(reactivated.status(), StatusCode::OK);
        let json = body_json(reactivated).await;
        assert_eq!(json["bookmark"]["application_status"], "In Progress");
        assert!(json["bookmark"].get("completed_at").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_404_when_completing_an_unknown_job(
        #[future] storage: Arc<InMemoryKeyValueStore>,
    ) {
        let response = app(storage.await)
            .oneshot(empty_request("POST", "/bookmarks/ghost/complete"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["kind"], "not_found");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_and_then_resume_a_partial_transition(
        #[future] storage: Arc<InMemoryKeyValueStore>,
    ) {
        let storage = storage.await;
        let app = app(storage.clone());
        storage.fail_writes_to(ACTIVE_KEY).await;

        let partial = app
            .clone()
            .oneshot(empty_request("POST", "/bookmarks/a/complete"))
            .await
            .unwrap();
        assert_eq!(partial.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(partial).await;
        assert_eq!(json["kind"], "partial_transition");
        assert_eq!(
            json["error"],
            "Application saved as completed but not removed from active bookmarks; retry to finish"
        );

        let status = body_json(
            app.clone()
                .oneshot(empty_request("GET", "/status"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status["pending_job_id"], "a");
        assert_eq!(status["pending_missing"], "remove_from_source");

        storage.clear_failures().await;
        let resumed = app
            .oneshot(empty_request("POST", "/transitions/pending/resume"))
            .await
            .unwrap();
        assert_eq!(resumed.status(), StatusCode::OK);
        assert_eq!(body_json(resumed).await["bookmark"]["job_id"], "a");
        assert_eq!(storage.get(ACTIVE_KEY).await.unwrap().as_deref(), Some("[]"));
    }
}
