use crate::shared::infrastructure::key_value_store::KeyValueStore;
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::shell::state::AppState;
use crate::tests::fixtures::clock::fixed_clock;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use std::sync::Arc;

/// App state over an in-memory store; the concrete handle stays available for seeding and faults.
pub fn app_state(storage: Arc<InMemoryKeyValueStore>) -> AppState {
    let storage: Arc<dyn KeyValueStore> = storage;
    AppState::new(storage, fixed_clock())
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
