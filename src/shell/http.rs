use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::bookmarks::use_cases::list_bookmarks::inbound::http as list_http;
use crate::modules::bookmarks::use_cases::manage_bookmarks::inbound::http as manage_http;
use crate::modules::bookmarks::use_cases::transition_application::inbound::http as transition_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/bookmarks",
            get(list_http::list_active).post(manage_http::add),
        )
        .route("/bookmarks/refresh", post(list_http::refresh))
        .route(
            "/bookmarks/{job_id}",
            get(manage_http::get)
                .patch(manage_http::update)
                .delete(manage_http::remove),
        )
        .route(
            "/bookmarks/{job_id}/complete",
            post(transition_http::mark_as_completed),
        )
        .route("/applications/completed", get(list_http::list_completed))
        .route(
            "/applications/completed/{job_id}",
            get(list_http::get_completed),
        )
        .route(
            "/applications/completed/{job_id}/reactivate",
            post(transition_http::move_to_active),
        )
        .route(
            "/transitions/pending/resume",
            post(transition_http::resume_pending),
        )
        .route("/status", get(list_http::status))
        .with_state(state)
}
