//! HTTP routes for learning endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    delete_profile, extract_styles, get_knowledge, get_profile, process_interaction,
    record_attempts, update_knowledge, LearningHandlers,
};

/// Creates the learning router, to be nested under `/api/learning`.
pub fn learning_routes(handlers: LearningHandlers) -> Router {
    Router::new()
        .route("/interactions", post(process_interaction))
        .route("/styles", post(extract_styles))
        .route("/attempts", post(record_attempts))
        .route("/profile", get(get_profile).delete(delete_profile))
        .route("/knowledge", get(get_knowledge).post(update_knowledge))
        .with_state(handlers)
}
