//! HTTP adapter for learning endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AttemptRequest, ChatHistoryRequest, ErrorResponse, EvaluationResponse,
    LearningProfileResponse, ProcessInteractionRequest, ProcessInteractionResponse,
    ProfileMetricsResponse, RecordAttemptsRequest, RecordAttemptsResponse,
};
pub use handlers::LearningHandlers;
pub use routes::learning_routes;
