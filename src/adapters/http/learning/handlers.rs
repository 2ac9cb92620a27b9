//! HTTP handlers for learning endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::learning::{
    DeleteLearningProfileCommand, DeleteLearningProfileHandler, ExtractLearningStylesHandler,
    ExtractLearningStylesQuery, GetKnowledgeStateHandler, GetKnowledgeStateQuery,
    GetLearningProfileHandler, GetLearningProfileQuery, ProcessInteractionCommand,
    ProcessInteractionHandler, RecordAttemptsCommand, RecordAttemptsHandler,
    UpdateKnowledgeTraceCommand, UpdateKnowledgeTraceHandler, UserLocks,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{KnowledgeStateRepository, LearningProfileRepository};
use serde::de::DeserializeOwned;

use super::dto::{
    ChatHistoryRequest, ErrorResponse, LearningProfileResponse, ProcessInteractionRequest,
    ProcessInteractionResponse, RecordAttemptsRequest, RecordAttemptsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LearningHandlers {
    process_interaction: Arc<ProcessInteractionHandler>,
    record_attempts: Arc<RecordAttemptsHandler>,
    extract_styles: Arc<ExtractLearningStylesHandler>,
    get_profile: Arc<GetLearningProfileHandler>,
    delete_profile: Arc<DeleteLearningProfileHandler>,
    get_knowledge: Arc<GetKnowledgeStateHandler>,
    update_knowledge: Arc<UpdateKnowledgeTraceHandler>,
}

impl LearningHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        process_interaction: Arc<ProcessInteractionHandler>,
        record_attempts: Arc<RecordAttemptsHandler>,
        extract_styles: Arc<ExtractLearningStylesHandler>,
        get_profile: Arc<GetLearningProfileHandler>,
        delete_profile: Arc<DeleteLearningProfileHandler>,
        get_knowledge: Arc<GetKnowledgeStateHandler>,
        update_knowledge: Arc<UpdateKnowledgeTraceHandler>,
    ) -> Self {
        Self {
            process_interaction,
            record_attempts,
            extract_styles,
            get_profile,
            delete_profile,
            get_knowledge,
            update_knowledge,
        }
    }

    /// Wires every learning handler over one pair of repositories, sharing a
    /// single [`UserLocks`] between the writers.
    pub fn from_repositories(
        profiles: Arc<dyn LearningProfileRepository>,
        knowledge: Arc<dyn KnowledgeStateRepository>,
    ) -> Self {
        let locks = Arc::new(UserLocks::new());
        Self::new(
            Arc::new(ProcessInteractionHandler::new(profiles.clone(), locks.clone())),
            Arc::new(RecordAttemptsHandler::new(profiles.clone(), locks.clone())),
            Arc::new(ExtractLearningStylesHandler::new()),
            Arc::new(GetLearningProfileHandler::new(profiles.clone())),
            Arc::new(DeleteLearningProfileHandler::new(profiles, locks)),
            Arc::new(GetKnowledgeStateHandler::new(knowledge.clone())),
            Arc::new(UpdateKnowledgeTraceHandler::new(knowledge)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request body extractor
// ════════════════════════════════════════════════════════════════════════════

/// JSON body whose decode failures answer 400 with an [`ErrorResponse`].
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(rejection.body_text())),
                )
                    .into_response())
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/learning/interactions - Evaluate an interaction and update the profile
pub async fn process_interaction(
    State(handlers): State<LearningHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<ProcessInteractionRequest>,
) -> Response {
    let cmd = ProcessInteractionCommand {
        user_id: user.id,
        question: req.question,
        response: req.response,
        interaction_type: req.interaction_type,
    };

    match handlers.process_interaction.handle(cmd).await {
        Ok(result) => {
            let response: ProcessInteractionResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/learning/styles - Score a chat history without storing anything
pub async fn extract_styles(
    State(handlers): State<LearningHandlers>,
    RequireAuth(_user): RequireAuth,
    JsonBody(req): JsonBody<ChatHistoryRequest>,
) -> Response {
    let profile = handlers.extract_styles.handle(ExtractLearningStylesQuery {
        chat_history: req.chat_history,
    });
    (StatusCode::OK, Json(profile)).into_response()
}

/// POST /api/learning/attempts - Fold quiz and concept attempts into the profile
pub async fn record_attempts(
    State(handlers): State<LearningHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<RecordAttemptsRequest>,
) -> Response {
    let cmd = RecordAttemptsCommand {
        user_id: user.id,
        quiz_attempts: req.quiz_attempts.into_iter().map(Into::into).collect(),
        concept_attempts: req.concept_attempts.into_iter().map(Into::into).collect(),
    };

    match handlers.record_attempts.handle(cmd).await {
        Ok(result) => {
            let response = RecordAttemptsResponse {
                profile: result.profile,
                skipped: result.skipped.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// GET /api/learning/profile - The caller's profile
pub async fn get_profile(
    State(handlers): State<LearningHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .get_profile
        .handle(GetLearningProfileQuery { user_id: user.id })
        .await
    {
        Ok(view) => {
            let response: LearningProfileResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// DELETE /api/learning/profile - Forget the caller's profile
pub async fn delete_profile(
    State(handlers): State<LearningHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .delete_profile
        .handle(DeleteLearningProfileCommand { user_id: user.id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// GET /api/learning/knowledge - The caller's knowledge state
pub async fn get_knowledge(
    State(handlers): State<LearningHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .get_knowledge
        .handle(GetKnowledgeStateQuery { user_id: user.id })
        .await
    {
        Ok(state) => (StatusCode::OK, Json(state)).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/learning/knowledge - Rebuild the knowledge state from chat history
pub async fn update_knowledge(
    State(handlers): State<LearningHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<ChatHistoryRequest>,
) -> Response {
    let cmd = UpdateKnowledgeTraceCommand {
        user_id: user.id,
        chat_history: req.chat_history,
    };

    match handlers.update_knowledge.handle(cmd).await {
        Ok(state) => (StatusCode::OK, Json(state)).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::ConfigurationError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_domain_error(error: DomainError) -> Response {
    let status = status_for(error.code());
    if status.is_server_error() {
        tracing::error!(error = %error, "Learning request failed");
    } else {
        tracing::debug!(error = %error, "Learning request rejected");
    }
    (status, Json(ErrorResponse::from(&error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_statuses() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(ErrorCode::ConfigurationError),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn domain_error_response_has_matching_status() {
        let response = handle_domain_error(DomainError::configuration("no database"));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
