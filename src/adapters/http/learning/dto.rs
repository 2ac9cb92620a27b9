//! HTTP DTOs for learning endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::learning::{
    AttemptInput, LearningProfileView, ProcessInteractionResult, SkippedAttempt,
};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::learning::{
    InteractionEvaluation, InteractionType, LearningStyleProfile, Level, ProfileMetrics,
    StyleDimension,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to evaluate one question/response pair.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessInteractionRequest {
    pub question: String,
    pub response: String,
    #[serde(default)]
    pub interaction_type: InteractionType,
}

/// A chat history, oldest message first.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistoryRequest {
    #[serde(default)]
    pub chat_history: Vec<String>,
}

/// One submitted attempt. `quiz_id` / `concept_id` are accepted for `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptRequest {
    #[serde(alias = "quiz_id", alias = "concept_id")]
    pub id: String,
    pub score: f64,
    #[serde(default)]
    pub time_taken: f64,
    pub level: String,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl From<AttemptRequest> for AttemptInput {
    fn from(req: AttemptRequest) -> Self {
        Self {
            id: req.id,
            score: req.score,
            time_taken: req.time_taken,
            level: req.level,
            timestamp: req.timestamp,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordAttemptsRequest {
    #[serde(default)]
    pub quiz_attempts: Vec<AttemptRequest>,
    #[serde(default)]
    pub concept_attempts: Vec<AttemptRequest>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub comprehension: f64,
    pub depth: f64,
    pub engagement: f64,
    pub critical_thinking: f64,
}

impl From<InteractionEvaluation> for EvaluationResponse {
    fn from(evaluation: InteractionEvaluation) -> Self {
        Self {
            comprehension: evaluation.comprehension,
            depth: evaluation.depth,
            engagement: evaluation.engagement,
            critical_thinking: evaluation.critical_thinking,
        }
    }
}

/// Profile summary on a 0-100 scale.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileMetricsResponse {
    pub overall_progress: f64,
    pub engagement_score: f64,
    pub learning_style: StyleDimension,
    pub current_level: Level,
}

impl From<ProfileMetrics> for ProfileMetricsResponse {
    fn from(metrics: ProfileMetrics) -> Self {
        Self {
            overall_progress: metrics.overall_progress,
            engagement_score: metrics.engagement_score,
            learning_style: metrics.learning_style,
            current_level: metrics.current_level,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessInteractionResponse {
    pub evaluation: EvaluationResponse,
    pub profile_metrics: ProfileMetricsResponse,
}

impl From<ProcessInteractionResult> for ProcessInteractionResponse {
    fn from(result: ProcessInteractionResult) -> Self {
        Self {
            evaluation: result.evaluation.into(),
            profile_metrics: result.profile_metrics.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningProfileResponse {
    pub profile: LearningStyleProfile,
    pub metrics: ProfileMetricsResponse,
    pub stored: bool,
}

impl From<LearningProfileView> for LearningProfileResponse {
    fn from(view: LearningProfileView) -> Self {
        Self {
            profile: view.profile,
            metrics: view.metrics.into(),
            stored: view.stored,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedAttemptResponse {
    pub id: String,
    pub reason: String,
}

impl From<SkippedAttempt> for SkippedAttemptResponse {
    fn from(skipped: SkippedAttempt) -> Self {
        Self {
            id: skipped.id,
            reason: skipped.reason,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordAttemptsResponse {
    pub profile: LearningStyleProfile,
    pub skipped: Vec<SkippedAttemptResponse>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed.to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(error: &DomainError) -> Self {
        let details = if error.details.is_empty() {
            None
        } else {
            serde_json::to_value(&error.details).ok()
        };
        Self {
            code: error.code().to_string(),
            message: error.message().to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_request_defaults_to_chat() {
        let json = r#"{"question": "What is x?", "response": "A variable"}"#;
        let req: ProcessInteractionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.interaction_type, InteractionType::Chat);
    }

    #[test]
    fn interaction_request_rejects_unknown_type() {
        let json = r#"{"question": "q", "response": "r", "interaction_type": "essay"}"#;
        assert!(serde_json::from_str::<ProcessInteractionRequest>(json).is_err());
    }

    #[test]
    fn attempt_request_accepts_quiz_id_alias() {
        let json = r#"{"quiz_id": "q1", "score": 80, "time_taken": 12.5, "level": "beginner"}"#;
        let req: AttemptRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, "q1");
        assert_eq!(req.score, 80.0);
        assert!(req.timestamp.is_none());
    }

    #[test]
    fn metrics_response_uses_snake_case_names() {
        let response = ProfileMetricsResponse {
            overall_progress: 70.0,
            engagement_score: 12.0,
            learning_style: StyleDimension::ReadingWriting,
            current_level: Level::Intermediate,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["learning_style"], "reading_writing");
        assert_eq!(json["current_level"], "intermediate");
    }

    #[test]
    fn error_response_carries_code_and_details() {
        let error = DomainError::validation("score", "score out of range");
        let response = ErrorResponse::from(&error);
        assert_eq!(response.code, "VALIDATION_FAILED");
        assert_eq!(response.details.unwrap()["field"], "score");
    }
}
