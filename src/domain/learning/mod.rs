//! Learning domain - style extraction, metric folds and profile updates.
//!
//! Scoring (`signals`, `evaluator`) is pure and stateless. Folding
//! (`aggregator`, `metrics`, `mutator`) mutates a caller-owned
//! [`LearningStyleProfile`] and never touches storage.

mod aggregator;
mod attempts;
mod dimensions;
mod evaluator;
mod interaction;
mod knowledge;
mod metrics;
mod mutator;
mod profile;
mod schema;
mod signals;

pub use aggregator::{aggregate_signals, extract_learning_styles, temporal_weight, EMA_ALPHA};
pub use attempts::{ConceptDetectiveAttempt, QuizAttempt, ScoredAttempt, MAX_ATTEMPT_SCORE};
pub use dimensions::{StyleDimension, StyleSignals};
pub use evaluator::evaluate;
pub use interaction::{InteractionEvaluation, InteractionType, LlmInteraction};
pub use knowledge::{update_knowledge_trace, KnowledgeState};
pub use metrics::{update_behavioral_metrics, update_cognitive_metrics};
pub use mutator::{apply_interaction, fixed_weight_progress, ProfileMetrics};
pub use profile::{
    AssessmentPreference, BehavioralMetrics, CognitiveMetrics, CognitiveStyle, InstructionStyle,
    LearningMetrics, LearningStyleProfile, Level, PerceptualMode, SocialPreference,
};
pub use schema::{
    LegacyProfileToV2, ProfileMigration, ProfileSchema, SchemaError, CURRENT_PROFILE_SCHEMA,
};
pub use signals::score_message;
