//! Learning handlers - interactions, attempts, style extraction and knowledge.
//!
//! Handlers that read, mutate and store a profile hold the learner's
//! [`UserLocks`] entry for the whole sequence.

mod delete_learning_profile;
mod extract_learning_styles;
mod get_knowledge_state;
mod get_learning_profile;
mod process_interaction;
mod record_attempts;
mod update_knowledge_trace;
mod user_locks;

pub use delete_learning_profile::{DeleteLearningProfileCommand, DeleteLearningProfileHandler};
pub use extract_learning_styles::{ExtractLearningStylesHandler, ExtractLearningStylesQuery};
pub use get_knowledge_state::{GetKnowledgeStateHandler, GetKnowledgeStateQuery};
pub use get_learning_profile::{
    GetLearningProfileHandler, GetLearningProfileQuery, LearningProfileView,
};
pub use process_interaction::{
    ProcessInteractionCommand, ProcessInteractionHandler, ProcessInteractionResult,
};
pub use record_attempts::{
    AttemptInput, RecordAttemptsCommand, RecordAttemptsHandler, RecordAttemptsResult,
    SkippedAttempt,
};
pub use update_knowledge_trace::{UpdateKnowledgeTraceCommand, UpdateKnowledgeTraceHandler};
pub use user_locks::UserLocks;
