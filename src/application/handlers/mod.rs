//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod learning;

pub use learning::{
    // Commands and Results
    AttemptInput, DeleteLearningProfileCommand, ProcessInteractionCommand,
    ProcessInteractionResult, RecordAttemptsCommand, RecordAttemptsResult, SkippedAttempt,
    UpdateKnowledgeTraceCommand,
    // Queries and Views
    ExtractLearningStylesQuery, GetKnowledgeStateQuery, GetLearningProfileQuery,
    LearningProfileView,
    // Handlers
    DeleteLearningProfileHandler, ExtractLearningStylesHandler, GetKnowledgeStateHandler,
    GetLearningProfileHandler, ProcessInteractionHandler, RecordAttemptsHandler,
    UpdateKnowledgeTraceHandler,
    // Concurrency
    UserLocks,
};
