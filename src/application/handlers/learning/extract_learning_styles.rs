//! ExtractLearningStyles - Stateless query scoring a chat history.

use crate::domain::learning::{extract_learning_styles, LearningStyleProfile};

/// Query carrying the messages to score, oldest first.
#[derive(Debug, Clone)]
pub struct ExtractLearningStylesQuery {
    pub chat_history: Vec<String>,
}

/// Handler for style extraction. Touches no storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractLearningStylesHandler;

impl ExtractLearningStylesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: ExtractLearningStylesQuery) -> LearningStyleProfile {
        let profile = extract_learning_styles(&query.chat_history);
        tracing::debug!(
            messages = query.chat_history.len(),
            dominant = %profile.dominant_learning_style(),
            "Learning styles extracted"
        );
        profile
    }
}
