//! Per-user knowledge state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::Timestamp;

/// Topic confidences and qualitative notes about a learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeState {
    pub topics: BTreeMap<String, f64>,
    pub misconceptions: Vec<String>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub last_updated: Timestamp,
}

impl KnowledgeState {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            topics: BTreeMap::new(),
            misconceptions: Vec::new(),
            strengths: Vec::new(),
            areas_for_improvement: Vec::new(),
            last_updated: timestamp,
        }
    }
}

impl Default for KnowledgeState {
    fn default() -> Self {
        Self::new(Timestamp::now())
    }
}

/// Derives a knowledge state from chat history.
///
/// Topic extraction is not implemented; this always returns an empty state.
pub fn update_knowledge_trace<S: AsRef<str>>(_chat_history: &[S]) -> KnowledgeState {
    KnowledgeState::default()
}
