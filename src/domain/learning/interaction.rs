//! Question/response interactions with the tutoring model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Where an interaction happened. Only quizzes move level fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Quiz,
    ConceptDetective,
    #[default]
    Chat,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Quiz => "quiz",
            InteractionType::ConceptDetective => "concept_detective",
            InteractionType::Chat => "chat",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InteractionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quiz" => Ok(InteractionType::Quiz),
            "concept_detective" => Ok(InteractionType::ConceptDetective),
            "chat" => Ok(InteractionType::Chat),
            other => Err(ValidationError::invalid_format(
                "interaction_type",
                format!("unknown interaction type '{}'", other),
            )),
        }
    }
}

/// Heuristic quality scores for one interaction, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvaluation {
    pub comprehension: f64,
    pub depth: f64,
    pub engagement: f64,
    pub critical_thinking: f64,
}

impl InteractionEvaluation {
    /// Unweighted mean of the four scores.
    pub fn mean(&self) -> f64 {
        (self.comprehension + self.depth + self.engagement + self.critical_thinking) / 4.0
    }
}

/// A single question/response pair. Created per request and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmInteraction {
    pub question: String,
    pub response: String,
    pub interaction_type: InteractionType,
    pub timestamp: Timestamp,
    pub evaluation_score: f64,
    pub learning_indicators: BTreeMap<String, f64>,
}

impl LlmInteraction {
    pub fn new(
        question: impl Into<String>,
        response: impl Into<String>,
        interaction_type: InteractionType,
    ) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
            interaction_type,
            timestamp: Timestamp::now(),
            evaluation_score: 0.0,
            learning_indicators: BTreeMap::new(),
        }
    }

    /// Stores the evaluation on the interaction as named indicators.
    pub fn record_evaluation(&mut self, evaluation: &InteractionEvaluation) {
        self.evaluation_score = evaluation.mean();
        self.learning_indicators = BTreeMap::from([
            ("comprehension".to_string(), evaluation.comprehension),
            ("depth".to_string(), evaluation.depth),
            ("engagement".to_string(), evaluation.engagement),
            ("critical_thinking".to_string(), evaluation.critical_thinking),
        ]);
    }
}
