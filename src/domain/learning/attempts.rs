//! Quiz and concept-detective attempts folded into cognitive/behavioral metrics.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

use super::profile::Level;

/// Attempt scores are percentages.
pub const MAX_ATTEMPT_SCORE: f64 = 100.0;

/// Common view over attempt kinds used by the metrics updater.
pub trait ScoredAttempt {
    fn score(&self) -> f64;
    fn time_taken(&self) -> f64;
    fn level(&self) -> Level;

    /// An attempt counts as completed when it scored above zero.
    fn is_completed(&self) -> bool {
        self.score() > 0.0
    }
}

fn validate_attempt(score: f64, time_taken: f64) -> Result<(), ValidationError> {
    if !score.is_finite() || !(0.0..=MAX_ATTEMPT_SCORE).contains(&score) {
        return Err(ValidationError::out_of_range(
            "score",
            0.0,
            MAX_ATTEMPT_SCORE,
            score,
        ));
    }
    if !time_taken.is_finite() || time_taken < 0.0 {
        return Err(ValidationError::out_of_range(
            "time_taken",
            0.0,
            f64::MAX,
            time_taken,
        ));
    }
    Ok(())
}

/// A graded quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    quiz_id: String,
    score: f64,
    time_taken: f64,
    level: Level,
    timestamp: Timestamp,
}

impl QuizAttempt {
    /// Validates `score` in [0, 100] and a non-negative duration in minutes.
    pub fn new(
        quiz_id: impl Into<String>,
        score: f64,
        time_taken: f64,
        level: Level,
        timestamp: Timestamp,
    ) -> Result<Self, ValidationError> {
        let quiz_id = quiz_id.into();
        if quiz_id.trim().is_empty() {
            return Err(ValidationError::empty_field("quiz_id"));
        }
        validate_attempt(score, time_taken)?;
        Ok(Self {
            quiz_id,
            score,
            time_taken,
            level,
            timestamp,
        })
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

impl ScoredAttempt for QuizAttempt {
    fn score(&self) -> f64 {
        self.score
    }

    fn time_taken(&self) -> f64 {
        self.time_taken
    }

    fn level(&self) -> Level {
        self.level
    }
}

/// A concept-detective exercise attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptDetectiveAttempt {
    concept_id: String,
    score: f64,
    time_taken: f64,
    level: Level,
    timestamp: Timestamp,
}

impl ConceptDetectiveAttempt {
    pub fn new(
        concept_id: impl Into<String>,
        score: f64,
        time_taken: f64,
        level: Level,
        timestamp: Timestamp,
    ) -> Result<Self, ValidationError> {
        let concept_id = concept_id.into();
        if concept_id.trim().is_empty() {
            return Err(ValidationError::empty_field("concept_id"));
        }
        validate_attempt(score, time_taken)?;
        Ok(Self {
            concept_id,
            score,
            time_taken,
            level,
            timestamp,
        })
    }

    pub fn concept_id(&self) -> &str {
        &self.concept_id
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

impl ScoredAttempt for ConceptDetectiveAttempt {
    fn score(&self) -> f64 {
        self.score
    }

    fn time_taken(&self) -> f64 {
        self.time_taken
    }

    fn level(&self) -> Level {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_attempt_accepts_valid_input() {
        let attempt =
            QuizAttempt::new("q1", 80.0, 5.0, Level::Beginner, Timestamp::now()).unwrap();
        assert_eq!(attempt.quiz_id(), "q1");
        assert_eq!(attempt.score(), 80.0);
        assert!(attempt.is_completed());
    }

    #[test]
    fn zero_score_is_not_completed() {
        let attempt =
            QuizAttempt::new("q1", 0.0, 5.0, Level::Beginner, Timestamp::now()).unwrap();
        assert!(!attempt.is_completed());
    }

    #[test]
    fn score_outside_percent_range_is_rejected() {
        let err = QuizAttempt::new("q1", 120.0, 5.0, Level::Advanced, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.field(), "score");

        assert!(
            ConceptDetectiveAttempt::new("c1", -1.0, 5.0, Level::Advanced, Timestamp::now())
                .is_err()
        );
        assert!(
            ConceptDetectiveAttempt::new("c1", f64::NAN, 5.0, Level::Advanced, Timestamp::now())
                .is_err()
        );
    }

    #[test]
    fn negative_duration_is_rejected() {
        let err = ConceptDetectiveAttempt::new("c1", 50.0, -2.0, Level::Beginner, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.field(), "time_taken");
    }

    #[test]
    fn empty_id_is_rejected() {
        let err =
            QuizAttempt::new("  ", 50.0, 1.0, Level::Beginner, Timestamp::now()).unwrap_err();
        assert_eq!(err.field(), "quiz_id");
    }
}
