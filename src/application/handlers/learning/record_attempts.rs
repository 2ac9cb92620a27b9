//! RecordAttempts - Command handler folding quiz and concept-detective
//! attempts into cognitive and behavioral metrics.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId, ValidationError};
use crate::domain::learning::{
    update_behavioral_metrics, update_cognitive_metrics, ConceptDetectiveAttempt,
    LearningStyleProfile, Level, QuizAttempt,
};
use crate::ports::LearningProfileRepository;

use super::UserLocks;

/// Unvalidated attempt as submitted by a client.
#[derive(Debug, Clone)]
pub struct AttemptInput {
    pub id: String,
    pub score: f64,
    pub time_taken: f64,
    pub level: String,
    pub timestamp: Option<Timestamp>,
}

/// Command to record a batch of attempts.
#[derive(Debug, Clone)]
pub struct RecordAttemptsCommand {
    pub user_id: UserId,
    pub quiz_attempts: Vec<AttemptInput>,
    pub concept_attempts: Vec<AttemptInput>,
}

/// An input left out of the update and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedAttempt {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct RecordAttemptsResult {
    pub profile: LearningStyleProfile,
    pub skipped: Vec<SkippedAttempt>,
}

/// Handler for recording attempts.
pub struct RecordAttemptsHandler {
    repository: Arc<dyn LearningProfileRepository>,
    locks: Arc<UserLocks>,
}

impl RecordAttemptsHandler {
    pub fn new(repository: Arc<dyn LearningProfileRepository>, locks: Arc<UserLocks>) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(
        &self,
        cmd: RecordAttemptsCommand,
    ) -> Result<RecordAttemptsResult, DomainError> {
        let mut skipped = Vec::new();
        let quizzes = parse_all(cmd.quiz_attempts, &mut skipped, |id, score, time, level, at| {
            QuizAttempt::new(id, score, time, level, at)
        });
        let concepts = parse_all(cmd.concept_attempts, &mut skipped, |id, score, time, level, at| {
            ConceptDetectiveAttempt::new(id, score, time, level, at)
        });

        for quiz in &quizzes {
            tracing::debug!(
                user_id = %cmd.user_id,
                quiz_id = quiz.quiz_id(),
                attempted_at = %quiz.timestamp().as_datetime(),
                "Quiz attempt accepted"
            );
        }
        for concept in &concepts {
            tracing::debug!(
                user_id = %cmd.user_id,
                concept_id = concept.concept_id(),
                attempted_at = %concept.timestamp().as_datetime(),
                "Concept attempt accepted"
            );
        }

        let _guard = self.locks.acquire(&cmd.user_id).await;

        let mut profile = self
            .repository
            .find_by_user(&cmd.user_id)
            .await?
            .unwrap_or_else(|| LearningStyleProfile::new(Timestamp::now()));

        update_cognitive_metrics(&mut profile, &quizzes, &concepts);
        update_behavioral_metrics(&mut profile, &quizzes, &concepts);
        profile.last_updated = Timestamp::now();

        self.repository.save(&cmd.user_id, &profile).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            quizzes = quizzes.len(),
            concepts = concepts.len(),
            skipped = skipped.len(),
            "Attempts recorded"
        );

        Ok(RecordAttemptsResult { profile, skipped })
    }
}

/// Builds typed attempts, collecting anything unparseable into `skipped`.
fn parse_all<T, F>(inputs: Vec<AttemptInput>, skipped: &mut Vec<SkippedAttempt>, build: F) -> Vec<T>
where
    F: Fn(String, f64, f64, Level, Timestamp) -> Result<T, ValidationError>,
{
    let mut parsed = Vec::with_capacity(inputs.len());
    for input in inputs {
        let result = Level::from_str(&input.level).and_then(|level| {
            build(
                input.id.clone(),
                input.score,
                input.time_taken,
                level,
                input.timestamp.unwrap_or_else(Timestamp::now),
            )
        });
        match result {
            Ok(attempt) => parsed.push(attempt),
            Err(err) => {
                tracing::warn!(attempt_id = %input.id, error = %err, "Skipping invalid attempt");
                skipped.push(SkippedAttempt {
                    id: input.id,
                    reason: err.to_string(),
                });
            }
        }
    }
    parsed
}
