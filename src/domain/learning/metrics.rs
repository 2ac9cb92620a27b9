//! Folds attempt batches into cognitive and behavioral metrics.
//!
//! Both updaters recompute their totals from the batch they are given:
//! `total_quizzes_taken` and `total_learning_time` are replaced, not
//! incremented, so callers wanting lifetime totals must pass the full history.

use std::collections::BTreeMap;

use super::attempts::{ConceptDetectiveAttempt, QuizAttempt, ScoredAttempt, MAX_ATTEMPT_SCORE};
use super::profile::{clamp_unit, Level, LearningStyleProfile};

/// Learning time (minutes) at which the time factor of engagement saturates.
pub const ENGAGEMENT_TIME_CAP_MINUTES: f64 = 480.0;

const ENGAGEMENT_TIME_WEIGHT: f64 = 0.4;
const ENGAGEMENT_COMPLETION_WEIGHT: f64 = 0.6;

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Updates per-level progress, score history and overall progress.
///
/// Level fields hold the mean percent score of that level scaled to
/// `[0, 1]`. Levels without attempts in this batch keep their value and are
/// left out of the overall-progress mean.
pub fn update_cognitive_metrics(
    profile: &mut LearningStyleProfile,
    quiz_attempts: &[QuizAttempt],
    concept_attempts: &[ConceptDetectiveAttempt],
) {
    let mut by_level: BTreeMap<Level, Vec<f64>> = BTreeMap::new();

    for attempt in quiz_attempts {
        by_level.entry(attempt.level()).or_default().push(attempt.score());
        profile.cognitive_metrics.quiz_scores.push(attempt.score());
    }
    for attempt in concept_attempts {
        by_level.entry(attempt.level()).or_default().push(attempt.score());
        profile
            .cognitive_metrics
            .concept_detective_scores
            .push(attempt.score());
    }

    let mut weighted_progress = 0.0;
    let mut total_weight = 0.0;
    for level in Level::ALL {
        let Some(level_mean) = by_level.get(&level).and_then(|scores| mean(scores)) else {
            continue;
        };
        let fraction = clamp_unit(level_mean / MAX_ATTEMPT_SCORE);
        *profile.cognitive_metrics.level_mut(level) = fraction;
        weighted_progress += fraction * level.progress_weight();
        total_weight += level.progress_weight();
    }

    if total_weight > 0.0 {
        profile.cognitive_metrics.overall_progress = clamp_unit(weighted_progress / total_weight);
    }

    profile.cognitive_metrics.total_quizzes_taken =
        (quiz_attempts.len() + concept_attempts.len()) as u32;
}

/// Updates time-on-task, completion rate and engagement.
pub fn update_behavioral_metrics(
    profile: &mut LearningStyleProfile,
    quiz_attempts: &[QuizAttempt],
    concept_attempts: &[ConceptDetectiveAttempt],
) {
    let quiz_times: Vec<f64> = quiz_attempts.iter().map(|a| a.time_taken()).collect();
    let concept_times: Vec<f64> = concept_attempts.iter().map(|a| a.time_taken()).collect();
    let metrics = &mut profile.behavioral_metrics;

    if let Some(average) = mean(&quiz_times) {
        metrics.average_time_per_quiz = average;
    }
    if let Some(average) = mean(&concept_times) {
        metrics.average_time_per_concept = average;
    }

    metrics.total_learning_time = quiz_times.iter().chain(concept_times.iter()).sum();

    let total_attempts = quiz_attempts.len() + concept_attempts.len();
    let completed = quiz_attempts.iter().filter(|a| a.is_completed()).count()
        + concept_attempts.iter().filter(|a| a.is_completed()).count();
    metrics.session_completion_rate = if total_attempts > 0 {
        clamp_unit(completed as f64 / total_attempts as f64)
    } else {
        0.0
    };

    let time_factor = (metrics.total_learning_time / ENGAGEMENT_TIME_CAP_MINUTES).min(1.0);
    metrics.engagement_score = clamp_unit(
        ENGAGEMENT_TIME_WEIGHT * time_factor
            + ENGAGEMENT_COMPLETION_WEIGHT * metrics.session_completion_rate,
    );
}
