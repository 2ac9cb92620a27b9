//! Applies an evaluated interaction to a stored profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::dimensions::StyleDimension;
use super::interaction::{InteractionEvaluation, InteractionType, LlmInteraction};
use super::profile::{clamp_unit, Level, LearningStyleProfile};

/// Weight kept by the previous value in exponential-decay updates.
const LEVEL_RETAIN: f64 = 0.7;
const ENGAGEMENT_RETAIN: f64 = 0.7;
const PERCEPTUAL_RETAIN: f64 = 0.8;
const PERCEPTUAL_BUMP: f64 = 0.2;

/// Fixed-weight progress: `(beginner + 1.5 * intermediate + 2 * advanced) / 4.5`.
///
/// Differs from the renormalized mean used by the attempt updater; both
/// write `overall_progress` and the most recent writer wins.
pub fn fixed_weight_progress(profile: &LearningStyleProfile) -> f64 {
    let metrics = &profile.cognitive_metrics;
    let total = metrics.beginner_level + metrics.intermediate_level * 1.5 + metrics.advanced_level * 2.0;
    clamp_unit((total / 4.5).min(1.0))
}

/// Folds one evaluated interaction into `profile` and stamps it with `now`.
pub fn apply_interaction(
    profile: &mut LearningStyleProfile,
    interaction: &LlmInteraction,
    evaluation: &InteractionEvaluation,
    now: Timestamp,
) {
    if interaction.interaction_type == InteractionType::Quiz {
        profile
            .cognitive_metrics
            .quiz_scores
            .push(evaluation.comprehension * 100.0);

        let level = Level::from_depth(evaluation.depth);
        let slot = profile.cognitive_metrics.level_mut(level);
        *slot = clamp_unit(*slot * LEVEL_RETAIN + evaluation.depth * (1.0 - LEVEL_RETAIN));
    }

    let engagement = &mut profile.behavioral_metrics.engagement_score;
    *engagement =
        clamp_unit(*engagement * ENGAGEMENT_RETAIN + evaluation.engagement * (1.0 - ENGAGEMENT_RETAIN));

    let question = interaction.question.to_lowercase();
    for dimension in StyleDimension::PERCEPTUAL {
        if dimension.question_cues().iter().any(|cue| question.contains(cue)) {
            let slot = profile.dimension_mut(dimension);
            *slot = clamp_unit(*slot * PERCEPTUAL_RETAIN + PERCEPTUAL_BUMP);
        }
    }

    profile.cognitive_metrics.overall_progress = fixed_weight_progress(profile);
    profile.last_updated = now;
}

/// Summary returned to callers after an interaction, on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    pub overall_progress: f64,
    pub engagement_score: f64,
    pub learning_style: StyleDimension,
    pub current_level: Level,
}

impl ProfileMetrics {
    pub fn from_profile(profile: &LearningStyleProfile) -> Self {
        Self {
            overall_progress: profile.cognitive_metrics.overall_progress * 100.0,
            engagement_score: profile.behavioral_metrics.engagement_score * 100.0,
            learning_style: profile.dominant_learning_style(),
            current_level: profile.current_level(),
        }
    }
}
