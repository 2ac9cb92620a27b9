//! LearningStyleProfile aggregate and its fixed-shape sub-records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, ValidationError};

use super::dimensions::StyleDimension;
use super::schema::CURRENT_PROFILE_SCHEMA;

/// Clamps a metric into `[0, 1]`; NaN collapses to zero.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Difficulty tier used to tag attempts and bucket cognitive scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// All levels in classification order.
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// Weight of this level in the attempt-based overall progress mean.
    pub fn progress_weight(&self) -> f64 {
        match self {
            Level::Beginner => 0.3,
            Level::Intermediate => 0.3,
            Level::Advanced => 0.4,
        }
    }

    /// Buckets an interaction depth score into a level.
    pub fn from_depth(depth: f64) -> Self {
        if depth < 0.4 {
            Level::Beginner
        } else if depth < 0.7 {
            Level::Intermediate
        } else {
            Level::Advanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(ValidationError::invalid_format(
                "level",
                format!("unknown level '{}'", other),
            )),
        }
    }
}

/// Sensory channel preference (VARK). Values are independent, not a distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerceptualMode {
    pub visual: f64,
    pub auditory: f64,
    pub reading_writing: f64,
    pub kinesthetic: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CognitiveStyle {
    pub global: f64,
    pub analytical: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialPreference {
    pub independent: f64,
    pub collaborative: f64,
}

/// Instruction preferences. No text signal feeds these yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionStyle {
    pub direct: f64,
    pub constructivist: f64,
    pub inquiry_based: f64,
    pub project_based: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentPreference {
    pub formative: f64,
    pub summative: f64,
    pub performance: f64,
}

/// Knowledge progress derived from quizzes, concept work and interactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CognitiveMetrics {
    pub beginner_level: f64,
    pub intermediate_level: f64,
    pub advanced_level: f64,
    pub total_quizzes_taken: u32,
    /// Percent scores, append-only.
    pub quiz_scores: Vec<f64>,
    /// Percent scores, append-only.
    pub concept_detective_scores: Vec<f64>,
    pub overall_progress: f64,
}

impl CognitiveMetrics {
    pub fn level(&self, level: Level) -> f64 {
        match level {
            Level::Beginner => self.beginner_level,
            Level::Intermediate => self.intermediate_level,
            Level::Advanced => self.advanced_level,
        }
    }

    pub fn level_mut(&mut self, level: Level) -> &mut f64 {
        match level {
            Level::Beginner => &mut self.beginner_level,
            Level::Intermediate => &mut self.intermediate_level,
            Level::Advanced => &mut self.advanced_level,
        }
    }
}

/// Time-on-task and completion behaviour. Durations are in minutes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralMetrics {
    pub average_time_per_quiz: f64,
    pub average_time_per_concept: f64,
    pub total_learning_time: f64,
    pub session_completion_rate: f64,
    pub engagement_score: f64,
}

/// Coarse learning outcomes. Persisted with the profile; no update path
/// writes them today.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningMetrics {
    pub completion_rate: f64,
    pub time_to_learn: f64,
    pub engagement_score: f64,
}

/// Durable per-user learning state.
///
/// Loaded fresh per operation, folded in memory by the domain services and
/// written back whole by a `LearningProfileRepository`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStyleProfile {
    pub schema_version: u32,
    pub perceptual_mode: PerceptualMode,
    pub cognitive_style: CognitiveStyle,
    pub social_preference: SocialPreference,
    pub instruction_style: InstructionStyle,
    pub assessment_preference: AssessmentPreference,
    pub cognitive_metrics: CognitiveMetrics,
    pub behavioral_metrics: BehavioralMetrics,
    pub learning_metrics: LearningMetrics,
    pub last_updated: Timestamp,
}

impl LearningStyleProfile {
    /// Zero-initialized profile stamped with `timestamp`.
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            schema_version: CURRENT_PROFILE_SCHEMA,
            perceptual_mode: PerceptualMode::default(),
            cognitive_style: CognitiveStyle::default(),
            social_preference: SocialPreference::default(),
            instruction_style: InstructionStyle::default(),
            assessment_preference: AssessmentPreference::default(),
            cognitive_metrics: CognitiveMetrics::default(),
            behavioral_metrics: BehavioralMetrics::default(),
            learning_metrics: LearningMetrics::default(),
            last_updated: timestamp,
        }
    }

    /// Current value of a text-signal dimension.
    pub fn dimension(&self, dimension: StyleDimension) -> f64 {
        match dimension {
            StyleDimension::Visual => self.perceptual_mode.visual,
            StyleDimension::Auditory => self.perceptual_mode.auditory,
            StyleDimension::ReadingWriting => self.perceptual_mode.reading_writing,
            StyleDimension::Kinesthetic => self.perceptual_mode.kinesthetic,
            StyleDimension::Global => self.cognitive_style.global,
            StyleDimension::Analytical => self.cognitive_style.analytical,
            StyleDimension::Independent => self.social_preference.independent,
            StyleDimension::Collaborative => self.social_preference.collaborative,
            StyleDimension::Formative => self.assessment_preference.formative,
            StyleDimension::Summative => self.assessment_preference.summative,
            StyleDimension::Performance => self.assessment_preference.performance,
        }
    }

    /// Slot in whichever sub-record holds `dimension`.
    pub fn dimension_mut(&mut self, dimension: StyleDimension) -> &mut f64 {
        match dimension {
            StyleDimension::Visual => &mut self.perceptual_mode.visual,
            StyleDimension::Auditory => &mut self.perceptual_mode.auditory,
            StyleDimension::ReadingWriting => &mut self.perceptual_mode.reading_writing,
            StyleDimension::Kinesthetic => &mut self.perceptual_mode.kinesthetic,
            StyleDimension::Global => &mut self.cognitive_style.global,
            StyleDimension::Analytical => &mut self.cognitive_style.analytical,
            StyleDimension::Independent => &mut self.social_preference.independent,
            StyleDimension::Collaborative => &mut self.social_preference.collaborative,
            StyleDimension::Formative => &mut self.assessment_preference.formative,
            StyleDimension::Summative => &mut self.assessment_preference.summative,
            StyleDimension::Performance => &mut self.assessment_preference.performance,
        }
    }

    /// Level with the highest score. Ties resolve to the lower level.
    pub fn current_level(&self) -> Level {
        let mut best = Level::Beginner;
        for level in Level::ALL {
            if self.cognitive_metrics.level(level) > self.cognitive_metrics.level(best) {
                best = level;
            }
        }
        best
    }

    /// Perceptual channel with the highest score. Ties resolve in VARK order.
    pub fn dominant_learning_style(&self) -> StyleDimension {
        let mut best = StyleDimension::Visual;
        for dimension in StyleDimension::PERCEPTUAL {
            if self.dimension(dimension) > self.dimension(best) {
                best = dimension;
            }
        }
        best
    }

    /// Re-applies the `[0, 1]` invariant to every level, rate and score field.
    pub fn clamp_metrics(&mut self) {
        for level in Level::ALL {
            let slot = self.cognitive_metrics.level_mut(level);
            *slot = clamp_unit(*slot);
        }
        self.cognitive_metrics.overall_progress = clamp_unit(self.cognitive_metrics.overall_progress);
        self.behavioral_metrics.session_completion_rate =
            clamp_unit(self.behavioral_metrics.session_completion_rate);
        self.behavioral_metrics.engagement_score =
            clamp_unit(self.behavioral_metrics.engagement_score);
    }
}

impl Default for LearningStyleProfile {
    fn default() -> Self {
        Self::new(Timestamp::now())
    }
}
