//! Temporal aggregation of per-message style signals into a profile.

use crate::domain::foundation::Timestamp;

use super::dimensions::{StyleDimension, StyleSignals};
use super::profile::LearningStyleProfile;
use super::signals::score_message;

/// EMA smoothing factor applied across the weighted message sequence.
pub const EMA_ALPHA: f64 = 0.7;

/// Recency weight for message `index` of `count`: 0.5 oldest, 1.0 newest.
///
/// A single message gets 0.5.
pub fn temporal_weight(index: usize, count: usize) -> f64 {
    let span = count.saturating_sub(1).max(1) as f64;
    0.5 + 0.5 * (index as f64 / span)
}

/// Recency-weighted, EMA-smoothed signals for a chat history.
///
/// Returns `None` for an empty history.
pub fn aggregate_signals<S: AsRef<str>>(chat_history: &[S]) -> Option<StyleSignals> {
    let count = chat_history.len();
    let mut weighted = chat_history
        .iter()
        .enumerate()
        .map(|(index, message)| score_message(message.as_ref()).scaled(temporal_weight(index, count)));

    let mut ema = weighted.next()?;
    for signals in weighted {
        for dimension in StyleDimension::ALL {
            let smoothed = EMA_ALPHA * signals.get(dimension) + (1.0 - EMA_ALPHA) * ema.get(dimension);
            ema.set(dimension, smoothed);
        }
    }
    Some(ema)
}

/// Builds a learning-style profile from an ordered chat history.
///
/// Empty input yields a zero-initialized profile. Only the style
/// sub-records are written; metrics stay at their defaults.
pub fn extract_learning_styles<S: AsRef<str>>(chat_history: &[S]) -> LearningStyleProfile {
    let mut profile = LearningStyleProfile::new(Timestamp::now());
    if let Some(signals) = aggregate_signals(chat_history) {
        for (dimension, value) in signals.iter() {
            *profile.dimension_mut(dimension) = value;
        }
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn three_message_weights_are_half_three_quarters_one() {
        assert_eq!(temporal_weight(0, 3), 0.5);
        assert_eq!(temporal_weight(1, 3), 0.75);
        assert_eq!(temporal_weight(2, 3), 1.0);
    }

    #[test]
    fn single_message_weight_is_half() {
        assert_eq!(temporal_weight(0, 1), 0.5);
    }

    #[test]
    fn empty_history_yields_zero_profile() {
        let history: Vec<String> = Vec::new();
        assert!(aggregate_signals(&history).is_none());

        let profile = extract_learning_styles(&history);
        for dimension in StyleDimension::ALL {
            assert_eq!(profile.dimension(dimension), 0.0);
        }
    }

    #[test]
    fn single_message_is_scaled_by_half() {
        let profile = extract_learning_styles(&["diagram"]);
        assert!(approx(profile.perceptual_mode.visual, 0.5));
    }

    #[test]
    fn ema_favours_recent_messages() {
        // visual (weight 0.5) then auditory (weight 1.0)
        let profile = extract_learning_styles(&["diagram", "hear"]);
        // visual: 0.7 * 0 + 0.3 * 0.5
        assert!(approx(profile.perceptual_mode.visual, 0.15));
        // auditory: 0.7 * 1.0 + 0.3 * 0
        assert!(approx(profile.perceptual_mode.auditory, 0.7));
        assert_eq!(profile.dominant_learning_style(), StyleDimension::Auditory);
    }

    #[test]
    fn styles_land_in_their_sub_records() {
        let profile = extract_learning_styles(&["we enjoy group work together"]);
        assert!(profile.social_preference.collaborative > 0.0);
        assert_eq!(profile.instruction_style.direct, 0.0);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let history = ["I like to see diagrams", "can we practice", "step by step please"];
        let first = aggregate_signals(&history);
        let second = aggregate_signals(&history);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn aggregated_values_stay_in_unit_interval(history in proptest::collection::vec(".{0,80}", 1..8)) {
            let signals = aggregate_signals(&history).unwrap();
            for (_, value) in signals.iter() {
                prop_assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}
