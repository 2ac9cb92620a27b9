//! Keyword heuristics scoring a question/response pair.

use super::interaction::{InteractionEvaluation, LlmInteraction};
use super::profile::clamp_unit;

/// Question words and the depth each one signals. Weights are additive.
const DEPTH_INDICATORS: [(&str, f64); 6] = [
    ("what", 0.3),
    ("how", 0.6),
    ("why", 0.8),
    ("compare", 0.7),
    ("analyze", 0.8),
    ("evaluate", 0.9),
];

const EXPLANATION_MARKERS: [&str; 2] = ["because", "therefore"];
const COMPREHENSION_BONUS: f64 = 0.5;

const CRITICAL_INDICATORS: [&str; 4] = ["however", "although", "on the other hand", "alternatively"];
const CRITICAL_BONUS: f64 = 0.3;

/// Response length at which engagement saturates.
const ENGAGEMENT_WORD_CAP: f64 = 100.0;

/// Scores an interaction. Never fails; every output is clamped to `[0, 1]`.
///
/// Critical thinking counts each distinct indicator phrase once, so a
/// response repeating "however" still earns a single bonus.
pub fn evaluate(interaction: &LlmInteraction) -> InteractionEvaluation {
    let question = interaction.question.to_lowercase();
    let response = interaction.response.to_lowercase();

    let depth: f64 = DEPTH_INDICATORS
        .iter()
        .filter(|(indicator, _)| question.contains(indicator))
        .map(|(_, weight)| weight)
        .sum();

    let comprehension = if EXPLANATION_MARKERS.iter().any(|m| response.contains(m)) {
        COMPREHENSION_BONUS
    } else {
        0.0
    };

    let critical_thinking = CRITICAL_INDICATORS
        .iter()
        .filter(|indicator| response.contains(*indicator))
        .count() as f64
        * CRITICAL_BONUS;

    let words = response.split_whitespace().count() as f64;
    let engagement = words / ENGAGEMENT_WORD_CAP;

    InteractionEvaluation {
        comprehension: clamp_unit(comprehension),
        depth: clamp_unit(depth),
        engagement: clamp_unit(engagement),
        critical_thinking: clamp_unit(critical_thinking),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::learning::interaction::InteractionType;
    use proptest::prelude::*;

    fn interaction(question: &str, response: &str) -> LlmInteraction {
        LlmInteraction::new(question, response, InteractionType::Chat)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn why_question_with_explanation_and_contrast() {
        let evaluation = evaluate(&interaction(
            "Why does this work?",
            "Because the force balances, however gravity pulls down.",
        ));

        assert!(approx(evaluation.depth, 0.8));
        assert!(approx(evaluation.comprehension, 0.5));
        assert!(approx(evaluation.critical_thinking, 0.3));
        assert!(approx(evaluation.engagement, 0.08));
    }

    #[test]
    fn depth_weights_add_and_clamp() {
        // what (0.3) + how (0.6)
        let evaluation = evaluate(&interaction("What and how?", ""));
        assert!(approx(evaluation.depth, 0.9));

        let evaluation = evaluate(&interaction("Why, how and what? compare and evaluate", ""));
        assert_eq!(evaluation.depth, 1.0);
    }

    #[test]
    fn repeated_critical_phrase_counts_once() {
        let response = "however ".repeat(100);
        let evaluation = evaluate(&interaction("", &response));
        assert!(approx(evaluation.critical_thinking, 0.3));
        assert_eq!(evaluation.engagement, 1.0);
    }

    #[test]
    fn distinct_critical_phrases_stack_and_clamp() {
        let evaluation = evaluate(&interaction(
            "",
            "however, although, on the other hand, alternatively",
        ));
        assert_eq!(evaluation.critical_thinking, 1.0);
    }

    #[test]
    fn empty_interaction_scores_zero() {
        let evaluation = evaluate(&interaction("", ""));
        assert_eq!(evaluation, InteractionEvaluation::default());
    }

    proptest! {
        #[test]
        fn every_field_is_clamped(question in ".{0,120}", response in ".{0,400}") {
            let evaluation = evaluate(&interaction(&question, &response));
            for value in [
                evaluation.comprehension,
                evaluation.depth,
                evaluation.engagement,
                evaluation.critical_thinking,
            ] {
                prop_assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}
