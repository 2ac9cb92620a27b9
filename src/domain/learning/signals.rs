//! Text signal extraction: scores one chat message against the style dimensions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dimensions::{StyleDimension, StyleSignals};

/// Raw score added per keyword found in the message.
pub const KEYWORD_WEIGHT: f64 = 0.2;

/// Raw score added when a dimension's context pattern matches.
pub const CONTEXT_WEIGHT: f64 = 0.4;

const NORMALIZATION_EPSILON: f64 = 1e-10;

static CONTEXT_PATTERNS: Lazy<Vec<(StyleDimension, Regex)>> = Lazy::new(|| {
    StyleDimension::ALL
        .iter()
        .map(|dimension| {
            let pattern = Regex::new(dimension.context_pattern())
                .expect("context patterns are static and valid");
            (*dimension, pattern)
        })
        .collect()
});

/// Emphasis constructions; the captured word is checked against every lexicon.
static EMPHASIS_PATTERNS: Lazy<Vec<(Regex, f64)>> = Lazy::new(|| {
    [
        (r"really\s+(\w+)", 0.3),
        (r"definitely\s+(\w+)", 0.3),
        (r"always\s+(\w+)", 0.3),
        (r"prefer\s+(\w+)", 0.4),
    ]
    .into_iter()
    .map(|(pattern, bonus)| {
        (
            Regex::new(pattern).expect("emphasis patterns are static and valid"),
            bonus,
        )
    })
    .collect()
});

/// Scores a single message against all eleven style dimensions.
///
/// Raw evidence is accumulated from keyword hits, context phrases and
/// emphasised words, then divided by the total so the result reads like a
/// distribution. Each value is capped at 1.0. Text with no evidence yields
/// all zeros; this never fails on any input.
pub fn score_message(message: &str) -> StyleSignals {
    let text = message.to_lowercase();
    let mut raw = StyleSignals::zero();

    for dimension in StyleDimension::ALL {
        for keyword in dimension.keywords() {
            if text.contains(keyword) {
                raw.add(dimension, KEYWORD_WEIGHT);
            }
        }
    }

    for (dimension, pattern) in CONTEXT_PATTERNS.iter() {
        if pattern.is_match(&text) {
            raw.add(*dimension, CONTEXT_WEIGHT);
        }
    }

    for (pattern, bonus) in EMPHASIS_PATTERNS.iter() {
        for captures in pattern.captures_iter(&text) {
            let Some(word) = captures.get(1) else {
                continue;
            };
            let word = word.as_str();
            for dimension in StyleDimension::ALL {
                if dimension.keywords().iter().any(|keyword| word.contains(keyword)) {
                    raw.add(dimension, *bonus);
                }
            }
        }
    }

    normalize(&raw)
}

fn normalize(raw: &StyleSignals) -> StyleSignals {
    let total = raw.total() + NORMALIZATION_EPSILON;
    let mut normalized = StyleSignals::zero();
    for (dimension, value) in raw.iter() {
        normalized.set(dimension, (value / total).min(1.0));
    }
    normalized
}
