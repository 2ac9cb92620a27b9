//! Style dimensions scored from free text, with their keyword lexicons.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the eleven learning-style dimensions a message is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleDimension {
    Visual,
    Auditory,
    ReadingWriting,
    Kinesthetic,
    Global,
    Analytical,
    Independent,
    Collaborative,
    Formative,
    Summative,
    Performance,
}

impl StyleDimension {
    pub const ALL: [StyleDimension; 11] = [
        StyleDimension::Visual,
        StyleDimension::Auditory,
        StyleDimension::ReadingWriting,
        StyleDimension::Kinesthetic,
        StyleDimension::Global,
        StyleDimension::Analytical,
        StyleDimension::Independent,
        StyleDimension::Collaborative,
        StyleDimension::Formative,
        StyleDimension::Summative,
        StyleDimension::Performance,
    ];

    /// The VARK channels stored in `perceptual_mode`.
    pub const PERCEPTUAL: [StyleDimension; 4] = [
        StyleDimension::Visual,
        StyleDimension::Auditory,
        StyleDimension::ReadingWriting,
        StyleDimension::Kinesthetic,
    ];

    /// Substrings that count as evidence for this dimension in a chat message.
    ///
    /// Matching is plain substring search, so "reading" also fires inside
    /// "breading".
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            StyleDimension::Visual => &[
                "see", "look", "picture", "diagram", "graph", "image", "visualize", "draw",
                "color", "observe", "view", "watch", "appear", "show", "visible",
            ],
            StyleDimension::Auditory => &[
                "hear", "sound", "tell", "explain", "discuss", "listen", "speak", "talk",
                "voice", "audio", "noise", "silence", "loud", "quiet",
            ],
            StyleDimension::ReadingWriting => &[
                "read", "write", "note", "text", "book", "document", "list", "word", "essay",
                "paper", "journal", "summary", "definition",
            ],
            StyleDimension::Kinesthetic => &[
                "do", "try", "practice", "experiment", "hands-on", "build", "create", "feel",
                "touch", "move", "action", "physical", "experience",
            ],
            StyleDimension::Global => &[
                "overall", "big picture", "generally", "concept", "broad", "whole", "context",
                "relationship", "connection", "pattern",
            ],
            StyleDimension::Analytical => &[
                "detail", "specific", "step", "analyze", "break down", "precise", "exact",
                "particular", "component", "element",
            ],
            StyleDimension::Independent => &[
                "self", "alone", "individual", "my own", "personally", "independent",
                "autonomy", "self-directed", "private",
            ],
            StyleDimension::Collaborative => &[
                "group", "team", "together", "share", "discuss", "collaborate", "partner",
                "peer", "collective", "community",
            ],
            StyleDimension::Formative => &[
                "feedback", "improve", "progress", "learn from", "guidance", "development",
                "growth", "adjust", "refine",
            ],
            StyleDimension::Summative => &[
                "test", "exam", "final", "grade", "assessment", "evaluation", "measure",
                "score", "performance",
            ],
            StyleDimension::Performance => &[
                "project", "demonstrate", "show", "present", "portfolio", "exhibit", "display",
                "practical", "real-world",
            ],
        }
    }

    /// Short cue list checked against interaction questions.
    ///
    /// Only the perceptual channels have one.
    pub fn question_cues(&self) -> &'static [&'static str] {
        match self {
            StyleDimension::Visual => &["see", "look", "picture", "diagram"],
            StyleDimension::Auditory => &["hear", "sound", "explain"],
            StyleDimension::ReadingWriting => &["read", "write", "note"],
            StyleDimension::Kinesthetic => &["do", "try", "practice"],
            _ => &[],
        }
    }

    /// Phrase-level pattern worth more than a single keyword hit.
    ///
    /// Patterns run against lower-cased text, so the literal `I` in the
    /// auditory and performance patterns never matches.
    pub fn context_pattern(&self) -> &'static str {
        match self {
            StyleDimension::Visual => r"(prefer|like|need)\s+to\s+(see|visualize)",
            StyleDimension::Auditory => r"(better|best)\s+when\s+I\s+(hear|listen)",
            StyleDimension::ReadingWriting => r"(learn|understand)\s+by\s+(reading|writing)",
            StyleDimension::Kinesthetic => r"(learn|work)\s+best\s+with\s+hands[-\s]on",
            StyleDimension::Global => r"(understand|see)\s+the\s+big\s+picture",
            StyleDimension::Analytical => r"(break|break\s+down|analyze)\s+step\s+by\s+step",
            StyleDimension::Independent => r"(prefer|like)\s+to\s+work\s+alone",
            StyleDimension::Collaborative => r"(enjoy|prefer)\s+group\s+work",
            StyleDimension::Formative => r"(want|need)\s+regular\s+feedback",
            StyleDimension::Summative => r"(focus|concerned)\s+about\s+(grades|scores)",
            StyleDimension::Performance => r"(show|demonstrate)\s+what\s+I\s+(know|learned)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleDimension::Visual => "visual",
            StyleDimension::Auditory => "auditory",
            StyleDimension::ReadingWriting => "reading_writing",
            StyleDimension::Kinesthetic => "kinesthetic",
            StyleDimension::Global => "global",
            StyleDimension::Analytical => "analytical",
            StyleDimension::Independent => "independent",
            StyleDimension::Collaborative => "collaborative",
            StyleDimension::Formative => "formative",
            StyleDimension::Summative => "summative",
            StyleDimension::Performance => "performance",
        }
    }
}

impl fmt::Display for StyleDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score per style dimension. Always carries all eleven dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSignals(BTreeMap<StyleDimension, f64>);

impl StyleSignals {
    /// All dimensions at zero.
    pub fn zero() -> Self {
        Self(StyleDimension::ALL.iter().map(|d| (*d, 0.0)).collect())
    }

    pub fn get(&self, dimension: StyleDimension) -> f64 {
        self.0.get(&dimension).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, dimension: StyleDimension, value: f64) {
        self.0.insert(dimension, value);
    }

    pub fn add(&mut self, dimension: StyleDimension, amount: f64) {
        *self.0.entry(dimension).or_insert(0.0) += amount;
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Copy with every score multiplied by `weight`.
    pub fn scaled(&self, weight: f64) -> Self {
        Self(self.0.iter().map(|(d, v)| (*d, v * weight)).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleDimension, f64)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }
}

impl Default for StyleSignals {
    fn default() -> Self {
        Self::zero()
    }
}
