use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative band for a score. Shared with the external critique contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreLabel {
    NeedsImprovement,
    Developing,
    Strong,
    Excellent,
}

impl ScoreLabel {
    /// Inclusive lower bounds, checked from the top band down.
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => ScoreLabel::Excellent,
            70..=84 => ScoreLabel::Strong,
            50..=69 => ScoreLabel::Developing,
            _ => ScoreLabel::NeedsImprovement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "excellent",
            ScoreLabel::Strong => "strong",
            ScoreLabel::Developing => "developing",
            ScoreLabel::NeedsImprovement => "needs-improvement",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "Interview ready",
            ScoreLabel::Strong => "Very good",
            ScoreLabel::Developing => "Taking shape",
            ScoreLabel::NeedsImprovement => "Getting started",
        }
    }

    pub fn tone(&self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "Every point the interviewer wants to hear is there.",
            ScoreLabel::Strong => {
                "The essentials are solid. A few more details would make it complete."
            }
            ScoreLabel::Developing => {
                "The structure is in place; add more examples and evidence."
            }
            ScoreLabel::NeedsImprovement => {
                "Bring out the key points and your own experience more clearly."
            }
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
