use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ScoreTier {
    /// Classify with the default thresholds.
    pub fn classify(total: f64) -> Self {
        TierThresholds::default().classify(total)
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Low => "Low",
            ScoreTier::Medium => "Medium",
            ScoreTier::High => "High",
            ScoreTier::VeryHigh => "Very High",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreTier::Low => "score-low",
            ScoreTier::Medium => "score-medium",
            ScoreTier::High => "score-high",
            ScoreTier::VeryHigh => "score-very-high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub very_high: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            very_high: 5.0,
            high: 2.0,
            medium: 0.5,
        }
    }
}

impl TierThresholds {
    pub fn classify(&self, total: f64) -> ScoreTier {
        if total >= self.very_high {
            ScoreTier::VeryHigh
        } else if total >= self.high {
            ScoreTier::High
        } else if total >= self.medium {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}
