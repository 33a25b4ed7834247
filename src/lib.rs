pub mod config;
pub mod extract;
pub mod labels;
pub mod normalize;
pub mod scoring;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::scoring::{Breakdown, Scorer};
use crate::text::TextFeatures;

pub use crate::normalize::parse_count;
pub use crate::text::analyze_text;

/// Normalized, publicly visible signals of one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementRecord {
    pub text: String,
    pub likes: u64,
    pub replies: u64,
    pub reposts: u64,
    /// `0` when impressions are not shown.
    pub views: u64,
    pub bookmarks: u64,
    pub has_media: bool,
    pub has_video: bool,
    pub has_link: bool,
    pub is_verified: bool,
}

/// Counts as scored, with the `baseline` and `engagement_rate` actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    pub likes: u64,
    pub replies: u64,
    pub reposts: u64,
    pub views: u64,
    pub bookmarks: u64,
    pub engagement_rate: f64,
    pub baseline: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// `exact_total` rounded to two decimals.
    pub total: f64,
    pub raw_score: f64,
    pub exact_total: f64,
    pub exact_raw_score: f64,
    pub breakdown: Breakdown,
    pub engagement: EngagementSnapshot,
    pub text_features: TextFeatures,
    pub verified_boost_factor: f64,
}

/// Score with the built-in configuration.
pub fn score(record: &EngagementRecord) -> ScoreResult {
    Scorer::default().score(record)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compact count for badges: `1.2K`, `3.4M`, or the plain number below 1000.
pub fn format_compact(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

pub fn format_number(value: u64) -> String {
    let mut chars: Vec<char> = value.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(0.218_246), 0.22);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(1.005_1), 1.01);
    }

    #[test]
    fn formats_counts() {
        assert_eq!(format_compact(999), "999");
        assert_eq!(format_compact(1_200), "1.2K");
        assert_eq!(format_compact(3_400_000), "3.4M");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_percent(0.0057), "0.57%");
    }
}
