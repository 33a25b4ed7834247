use std::cmp::Ordering;

use crate::config::ScoringConfig;
use crate::scoring::{ActionEstimator, ScoreTier, TierThresholds, VerifiedBooster, WeightedScorer};
use crate::text::analyze_text;
use crate::{round2, EngagementRecord, EngagementSnapshot, ScoreResult};

/// Stateless scorer: every call derives a fresh [`ScoreResult`] from the
/// record and the configuration captured at construction.
#[derive(Debug, Clone)]
pub struct Scorer {
    estimator: ActionEstimator,
    weighted_scorer: WeightedScorer,
    booster: VerifiedBooster,
    tiers: TierThresholds,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            estimator: ActionEstimator::new(config.estimator.clone()),
            weighted_scorer: WeightedScorer::new(config.weights.clone()),
            booster: VerifiedBooster::new(config.boost.clone()),
            tiers: config.tiers.clone(),
        }
    }

    pub fn score(&self, record: &EngagementRecord) -> ScoreResult {
        let text_features = analyze_text(&record.text);
        let engagement_rate = self.estimator.engagement_rate(record);
        let baseline = self.estimator.baseline(record);

        let actions = self.estimator.estimate(record, &text_features);
        let (raw_score, breakdown) = self.weighted_scorer.score(&actions);

        let verified_boost_factor = self.booster.factor(record.is_verified);
        let total = raw_score * verified_boost_factor;

        tracing::debug!(
            raw_score,
            total,
            baseline,
            engagement_rate,
            verified_boost_factor,
            "scored post"
        );

        ScoreResult {
            total: round2(total),
            raw_score: round2(raw_score),
            exact_total: total,
            exact_raw_score: raw_score,
            breakdown,
            engagement: EngagementSnapshot {
                likes: record.likes,
                replies: record.replies,
                reposts: record.reposts,
                views: record.views,
                bookmarks: record.bookmarks,
                engagement_rate,
                baseline,
            },
            text_features,
            verified_boost_factor,
        }
    }

    pub fn classify(&self, result: &ScoreResult) -> ScoreTier {
        self.tiers.classify(result.total)
    }

    /// Score every record and return `(input index, result)` pairs ordered by
    /// total, highest first. Ties keep input order.
    pub fn rank(&self, records: &[EngagementRecord]) -> Vec<(usize, ScoreResult)> {
        let mut scored: Vec<(usize, ScoreResult)> = records
            .iter()
            .enumerate()
            .map(|(index, record)| (index, self.score(record)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.exact_total
                .partial_cmp(&a.1.exact_total)
                .unwrap_or(Ordering::Equal)
        });

        scored
    }
}
