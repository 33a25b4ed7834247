pub mod boost;
pub mod estimator;
pub mod pipeline;
pub mod tier;
pub mod weighted;

pub use boost::{AudienceNetwork, VerifiedBoostConfig, VerifiedBooster};
pub use estimator::{ActionEstimator, ActionProbs, EstimatorConfig};
pub use pipeline::Scorer;
pub use tier::{ScoreTier, TierThresholds};
pub use weighted::{Action, ActionWeights, Breakdown, ScoreBreakdownEntry, WeightedScorer};
