use serde::{Deserialize, Serialize};

use crate::scoring::Action;
use crate::text::TextFeatures;
use crate::EngagementRecord;

/// Ratios used to turn public counts into per-impression probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Minimum impression count assumed for every post.
    pub baseline_floor: u64,
    /// Text length treated as one full read.
    pub dwell_reference_length: f64,
    pub dwell_rate_scale: f64,
    /// Share of replies that draw a further reaction from the author.
    pub reply_engagement_ratio: f64,
    pub conversation_ratio: f64,
    pub video_view_ratio: f64,
    pub profile_click_ratio: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            baseline_floor: 1_000,
            dwell_reference_length: 280.0,
            dwell_rate_scale: 10.0,
            reply_engagement_ratio: 0.1,
            conversation_ratio: 0.05,
            video_view_ratio: 0.3,
            profile_click_ratio: 0.02,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionProbs {
    pub reply_with_engagement: f64,
    pub reply: f64,
    pub profile_click_engagement: f64,
    pub conversation_engagement: f64,
    pub dwell: f64,
    pub repost: f64,
    pub favorite: f64,
    pub video_view: f64,
}

impl ActionProbs {
    /// Probability for `action`; negative actions are never estimated.
    pub fn get(&self, action: Action) -> f64 {
        match action {
            Action::ReplyWithEngagement => self.reply_with_engagement,
            Action::Reply => self.reply,
            Action::ProfileClickEngagement => self.profile_click_engagement,
            Action::ConversationEngagement => self.conversation_engagement,
            Action::Dwell => self.dwell,
            Action::Repost => self.repost,
            Action::Favorite => self.favorite,
            Action::VideoView => self.video_view,
            Action::NotInterested | Action::Report => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionEstimator {
    config: EstimatorConfig,
}

impl ActionEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// `(likes + replies + reposts) / views`, or 0 when views are unknown.
    pub fn engagement_rate(&self, record: &EngagementRecord) -> f64 {
        if record.views == 0 {
            return 0.0;
        }
        let engaged = record
            .likes
            .saturating_add(record.replies)
            .saturating_add(record.reposts);
        engaged as f64 / record.views as f64
    }

    pub fn baseline(&self, record: &EngagementRecord) -> f64 {
        record.views.max(self.config.baseline_floor).max(1) as f64
    }

    pub fn estimate(&self, record: &EngagementRecord, features: &TextFeatures) -> ActionProbs {
        let config = &self.config;
        let baseline = self.baseline(record);
        let engagement_rate = self.engagement_rate(record);
        let likes = record.likes as f64;
        let replies = record.replies as f64;

        let dwell_reference = if config.dwell_reference_length > 0.0 {
            config.dwell_reference_length
        } else {
            1.0
        };

        let video_view = if record.has_video {
            clamp01(record.views as f64 * config.video_view_ratio / baseline)
        } else {
            0.0
        };

        ActionProbs {
            favorite: clamp01(likes / baseline),
            reply: clamp01(replies / baseline),
            repost: clamp01(record.reposts as f64 / baseline),
            reply_with_engagement: clamp01(replies * config.reply_engagement_ratio / baseline),
            conversation_engagement: clamp01(replies * config.conversation_ratio / baseline),
            dwell: clamp01(
                (features.length as f64 / dwell_reference)
                    * (engagement_rate * config.dwell_rate_scale),
            ),
            video_view,
            profile_click_engagement: clamp01(likes * config.profile_click_ratio / baseline),
        }
    }
}

fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}
