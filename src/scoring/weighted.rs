use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::ActionProbs;

/// Viewer actions the model knows about. The first eight are estimated from
/// public counts; `NotInterested` and `Report` carry weights but are never
/// estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ReplyWithEngagement,
    Reply,
    ProfileClickEngagement,
    ConversationEngagement,
    Dwell,
    Repost,
    Favorite,
    VideoView,
    NotInterested,
    Report,
}

impl Action {
    pub const ESTIMATED: [Action; 8] = [
        Action::ReplyWithEngagement,
        Action::Reply,
        Action::ProfileClickEngagement,
        Action::ConversationEngagement,
        Action::Dwell,
        Action::Repost,
        Action::Favorite,
        Action::VideoView,
    ];

    pub const ALL: [Action; 10] = [
        Action::ReplyWithEngagement,
        Action::Reply,
        Action::ProfileClickEngagement,
        Action::ConversationEngagement,
        Action::Dwell,
        Action::Repost,
        Action::Favorite,
        Action::VideoView,
        Action::NotInterested,
        Action::Report,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Action::ReplyWithEngagement => "reply_with_engagement",
            Action::Reply => "reply",
            Action::ProfileClickEngagement => "profile_click_engagement",
            Action::ConversationEngagement => "conversation_engagement",
            Action::Dwell => "dwell",
            Action::Repost => "repost",
            Action::Favorite => "favorite",
            Action::VideoView => "video_view",
            Action::NotInterested => "not_interested",
            Action::Report => "report",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        Action::ALL
            .into_iter()
            .find(|action| action.key() == normalized)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionWeights {
    pub reply_with_engagement: f64,
    pub reply: f64,
    pub profile_click_engagement: f64,
    pub conversation_engagement: f64,
    pub dwell: f64,
    pub repost: f64,
    pub favorite: f64,
    pub video_view: f64,
    pub not_interested: f64,
    pub report: f64,
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self {
            reply_with_engagement: 75.0,
            reply: 13.5,
            profile_click_engagement: 12.0,
            conversation_engagement: 11.0,
            dwell: 10.0,
            repost: 1.0,
            favorite: 0.5,
            video_view: 0.005,
            not_interested: -74.0,
            report: -369.0,
        }
    }
}

impl ActionWeights {
    pub fn weight(&self, action: Action) -> f64 {
        match action {
            Action::ReplyWithEngagement => self.reply_with_engagement,
            Action::Reply => self.reply,
            Action::ProfileClickEngagement => self.profile_click_engagement,
            Action::ConversationEngagement => self.conversation_engagement,
            Action::Dwell => self.dwell,
            Action::Repost => self.repost,
            Action::Favorite => self.favorite,
            Action::VideoView => self.video_view,
            Action::NotInterested => self.not_interested,
            Action::Report => self.report,
        }
    }
}

/// One line of the score explanation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdownEntry {
    pub probability: f64,
    pub weight: f64,
    pub contribution: f64,
}

pub type Breakdown = BTreeMap<Action, ScoreBreakdownEntry>;

#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: ActionWeights,
}

impl WeightedScorer {
    pub fn new(weights: ActionWeights) -> Self {
        Self { weights }
    }

    /// Weighted sum over the estimated actions, with the per-action entries
    /// that produced it.
    pub fn score(&self, actions: &ActionProbs) -> (f64, Breakdown) {
        let mut breakdown = Breakdown::new();
        let mut score = 0.0;

        for action in Action::ESTIMATED {
            let probability = actions.get(action);
            let weight = self.weights.weight(action);
            let contribution = probability * weight;
            score += contribution;
            breakdown.insert(
                action,
                ScoreBreakdownEntry {
                    probability,
                    weight,
                    contribution,
                },
            );
        }

        (score, breakdown)
    }
}
