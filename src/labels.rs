//! Display text for actions, keyed by locale with per-action overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Locale::En),
            "ja" | "jp" | "japanese" => Some(Locale::Ja),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub locale: Locale,
    /// Action key (`reply`, `dwell`, ...) to label. Unknown keys never match
    /// an action; see [`LabelConfig::unknown_override_keys`].
    pub overrides: BTreeMap<String, String>,
}

impl LabelConfig {
    pub fn label(&self, action: Action) -> &str {
        self.overrides
            .iter()
            .find(|(key, _)| Action::from_key(key) == Some(action))
            .map(|(_, label)| label.as_str())
            .unwrap_or_else(|| builtin_label(self.locale, action))
    }

    pub fn unknown_override_keys(&self) -> Vec<&str> {
        self.overrides
            .keys()
            .map(String::as_str)
            .filter(|key| Action::from_key(key).is_none())
            .collect()
    }
}

fn builtin_label(locale: Locale, action: Action) -> &'static str {
    match locale {
        Locale::En => match action {
            Action::ReplyWithEngagement => "Reply engaged by author",
            Action::Reply => "Reply",
            Action::ProfileClickEngagement => "Profile click",
            Action::ConversationEngagement => "Conversation",
            Action::Dwell => "Dwell",
            Action::Repost => "Repost",
            Action::Favorite => "Like",
            Action::VideoView => "Video view",
            Action::NotInterested => "Not interested",
            Action::Report => "Report",
        },
        Locale::Ja => match action {
            Action::ReplyWithEngagement => "返信への反応",
            Action::Reply => "返信",
            Action::ProfileClickEngagement => "プロフィール閲覧",
            Action::ConversationEngagement => "会話参加",
            Action::Dwell => "滞在",
            Action::Repost => "リポスト",
            Action::Favorite => "いいね",
            Action::VideoView => "動画視聴",
            Action::NotInterested => "興味なし",
            Action::Report => "報告",
        },
    }
}
