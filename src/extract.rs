//! Boundary between an extractor's loose output and [`EngagementRecord`].
//!
//! Extractors hand over whatever the page showed: counts may be display
//! strings (`"1.2K"`, `"3万"`) or numbers that an upstream bug left negative or
//! non-finite. Everything is normalized here so the scorer only ever sees
//! valid records.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::{self, BufRead};

use crate::normalize::{parse_count, to_count};
use crate::EngagementRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(f64),
    Text(String),
}

impl RawCount {
    pub fn to_count(&self) -> u64 {
        match self {
            RawCount::Number(value) => to_count(*value),
            RawCount::Text(text) => parse_count(Some(text)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPost {
    pub id: Option<String>,
    pub text: Option<String>,
    pub likes: Option<RawCount>,
    pub replies: Option<RawCount>,
    pub reposts: Option<RawCount>,
    pub views: Option<RawCount>,
    pub bookmarks: Option<RawCount>,
    pub has_media: Option<bool>,
    pub has_video: Option<bool>,
    pub has_link: Option<bool>,
    pub is_verified: Option<bool>,
}

impl RawPost {
    pub fn into_record(self) -> EngagementRecord {
        EngagementRecord {
            text: self.text.unwrap_or_default(),
            likes: count_of(&self.likes),
            replies: count_of(&self.replies),
            reposts: count_of(&self.reposts),
            views: count_of(&self.views),
            bookmarks: count_of(&self.bookmarks),
            has_media: self.has_media.unwrap_or(false),
            has_video: self.has_video.unwrap_or(false),
            has_link: self.has_link.unwrap_or(false),
            is_verified: self.is_verified.unwrap_or(false),
        }
    }

    /// Caller-side memoization key: the post id when present, otherwise a
    /// stable hash of the text.
    pub fn post_key(&self) -> String {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!(
                "post_{:x}",
                stable_hash64(self.text.as_deref().unwrap_or_default())
            ),
        }
    }
}

/// Read one JSON post per line. Blank lines are ignored; malformed lines are
/// logged and skipped so the rest of the batch still scores.
pub fn read_posts(reader: impl BufRead) -> io::Result<Vec<RawPost>> {
    let mut posts = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<RawPost>(&line) {
            Ok(post) => posts.push(post),
            Err(err) => tracing::warn!(line = index + 1, %err, "skipping malformed post"),
        }
    }
    Ok(posts)
}

fn count_of(value: &Option<RawCount>) -> u64 {
    value.as_ref().map(RawCount::to_count).unwrap_or(0)
}

fn stable_hash64(value: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
