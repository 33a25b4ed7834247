use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const POSITIVE_WORDS: [&str; 25] = [
    "good", "great", "awesome", "love", "best", "amazing", "happy", "excellent", "beautiful",
    "wonderful", "fantastic", "brilliant", "すごい", "嬉しい", "楽しい", "最高", "素晴らしい",
    "ありがとう", "感謝", "好き", "大好き", "面白い", "笑", "www", "草",
];

const NEGATIVE_WORDS: [&str; 17] = [
    "bad", "hate", "worst", "terrible", "awful", "horrible", "sad", "angry", "poor",
    "disappointing", "嫌い", "最悪", "つらい", "悲しい", "怒り", "ひどい", "残念",
];

/// Features derived from post text. `length` counts Unicode scalar values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub length: usize,
    pub word_count: usize,
    pub hashtag_count: usize,
    pub mention_count: usize,
    pub url_count: usize,
    pub emoji_count: usize,
    pub has_question: bool,
    pub has_exclamation: bool,
    pub line_break_count: usize,
    pub sentiment: f64,
}

pub fn analyze_text(text: &str) -> TextFeatures {
    let mut length = 0usize;
    let mut emoji_count = 0usize;
    let mut line_break_count = 0usize;
    let mut has_question = false;
    let mut has_exclamation = false;

    for ch in text.chars() {
        length += 1;
        match ch {
            '\n' => line_break_count += 1,
            '?' | '？' => has_question = true,
            '!' | '！' => has_exclamation = true,
            _ => {
                if is_emoji(ch) {
                    emoji_count += 1;
                }
            }
        }
    }

    TextFeatures {
        length,
        word_count: text.split_whitespace().count(),
        hashtag_count: hashtag_pattern().find_iter(text).count(),
        mention_count: mention_pattern().find_iter(text).count(),
        url_count: url_pattern().find_iter(text).count(),
        emoji_count,
        has_question,
        has_exclamation,
        line_break_count,
        sentiment: sentiment_score(text),
    }
}

/// Lexicon sentiment in `[-1, 1]`: each positive entry present adds 0.1, each
/// negative entry subtracts 0.1. Entries are matched as substrings.
pub fn sentiment_score(text: &str) -> f64 {
    let lowercase = text.to_lowercase();
    let positive = POSITIVE_WORDS
        .iter()
        .filter(|word| lowercase.contains(*word))
        .count();
    let negative = NEGATIVE_WORDS
        .iter()
        .filter(|word| lowercase.contains(*word))
        .count();
    let score = (positive as f64 - negative as f64) * 0.1;
    score.clamp(-1.0, 1.0)
}

fn is_emoji(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1F600..=0x1F64F
            | 0x1F300..=0x1F5FF
            | 0x1F680..=0x1F6FF
            | 0x1F1E0..=0x1F1FF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF
    )
}

fn hashtag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"#[0-9A-Za-z_\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FFF}]+")
            .expect("valid hashtag pattern")
    })
}

fn mention_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@[0-9A-Za-z_]+").expect("valid mention pattern"))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://\S+").expect("valid url pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_ranges_cover_pictographs_and_dingbats() {
        assert!(is_emoji('😀'));
        assert!(is_emoji('🚀'));
        assert!(is_emoji('☀'));
        assert!(is_emoji('✂'));
        assert!(!is_emoji('a'));
        assert!(!is_emoji('あ'));
    }

    #[test]
    fn sentiment_is_clamped() {
        let text = POSITIVE_WORDS.join(" ");
        assert_eq!(sentiment_score(&text), 1.0);
        assert_eq!(sentiment_score(""), 0.0);
    }
}
