//! Parsing of human-formatted engagement counts.
//!
//! Counts scraped from a timeline come in many shapes: `"1.2K"`, `"3,400"`,
//! `"1万"`, `"２.５億"`, or a number buried in an accessibility label such as
//! `"1,234 Likes. Like"`. [`parse_count`] folds all of them into a plain
//! non-negative integer and never fails.

use regex::Regex;
use std::sync::OnceLock;

/// Japanese magnitude units, checked in this order. The first unit found wins.
const JAPANESE_UNITS: [(char, f64); 3] = [('億', 1e8), ('万', 1e4), ('千', 1e3)];

/// Parse a human-formatted count into a non-negative integer.
///
/// `None`, empty and unparseable input map to `0`.
pub fn parse_count(text: Option<&str>) -> u64 {
    let Some(text) = text else {
        return 0;
    };
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return 0;
    }
    to_count(parse_magnitude(&cleaned))
}

/// Round a parsed value to a count. Non-finite and negative values become `0`.
pub(crate) fn to_count(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

fn parse_magnitude(text: &str) -> f64 {
    for (unit, multiplier) in JAPANESE_UNITS {
        if text.contains(unit) {
            let stripped: String = text.chars().filter(|ch| *ch != unit).collect();
            return parse_float_prefix(&stripped) * multiplier;
        }
    }

    if let Some(captures) = suffix_pattern().captures(text) {
        let number = captures[1].parse::<f64>().unwrap_or(f64::NAN);
        let multiplier = match &captures[2] {
            "K" | "k" => 1e3,
            "M" | "m" => 1e6,
            _ => 1e9,
        };
        return number * multiplier;
    }

    parse_float_prefix(text)
}

fn clean(text: &str) -> String {
    let folded: String = text
        .chars()
        .filter(|ch| !matches!(ch, ',' | '，') && !is_invisible(*ch))
        .map(fold_fullwidth)
        .collect();
    folded.trim().to_string()
}

fn is_invisible(ch: char) -> bool {
    matches!(
        ch,
        '\u{0000}'..='\u{001F}'
            | '\u{007F}'..='\u{009F}'
            | '\u{200B}'..='\u{200F}'
            | '\u{2060}'
            | '\u{FEFF}'
    )
}

fn fold_fullwidth(ch: char) -> char {
    match ch {
        '０'..='９' => char::from_u32(ch as u32 - '０' as u32 + '0' as u32).unwrap_or(ch),
        '．' => '.',
        _ => ch,
    }
}

/// Leading-number parse: optional sign, digits with an optional fraction and
/// exponent. Anything after the number is ignored; no number yields NaN.
fn parse_float_prefix(text: &str) -> f64 {
    float_prefix_pattern()
        .find(text.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)?)([KkMmGg])$").expect("valid suffix pattern")
    })
}

fn float_prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float pattern")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_prefix_ignores_trailing_text() {
        assert_eq!(parse_float_prefix("1234 Likes. Like"), 1234.0);
        assert_eq!(parse_float_prefix("  .5x"), 0.5);
        assert_eq!(parse_float_prefix("2e3 views"), 2000.0);
    }

    #[test]
    fn float_prefix_without_number_is_nan() {
        assert!(parse_float_prefix("Like").is_nan());
        assert!(parse_float_prefix("Infinity").is_nan());
    }

    #[test]
    fn clean_strips_invisible_characters() {
        assert_eq!(clean("\u{200B}1,2\u{FEFF}34\u{0007}"), "1234");
        assert_eq!(clean("２．５"), "2.5");
    }

    #[test]
    fn to_count_rejects_non_finite_and_negative() {
        assert_eq!(to_count(f64::INFINITY), 0);
        assert_eq!(to_count(f64::NAN), 0);
        assert_eq!(to_count(-3.0), 0);
        assert_eq!(to_count(2.5), 3);
    }
}
