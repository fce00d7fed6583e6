//! Leading-score parsing for evaluator replies
//!
//! Evaluator models are asked to start their reply with a signed digit. The
//! parse is deliberately forgiving: only the leading token is inspected, and
//! anything unparseable scores 0 rather than failing the run.

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use regex::Regex;

fn leading_digit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([+-]?\d)").expect("leading digit regex"))
}

/// Parse an optional sign plus one digit off the front of `text`.
///
/// Returns 0 when the text does not start with a (signed) digit, and 0 when
/// the digit falls outside `range`. Values outside `range` cannot be
/// produced, whatever the rest of the prose claims.
pub fn parse_leading_score(text: &str, range: RangeInclusive<i32>) -> i32 {
    let Some(caps) = leading_digit().captures(text) else {
        return 0;
    };
    let score: i32 = caps[1].parse().unwrap_or(0);
    if range.contains(&score) {
        score
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_lead_parses() {
        assert_eq!(parse_leading_score("+2 because the tone agrees", -3..=3), 2);
        assert_eq!(parse_leading_score("-3: rejects outright", -3..=3), -3);
        assert_eq!(parse_leading_score("0 - no clear stance", -3..=3), 0);
        assert_eq!(parse_leading_score("3, fully endorses", -3..=3), 3);
    }

    #[test]
    fn test_no_leading_digit_defaults_to_zero() {
        assert_eq!(parse_leading_score("I think it's about a 1", -3..=3), 0);
        assert_eq!(parse_leading_score("", -3..=3), 0);
        assert_eq!(parse_leading_score("score: 2", -3..=3), 0);
    }

    #[test]
    fn test_out_of_range_defaults_to_zero() {
        assert_eq!(parse_leading_score("7 out of 10", -3..=3), 0);
        assert_eq!(parse_leading_score("-5 strongly disagree", -3..=3), 0);
    }

    #[test]
    fn test_only_first_digit_is_read() {
        // "12..." reads as 1, "-35..." as -3, matching a one-digit match
        assert_eq!(parse_leading_score("12 is my answer", -3..=3), 1);
        assert_eq!(parse_leading_score("-35 nonsense", -3..=3), -3);
    }

    #[test]
    fn test_never_outside_range() {
        for text in ["+9", "-9", "4", "-4", "+3", "-3"] {
            let score = parse_leading_score(text, -3..=3);
            assert!((-3..=3).contains(&score), "{text} scored {score}");
        }
    }
}
