//! Raw model-answer normalization.
//!
//! Free-text answers from remote models arrive wrapped in a response
//! envelope and buried in prose ("I believe it was 2009."). These helpers
//! strip the envelope and pull out the year/number/token candidates the
//! validator scores. Extraction never fails: when nothing matches, the input
//! text is handed back unchanged and the validator marks it invalid.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CoreError;

/// Characters of the upstream response envelope before the answer text.
///
/// The inference API returns `[{"generated_text": "…"}]`-shaped payloads;
/// when a caller stores the serialized payload instead of the unwrapped
/// answer, these two constants describe the framing to cut away. They encode
/// an assumption about that exact format and nothing validates it beyond the
/// length check.
pub const WRAPPER_PREFIX_LEN: usize = 6;
/// Characters of the envelope after the answer text.
pub const WRAPPER_SUFFIX_LEN: usize = 4;

static FOUR_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[1-3][0-9]{3}").expect("static pattern"));
static THREE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{3}").expect("static pattern"));
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("static pattern"));

/// Cut the response envelope off a raw answer and lowercase the rest.
///
/// Fails when the input is shorter than the envelope itself: a short answer
/// here means the caller handed over something that never carried the
/// envelope, and truncating it would silently corrupt the record.
pub fn strip_wrapper(raw: &str) -> Result<String, CoreError> {
    let chars: Vec<char> = raw.chars().collect();
    let need = WRAPPER_PREFIX_LEN + WRAPPER_SUFFIX_LEN;
    if chars.len() < need {
        return Err(CoreError::AnswerTooShort {
            len: chars.len(),
            need,
        });
    }
    Ok(chars[WRAPPER_PREFIX_LEN..chars.len() - WRAPPER_SUFFIX_LEN]
        .iter()
        .collect::<String>()
        .to_lowercase())
}

/// First year-looking substring: a 4-digit run starting 1-3, then any
/// 3-digit run, then the input unchanged.
pub fn extract_year(text: &str) -> String {
    if let Some(m) = FOUR_DIGIT_YEAR.find(text) {
        return m.as_str().to_string();
    }
    if let Some(m) = THREE_DIGITS.find(text) {
        return m.as_str().to_string();
    }
    text.to_string()
}

/// All 4-digit years in textual order when there are exactly two; otherwise
/// a singleton carrying the input, which the validator reads as "not a pair".
pub fn extract_two_years(text: &str) -> Vec<String> {
    let matches: Vec<String> = FOUR_DIGIT_YEAR
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    if matches.len() == 2 {
        matches
    } else {
        vec![text.to_string()]
    }
}

/// First run of digits, if any.
pub fn extract_number(text: &str) -> Option<String> {
    DIGIT_RUN.find(text).map(|m| m.as_str().to_string())
}

/// Whether the text contains any digits.
pub fn has_digits(text: &str) -> bool {
    DIGIT_RUN.is_match(text)
}

/// Whether the text can be read as a duration: digits, or English number
/// words.
pub fn has_duration(text: &str) -> bool {
    has_digits(text) || words_to_number(text).is_some()
}

/// Derive an integer duration from a validated answer.
///
/// Number words win over digits ("three" beats a stray "3rd"); `None` for
/// answers already flagged invalid or where nothing numeric can be read.
pub fn extract_duration(text: &str, is_valid: bool) -> Option<i64> {
    if !is_valid {
        return None;
    }
    if let Some(n) = words_to_number(text) {
        return Some(n);
    }
    extract_number(text).and_then(|digits| digits.parse().ok())
}

/// Parse English number words: "three", "twenty five", "one hundred and
/// four". Returns `None` when no number word occurs in the text.
///
/// Scales up to thousands; that covers any year count a temporal fact can
/// produce.
pub fn words_to_number(text: &str) -> Option<i64> {
    let mut total: i64 = 0;
    let mut current: i64 = 0;
    let mut seen_any = false;

    for word in text
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
        .filter(|w| !w.is_empty())
    {
        if let Some(units) = unit_value(word) {
            current += units;
            seen_any = true;
        } else if word == "hundred" {
            if current == 0 {
                current = 1;
            }
            current *= 100;
            seen_any = true;
        } else if word == "thousand" {
            if current == 0 {
                current = 1;
            }
            total += current * 1000;
            current = 0;
            seen_any = true;
        } else if word == "and" && seen_any {
            continue;
        } else if seen_any {
            // Number phrase ended; ignore trailing prose.
            break;
        }
    }

    if seen_any {
        Some(total + current)
    } else {
        None
    }
}

fn unit_value(word: &str) -> Option<i64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_wrapper_cuts_envelope_and_lowercases() {
        // 6-char prefix, 4-char suffix around the payload.
        let raw = "ABCDEFThe Answer Is 2009WXYZ";
        assert_eq!(strip_wrapper(raw).unwrap(), "the answer is 2009");
    }

    #[test]
    fn strip_wrapper_fails_loudly_on_short_input() {
        let err = strip_wrapper("2009").unwrap_err();
        assert!(err.to_string().contains("shorter"));
    }

    #[test]
    fn extract_year_finds_four_digit_year() {
        assert_eq!(extract_year("the event happened in 1999 or so"), "1999");
        assert_eq!(extract_year("maybe 2010, maybe 2012"), "2010");
    }

    #[test]
    fn extract_year_falls_back_to_three_digits() {
        assert_eq!(extract_year("in the year 987 AD"), "987");
    }

    #[test]
    fn extract_year_identity_fallback() {
        assert_eq!(extract_year("no year here"), "no year here");
    }

    #[test]
    fn extract_year_ignores_out_of_range_leading_digit() {
        // 4xxx is not a plausible year; the 3-digit fallback fires instead.
        assert_eq!(extract_year("code 4532"), "453");
    }

    #[test]
    fn extract_two_years_pair_in_textual_order() {
        assert_eq!(
            extract_two_years("from 2009 until 2017"),
            vec!["2009".to_string(), "2017".to_string()]
        );
    }

    #[test]
    fn extract_two_years_singleton_when_not_exactly_two() {
        assert_eq!(extract_two_years("just 2009"), vec!["just 2009".to_string()]);
        assert_eq!(
            extract_two_years("2009 2010 2011"),
            vec!["2009 2010 2011".to_string()]
        );
    }

    #[test]
    fn extract_number_first_digit_run() {
        assert_eq!(extract_number("about 12 years"), Some("12".to_string()));
        assert_eq!(extract_number("none"), None);
    }

    #[test]
    fn words_to_number_basic() {
        assert_eq!(words_to_number("three"), Some(3));
        assert_eq!(words_to_number("twenty five"), Some(25));
        assert_eq!(words_to_number("twenty-five"), Some(25));
        assert_eq!(words_to_number("one hundred and four"), Some(104));
        assert_eq!(words_to_number("two thousand nine"), Some(2009));
        assert_eq!(words_to_number("for eight years"), Some(8));
        assert_eq!(words_to_number("no numbers at all"), None);
    }

    #[test]
    fn has_duration_accepts_digits_or_words() {
        assert!(has_duration("8 years"));
        assert!(has_duration("eight years"));
        assert!(!has_duration("a while"));
    }

    #[test]
    fn extract_duration_prefers_words() {
        assert_eq!(extract_duration("three", true), Some(3));
        assert_eq!(extract_duration("12 years", true), Some(12));
        assert_eq!(extract_duration("three", false), None);
        assert_eq!(extract_duration("gibberish", true), None);
    }
}
