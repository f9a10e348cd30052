//! Raw score values and the numeric policy applied to them.
//!
//! Scores are stored exactly as entered (a number or free text). Two named
//! readings exist and every consumer goes through one of them:
//!
//! - [`Score::lenient`] ("parse or 0") feeds totals, trend values, the radar
//!   profile, and goal progress.
//! - [`Score::valid`] feeds averages and extrema. It additionally drops zero,
//!   so an earned zero is indistinguishable from "not entered".

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A subject score as entered for one exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
}

impl Score {
    /// The numeric reading of this score, if it has one.
    ///
    /// Text uses the longest leading numeric prefix after trimming
    /// whitespace, so `"94分"` reads as `94`. Non-finite values read as `None`.
    pub fn parse(&self) -> Option<f64> {
        match self {
            Score::Number(v) => v.is_finite().then_some(*v),
            Score::Text(s) => parse_leading_number(s),
        }
    }

    /// Parse-or-0 reading used for totals and per-exam values.
    pub fn lenient(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }

    /// The value as a statistical data point: finite and strictly positive.
    pub fn valid(&self) -> Option<f64> {
        self.parse().filter(|v| *v > 0.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Number(v) => write!(f, "{v}"),
            Score::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Score::Number(v)
    }
}

impl From<&str> for Score {
    fn from(s: &str) -> Self {
        Score::Text(s.to_string())
    }
}

impl From<String> for Score {
    fn from(s: String) -> Self {
        Score::Text(s)
    }
}

/// Deserialize a subject-keyed score map, dropping values that are neither a
/// number nor text. A `null` map reads as empty.
///
/// Used with `#[serde(deserialize_with = ...)]` so one bad value never
/// rejects the whole record.
pub fn lenient_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Score>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(subject, value)| match value {
            serde_json::Value::Number(n) => n.as_f64().map(|v| (subject, Score::Number(v))),
            serde_json::Value::String(s) => Some((subject, Score::Text(s))),
            other => {
                tracing::warn!("dropping {subject} score {other}: not a number or text");
                None
            }
        })
        .collect())
}

/// Lenient reading of an optional score; absent reads as `0`.
pub fn lenient_value(score: Option<&Score>) -> f64 {
    score.map(Score::lenient).unwrap_or(0.0)
}

/// Validity reading of an optional score; absent reads as `None`.
pub fn valid_value(score: Option<&Score>) -> Option<f64> {
    score.and_then(Score::valid)
}

/// Parse the longest numeric prefix of `raw`, ignoring leading whitespace.
///
/// Accepts an optional sign, digits with an optional fractional part, and an
/// optional exponent. Returns `None` when no digits lead the string or the
/// result is not finite.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let digits_from = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if end < len && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_start = end + 1;
        if exp_start < len && matches!(bytes[exp_start], b'+' | b'-') {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_prefixes() {
        assert_eq!(parse_leading_number("94"), Some(94.0));
        assert_eq!(parse_leading_number("  102.5 "), Some(102.5));
        assert_eq!(parse_leading_number("94分"), Some(94.0));
        assert_eq!(parse_leading_number("-3"), Some(-3.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("5."), Some(5.0));
        assert_eq!(parse_leading_number("1e2x"), Some(100.0));
        assert_eq!(parse_leading_number("7e"), Some(7.0));
    }

    #[test]
    fn leading_number_rejects_garbage() {
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("   "), None);
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number("."), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("1e999"), None);
    }

    #[test]
    fn zero_is_lenient_but_not_valid() {
        let zero = Score::from("0");
        assert_eq!(zero.lenient(), 0.0);
        assert_eq!(zero.valid(), None);

        let number = Score::Number(0.0);
        assert_eq!(number.valid(), None);
    }

    #[test]
    fn unparseable_reads_as_missing() {
        let junk = Score::from("absent");
        assert_eq!(junk.lenient(), 0.0);
        assert_eq!(junk.valid(), None);
        assert_eq!(lenient_value(None), 0.0);
        assert_eq!(valid_value(None), None);
    }

    #[test]
    fn non_finite_number_is_missing() {
        assert_eq!(Score::Number(f64::NAN).parse(), None);
        assert_eq!(Score::Number(f64::INFINITY).lenient(), 0.0);
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let scores: Vec<Score> = serde_json::from_str(r#"["97", 88.5, ""]"#).unwrap();
        assert_eq!(scores[0], Score::Text("97".into()));
        assert_eq!(scores[1], Score::Number(88.5));
        assert_eq!(scores[2].parse(), None);
    }

    #[derive(Debug, Deserialize)]
    struct Scored {
        #[serde(default, deserialize_with = "lenient_map")]
        scores: BTreeMap<String, Score>,
    }

    #[test]
    fn lenient_map_drops_unusable_values() {
        let json = r#"{"scores": {"math": "94", "english": null, "physics": true,
            "chemistry": {"v": 1}, "biology": [2], "history": 71.5}}"#;
        let scored: Scored = serde_json::from_str(json).unwrap();
        assert_eq!(scored.scores.len(), 2);
        assert_eq!(scored.scores["math"], Score::Text("94".into()));
        assert_eq!(scored.scores["history"], Score::Number(71.5));
    }

    #[test]
    fn lenient_map_accepts_null_or_missing_map() {
        let scored: Scored = serde_json::from_str(r#"{"scores": null}"#).unwrap();
        assert!(scored.scores.is_empty());
        let scored: Scored = serde_json::from_str("{}").unwrap();
        assert!(scored.scores.is_empty());
    }
}
