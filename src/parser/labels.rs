//! `label: value` pulls for country and cultural fields

use regex::Regex;

use super::sections::MAX_ITEMS;
use crate::TravelError;

/// How far a labelled value extends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueExtent {
    /// Up to the next newline or comma. Values never start with a colon
    /// or whitespace, so a label at the end of a line matches nothing.
    Field,
    /// Up to the end of the line
    Line,
}

impl ValueExtent {
    fn pattern(self) -> &'static str {
        match self {
            ValueExtent::Field => r"[^\s,:：][^\n,]*",
            ValueExtent::Line => r"[^\s:：][^\n]*",
        }
    }
}

/// Case-insensitive matcher for `label[:] value` pairs.
///
/// A label only counts at the start of a line, optionally behind a list
/// marker, so prose mentioning a label word is never taken for a field.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    regex: Regex,
}

impl LabelPattern {
    /// Build a matcher for any of `labels`.
    ///
    /// Longer labels are tried first so `유명한 것` wins over `유명한`.
    pub fn new<S: AsRef<str>>(labels: &[S], extent: ValueExtent) -> Result<Self, TravelError> {
        let mut labels: Vec<&str> = labels
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty())
            .collect();
        if labels.is_empty() {
            return Err(TravelError::config("label list cannot be empty"));
        }
        labels.sort_by_key(|l| std::cmp::Reverse(l.chars().count()));

        let alternatives = labels
            .iter()
            .map(|l| regex::escape(l).replace(' ', r"[ \t]*"))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"(?im)^[ \t]*(?:(?:\d+\.|[-•*])[ \t]*)?(?:{alternatives})[ \t]*[:：]?[ \t]*({})",
            extent.pattern()
        );

        let regex = Regex::new(&pattern)
            .map_err(|e| TravelError::config(format!("invalid label pattern: {e}")))?;
        Ok(Self { regex })
    }

    /// Trimmed value of the first match; `None` when absent or blank.
    #[must_use]
    pub fn capture(&self, text: &str) -> Option<String> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Split a `a, b，c` list, keeping at most [`MAX_ITEMS`] non-empty pieces.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', '，'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .take(MAX_ITEMS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn country() -> LabelPattern {
        LabelPattern::new(&["국가", "나라", "country"], ValueExtent::Field).unwrap()
    }

    #[rstest]
    #[case("국가: 일본", Some("일본"))]
    #[case("국가：일본", Some("일본"))]
    #[case("나라 프랑스", Some("프랑스"))]
    #[case("COUNTRY: France, Europe", Some("France"))]
    #[case("intro\nCountry:   Italy  \nmore", Some("Italy"))]
    #[case("파리는 유럽의 아름다운 나라예요.\n국가: 프랑스", Some("프랑스"))]
    #[case("이 나라의 수도예요", None)]
    #[case("- 국가: 일본", Some("일본"))]
    #[case("  2. Country: Spain", Some("Spain"))]
    #[case("국가:\n일본", None)]
    #[case("nothing here", None)]
    fn test_country_capture(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(country().capture(text).as_deref(), expected);
    }

    #[test]
    fn test_line_extent_keeps_commas() {
        let best = LabelPattern::new(&["최적 방문 시기", "best time to visit"], ValueExtent::Line).unwrap();
        assert_eq!(best.capture("최적 방문 시기: 봄, 가을\n다음").as_deref(), Some("봄, 가을"));
        assert_eq!(best.capture("Best time to visit - spring").as_deref(), Some("- spring"));
    }

    #[test]
    fn test_longer_label_wins() {
        let famous = LabelPattern::new(&["유명한", "유명한 것"], ValueExtent::Line).unwrap();
        assert_eq!(famous.capture("유명한 것: 스시, 라멘").as_deref(), Some("스시, 라멘"));
    }

    #[test]
    fn test_label_spaces_are_flexible() {
        let best = LabelPattern::new(&["최적 방문 시기"], ValueExtent::Line).unwrap();
        assert_eq!(best.capture("최적방문시기: 여름").as_deref(), Some("여름"));
    }

    #[test]
    fn test_regex_metacharacters_in_labels_are_literal() {
        let odd = LabelPattern::new(&["통화(화폐)"], ValueExtent::Field).unwrap();
        assert_eq!(odd.capture("통화(화폐): 엔").as_deref(), Some("엔"));
    }

    #[test]
    fn test_empty_labels_rejected() {
        let empty: [&str; 1] = ["  "];
        assert!(LabelPattern::new(&empty, ValueExtent::Field).is_err());
    }

    #[rstest]
    #[case("스시, 라멘, 벚꽃", vec!["스시", "라멘", "벚꽃"])]
    #[case("스시，라멘 , 벚꽃, 후지산", vec!["스시", "라멘", "벚꽃"])]
    #[case("스시, , 라멘,", vec!["스시", "라멘"])]
    #[case("에펠탑", vec!["에펠탑"])]
    fn test_split_list(#[case] value: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_list(value), expected);
    }
}
