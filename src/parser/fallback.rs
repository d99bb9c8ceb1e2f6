//! Default values used when an extractor finds nothing

use crate::config::ParserConfig;

/// Deterministic defaults for the fields that must never be empty.
///
/// `famous_for`, highlights and travel tips have no default and may stay
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPolicy {
    language: String,
    currency: String,
    best_time: String,
    learning_points: Vec<String>,
}

impl FallbackPolicy {
    #[must_use]
    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            language: config.default_language.clone(),
            currency: config.default_currency.clone(),
            best_time: config.default_best_time.clone(),
            learning_points: config.default_learning_points.clone(),
        }
    }

    #[must_use]
    pub fn language(&self, extracted: Option<String>) -> String {
        extracted.unwrap_or_else(|| self.language.clone())
    }

    #[must_use]
    pub fn currency(&self, extracted: Option<String>) -> String {
        extracted.unwrap_or_else(|| self.currency.clone())
    }

    #[must_use]
    pub fn best_time(&self, extracted: Option<String>) -> String {
        extracted.unwrap_or_else(|| self.best_time.clone())
    }

    /// Extracted points, or the full default list when none were found
    #[must_use]
    pub fn learning_points(&self, extracted: Vec<String>) -> Vec<String> {
        if extracted.is_empty() {
            self.learning_points.clone()
        } else {
            extracted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_values() {
        let policy = FallbackPolicy::from_config(&ParserConfig::default());
        assert_eq!(policy.language(None), "현지 언어");
        assert_eq!(policy.currency(None), "현지 화폐");
        assert_eq!(policy.best_time(None), "봄, 가을");
        assert_eq!(
            policy.learning_points(vec![]),
            vec!["현지 문화와 전통 이해하기", "역사적 배경 알아보기", "기본 인사말과 언어 배우기"]
        );
    }

    #[test]
    fn test_extracted_values_win() {
        let policy = FallbackPolicy::from_config(&ParserConfig::default());
        assert_eq!(policy.language(Some("일본어".to_string())), "일본어");
        assert_eq!(policy.learning_points(vec!["하나".to_string()]), vec!["하나"]);
    }
}
