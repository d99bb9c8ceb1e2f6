//! City-info parser
//!
//! Turns the free-form answer of the generative-text service into a
//! [`ParsedCityInfo`]. The answer loosely follows a five-part template
//! (intro, highlights, cultural block, tips, learning points) but any part
//! may be missing, reordered or reworded; every extractor degrades to an
//! empty value or a fallback instead of failing.
//!
//! - [`segment`]: line splitting and summary
//! - [`sections`]: heading-delimited lists
//! - [`labels`]: `label: value` pulls
//! - [`fallback`]: defaults for fields that must not be empty

pub mod fallback;
pub mod labels;
pub mod sections;
pub mod segment;

use regex::Regex;
use tracing::debug;

use crate::TravelError;
use crate::config::ParserConfig;
use crate::models::{CulturalInfo, ParsedCityInfo};

pub use fallback::FallbackPolicy;
pub use labels::{LabelPattern, ValueExtent, split_list};
pub use sections::{MAX_ITEMS, SectionSpec, extract_section};
pub use segment::{SUMMARY_MAX_CHARS, rejoin, segment_lines, summarize};

/// Compiled keyword tables; cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CityInfoParser {
    highlights: SectionSpec,
    tips: SectionSpec,
    learning: SectionSpec,
    cultural: SectionSpec,
    enumerator: Regex,
    country: LabelPattern,
    language: LabelPattern,
    currency: LabelPattern,
    best_time: LabelPattern,
    famous_for: LabelPattern,
    fallback: FallbackPolicy,
}

impl CityInfoParser {
    /// Compile the parser from its configuration
    pub fn new(config: &ParserConfig) -> Result<Self, TravelError> {
        let enumerator = Regex::new(&config.enumerator_pattern)
            .map_err(|e| TravelError::config(format!("invalid enumerator pattern: {e}")))?;

        Ok(Self {
            highlights: SectionSpec::new(&config.highlight_headings),
            tips: SectionSpec::new(&config.tip_headings),
            learning: SectionSpec::new(&config.learning_headings),
            cultural: SectionSpec::new(&config.cultural_headings),
            enumerator,
            country: LabelPattern::new(&config.country_labels, ValueExtent::Field)?,
            language: LabelPattern::new(&config.language_labels, ValueExtent::Field)?,
            currency: LabelPattern::new(&config.currency_labels, ValueExtent::Field)?,
            best_time: LabelPattern::new(&config.best_time_labels, ValueExtent::Line)?,
            famous_for: LabelPattern::new(&config.famous_for_labels, ValueExtent::Line)?,
            fallback: FallbackPolicy::from_config(config),
        })
    }

    /// Parse a generated answer about `city`. Never fails.
    #[must_use]
    pub fn parse(&self, city: &str, text: &str) -> ParsedCityInfo {
        let lines = segment_lines(text);
        let joined = rejoin(&lines);

        let info = ParsedCityInfo {
            city: city.to_string(),
            country: self.country(text),
            summary: summarize(&lines),
            highlights: self.highlights(&lines),
            cultural_info: self.cultural_info(&joined),
            travel_tips: self.travel_tips(&lines),
            learning_points: self.learning_points(&lines),
        };

        debug!(
            city,
            lines = lines.len(),
            highlights = info.highlights.len(),
            tips = info.travel_tips.len(),
            learning_points = info.learning_points.len(),
            "Parsed city info"
        );

        info
    }

    /// Country named in the raw text, or an empty string
    #[must_use]
    pub fn country(&self, text: &str) -> String {
        self.country.capture(text).unwrap_or_default()
    }

    #[must_use]
    pub fn highlights(&self, lines: &[String]) -> Vec<String> {
        extract_section(
            lines,
            &self.highlights,
            &[&self.tips, &self.learning, &self.cultural],
            &self.enumerator,
        )
    }

    #[must_use]
    pub fn travel_tips(&self, lines: &[String]) -> Vec<String> {
        extract_section(
            lines,
            &self.tips,
            &[&self.highlights, &self.learning, &self.cultural],
            &self.enumerator,
        )
    }

    /// Learning points, falling back to the default list when none are found
    #[must_use]
    pub fn learning_points(&self, lines: &[String]) -> Vec<String> {
        let extracted = extract_section(
            lines,
            &self.learning,
            &[&self.highlights, &self.tips, &self.cultural],
            &self.enumerator,
        );
        self.fallback.learning_points(extracted)
    }

    /// Cultural fields pulled from the blank-line-free text
    #[must_use]
    pub fn cultural_info(&self, joined: &str) -> CulturalInfo {
        CulturalInfo {
            language: self.fallback.language(self.language.capture(joined)),
            currency: self.fallback.currency(self.currency.capture(joined)),
            best_time_to_visit: self.fallback.best_time(self.best_time.capture(joined)),
            famous_for: self
                .famous_for
                .capture(joined)
                .map(|value| split_list(&value))
                .unwrap_or_default(),
        }
    }
}
