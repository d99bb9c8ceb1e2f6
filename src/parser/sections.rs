//! Heading-delimited list extraction (highlights, travel tips, learning points)

use regex::Regex;

/// Maximum number of entries collected per section
pub const MAX_ITEMS: usize = 3;

/// A section recognized by any of its heading keywords
#[derive(Debug, Clone)]
pub struct SectionSpec {
    keywords: Vec<String>,
}

impl SectionSpec {
    /// Build a section from its heading keywords; matching ignores ASCII case.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Whether the line contains one of the heading keywords
    #[must_use]
    pub fn is_heading(&self, line: &str) -> bool {
        let line = line.to_lowercase();
        self.keywords.iter().any(|k| line.contains(k.as_str()))
    }
}

/// Collect up to [`MAX_ITEMS`] enumerated entries following a heading of
/// `section`.
///
/// Once inside, only lines starting with `enumerator` are taken, with the
/// marker stripped. The scan ends at the cap or at a heading of one of the
/// `others` sections. Enumerated lines are always items, so an entry that
/// merely mentions another section's keyword does not end the list.
#[must_use]
pub fn extract_section(
    lines: &[String],
    section: &SectionSpec,
    others: &[&SectionSpec],
    enumerator: &Regex,
) -> Vec<String> {
    let mut items = Vec::new();
    let mut inside = false;

    for line in lines {
        if section.is_heading(line) {
            inside = true;
            continue;
        }
        if !inside {
            continue;
        }
        let Some(marker) = enumerator.find(line).filter(|m| m.start() == 0) else {
            if others.iter().any(|other| other.is_heading(line)) {
                break;
            }
            continue;
        };

        let item = line[marker.end()..].trim();
        if item.is_empty() {
            continue;
        }
        items.push(item.to_string());
        if items.len() >= MAX_ITEMS {
            break;
        }
    }

    items
}
