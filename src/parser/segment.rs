//! Line segmentation and the summary built from the first lines

/// Lines taken into the summary
pub const SUMMARY_LINES: usize = 3;

/// Hard cut-off of the summary, in characters
pub const SUMMARY_MAX_CHARS: usize = 200;

/// Split text into trimmed, non-empty lines, keeping their order.
#[must_use]
pub fn segment_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Re-join segmented lines, i.e. the original text minus its blank lines.
#[must_use]
pub fn rejoin(lines: &[String]) -> String {
    lines.join("\n")
}

/// First [`SUMMARY_LINES`] lines joined by a space, cut at
/// [`SUMMARY_MAX_CHARS`] characters even inside a word.
#[must_use]
pub fn summarize(lines: &[String]) -> String {
    lines
        .iter()
        .take(SUMMARY_LINES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(SUMMARY_MAX_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case("   \n\t\n", vec![])]
    #[case("a\n\n  b  \r\nc", vec!["a", "b", "c"])]
    #[case("한 줄", vec!["한 줄"])]
    fn test_segment_lines(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(segment_lines(input), expected);
    }

    #[test]
    fn test_rejoin_drops_blank_lines() {
        let lines = segment_lines("first\n\n\nsecond\n");
        assert_eq!(rejoin(&lines), "first\nsecond");
    }

    #[test]
    fn test_summary_uses_first_three_lines() {
        let lines = segment_lines("one\ntwo\nthree\nfour");
        assert_eq!(summarize(&lines), "one two three");
    }

    #[test]
    fn test_summary_of_short_input() {
        assert_eq!(summarize(&segment_lines("only")), "only");
        assert_eq!(summarize(&[]), "");
    }

    #[test]
    fn test_summary_cuts_by_characters() {
        let long_line = "가".repeat(150);
        let lines = vec![long_line.clone(), long_line];
        let summary = summarize(&lines);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
        // 150 chars, the joining space, then 49 more
        assert_eq!(summary.chars().nth(150), Some(' '));
    }
}
