//! Source ranges and ELM locator parsing

use serde::{Deserialize, Serialize};
use std::fmt;

/// A range in CQL source as reported by the translator.
///
/// Lines are 1-based and characters 0-based. A field is `None` when its
/// position could not be determined (a malformed or out-of-range locator
/// segment); consumers treat that as an unknown position, never as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub start_line: Option<i64>,
    pub start_char: Option<i64>,
    pub end_line: Option<i64>,
    pub end_char: Option<i64>,
}

impl SourceRange {
    /// Create a fully known range
    pub const fn new(start_line: i64, start_char: i64, end_line: i64, end_char: i64) -> Self {
        Self {
            start_line: Some(start_line),
            start_char: Some(start_char),
            end_line: Some(end_line),
            end_char: Some(end_char),
        }
    }

    /// Create a range where every position is unknown
    pub const fn unknown() -> Self {
        Self {
            start_line: None,
            start_char: None,
            end_line: None,
            end_char: None,
        }
    }

    /// Check whether all four positions are known
    pub const fn is_known(&self) -> bool {
        self.start_line.is_some()
            && self.start_char.is_some()
            && self.end_line.is_some()
            && self.end_char.is_some()
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            display_position(self.start_line),
            display_position(self.start_char),
            display_position(self.end_line),
            display_position(self.end_char)
        )
    }
}

/// Render an optional position, using `?` for unknown values
pub fn display_position(value: Option<i64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// Parse a locator string of the form `"<startLine>:<startChar>-<endLine>:<endChar>"`.
///
/// The split point between the two halves is the first `-` that follows the
/// first `:`, so a negative start line does not split the locator. Each half
/// splits on its own first `:`. Segments that are missing, not integers, or
/// out of range (a line below 1, a character below 0) come back as `None`;
/// the other fields are still filled in.
pub fn parse_locator(locator: &str) -> SourceRange {
    let dash_search_from = locator.find(':').map_or(0, |colon| colon + 1);

    let (start, end) = match locator[dash_search_from..].find('-') {
        Some(offset) => {
            let dash = dash_search_from + offset;
            (&locator[..dash], &locator[dash + 1..])
        }
        None => (locator, ""),
    };

    let (start_line, start_char) = parse_position(start);
    let (end_line, end_char) = parse_position(end);

    SourceRange {
        start_line,
        start_char,
        end_line,
        end_char,
    }
}

fn parse_position(half: &str) -> (Option<i64>, Option<i64>) {
    match half.split_once(':') {
        Some((line, column)) => (
            parse_segment(line).and_then(line_position),
            parse_segment(column).and_then(char_position),
        ),
        None => (parse_segment(half).and_then(line_position), None),
    }
}

fn parse_segment(segment: &str) -> Option<i64> {
    segment.trim().parse().ok()
}

/// Keep a line number only when it is a real 1-based line
pub fn line_position(line: i64) -> Option<i64> {
    (line >= 1).then_some(line)
}

/// Keep a character offset only when it is a real 0-based offset
pub fn char_position(column: i64) -> Option<i64> {
    (column >= 0).then_some(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_locator() {
        assert_eq!(parse_locator("10:5-12:20"), SourceRange::new(10, 5, 12, 20));
    }

    #[rstest]
    #[case("1:0-1:0", SourceRange::new(1, 0, 1, 0))]
    #[case("7:12-7:45", SourceRange::new(7, 12, 7, 45))]
    #[case(" 3 : 4 - 5 : 6 ", SourceRange::new(3, 4, 5, 6))]
    fn test_parse_locator_well_formed(#[case] input: &str, #[case] expected: SourceRange) {
        assert_eq!(parse_locator(input), expected);
    }

    #[test]
    fn test_non_numeric_segments_are_unknown() {
        let range = parse_locator("x:5-12:y");
        assert_eq!(range.start_line, None);
        assert_eq!(range.start_char, Some(5));
        assert_eq!(range.end_line, Some(12));
        assert_eq!(range.end_char, None);
        assert!(!range.is_known());
    }

    #[test]
    fn test_missing_dash_leaves_end_unknown() {
        let range = parse_locator("10:5");
        assert_eq!(range.start_line, Some(10));
        assert_eq!(range.start_char, Some(5));
        assert_eq!(range.end_line, None);
        assert_eq!(range.end_char, None);
    }

    #[test]
    fn test_missing_colon_splits_on_first_dash() {
        let range = parse_locator("10-12");
        assert_eq!(range.start_line, Some(10));
        assert_eq!(range.start_char, None);
        assert_eq!(range.end_line, Some(12));
        assert_eq!(range.end_char, None);
    }

    #[test]
    fn test_empty_locator() {
        assert_eq!(parse_locator(""), SourceRange::unknown());
    }

    // A second dash stays in the end half and reads as a negative end line,
    // which is out of range and therefore unknown.
    #[test]
    fn test_extra_dash_stays_in_end_half() {
        let range = parse_locator("10:5--12:20");
        assert_eq!(range.start_line, Some(10));
        assert_eq!(range.start_char, Some(5));
        assert_eq!(range.end_line, None);
        assert_eq!(range.end_char, Some(20));
        assert!(!range.is_known());
    }

    #[rstest]
    #[case("0:0-0:5", None, Some(0), None, Some(5))]
    #[case("-1:5-3:4", None, Some(5), Some(3), Some(4))]
    #[case("2:5-2:-1", Some(2), Some(5), Some(2), None)]
    fn test_out_of_range_segments_are_unknown(
        #[case] input: &str,
        #[case] start_line: Option<i64>,
        #[case] start_char: Option<i64>,
        #[case] end_line: Option<i64>,
        #[case] end_char: Option<i64>,
    ) {
        let range = parse_locator(input);
        assert_eq!(
            (range.start_line, range.start_char, range.end_line, range.end_char),
            (start_line, start_char, end_line, end_char)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceRange::new(3, 1, 3, 10).to_string(), "3:1-3:10");
        assert_eq!(parse_locator("3:x-3:10").to_string(), "3:?-3:10");
    }
}
