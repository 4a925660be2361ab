//! Conversion between label lists and the `;`-delimited edit string.

use keyroster_api::Label;

/// Separator between labels in the edit string.
pub const LABEL_SEPARATOR: &str = ";";

/// Split an edit string into labels.
///
/// Segments that are empty after trimming are dropped. Kept segments are not
/// trimmed, and duplicates stay in entry order.
#[must_use]
pub fn parse_labels(input: &str) -> Vec<Label> {
    input
        .split(LABEL_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
        .map(Label::new)
        .collect()
}

/// Join labels back into an edit string.
#[must_use]
pub fn join_labels(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|label| label.text.as_str())
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(labels: &[Label]) -> Vec<&str> {
        labels.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn parse_simple() {
        assert_eq!(texts(&parse_labels("a;b;c")), ["a", "b", "c"]);
    }

    #[test]
    fn parse_drops_blank_segments() {
        assert_eq!(texts(&parse_labels("a;;  ;b")), ["a", "b"]);
    }

    #[test]
    fn parse_empty() {
        assert!(parse_labels("").is_empty());
        assert!(parse_labels(" ; ;").is_empty());
    }

    #[test]
    fn parse_keeps_duplicates_and_inner_spacing() {
        assert_eq!(texts(&parse_labels("x; y;x")), ["x", " y", "x"]);
    }

    #[test]
    fn round_trip() {
        assert_eq!(join_labels(&parse_labels("a;b;c")), "a;b;c");
        assert_eq!(join_labels(&parse_labels("a;;  ;b")), "a;b");
    }

    #[test]
    fn join_empty() {
        assert_eq!(join_labels(&[]), "");
    }
}
