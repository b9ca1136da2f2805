//! Critique parsing - extracts a score and feedback line from grader output.
//!
//! Parsing never fails: a missing or malformed label degrades to the
//! documented defaults so the loop always has a usable score/feedback pair.

use serde::{Deserialize, Serialize};

/// Label preceding the numeric score line.
pub const SCORE_LABEL: &str = "SCORE:";

/// Label preceding the feedback line.
pub const FEEDBACK_LABEL: &str = "FEEDBACK:";

/// Feedback used when the grader output lacks a feedback line.
pub const DEFAULT_FEEDBACK: &str = "Improve clarity.";

/// A parsed critique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    pub score: i64,
    pub feedback: String,
}

/// Scan grader output line by line for the score and feedback labels.
///
/// The first line beginning with `SCORE:` supplies the score; a present
/// label with a missing or non-numeric value parses as 0. The first line
/// beginning with `FEEDBACK:` supplies the feedback; an absent label falls
/// back to [`DEFAULT_FEEDBACK`]. The two fallbacks are independent.
pub fn parse_critique(text: &str) -> Critique {
    let score_line = text
        .lines()
        .map(str::trim_start)
        .find(|line| line.starts_with(SCORE_LABEL));
    let feedback_line = text
        .lines()
        .map(str::trim_start)
        .find(|line| line.starts_with(FEEDBACK_LABEL));

    let score = match score_line {
        Some(line) => {
            let value = line[SCORE_LABEL.len()..].trim();
            value.parse::<i64>().unwrap_or_else(|_| {
                tracing::warn!("non-numeric score {:?} in grader output, defaulting to 0", value);
                0
            })
        }
        None => {
            tracing::warn!("grader output has no {} line, defaulting to 0", SCORE_LABEL);
            0
        }
    };

    let feedback = match feedback_line {
        Some(line) => line[FEEDBACK_LABEL.len()..].trim().to_string(),
        None => DEFAULT_FEEDBACK.to_string(),
    };

    Critique { score, feedback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let critique = parse_critique("SCORE: 8\nFEEDBACK: Missing a numeric example.");
        assert_eq!(critique.score, 8);
        assert_eq!(critique.feedback, "Missing a numeric example.");
    }

    #[test]
    fn test_parse_missing_score_label() {
        let critique = parse_critique("FEEDBACK: Needs work.");
        assert_eq!(critique.score, 0);
        assert_eq!(critique.feedback, "Needs work.");
    }

    #[test]
    fn test_parse_missing_feedback_label() {
        let critique = parse_critique("SCORE: 6");
        assert_eq!(critique.score, 6);
        assert_eq!(critique.feedback, DEFAULT_FEEDBACK);
    }

    #[test]
    fn test_parse_garbage() {
        let critique = parse_critique("garbage text");
        assert_eq!(critique.score, 0);
        assert_eq!(critique.feedback, DEFAULT_FEEDBACK);
    }

    #[test]
    fn test_parse_non_numeric_score() {
        let critique = parse_critique("SCORE: excellent\nFEEDBACK: Nice.");
        assert_eq!(critique.score, 0);
        assert_eq!(critique.feedback, "Nice.");
    }

    #[test]
    fn test_parse_empty_score_value() {
        let critique = parse_critique("SCORE:\nFEEDBACK: Nice.");
        assert_eq!(critique.score, 0);
    }

    #[test]
    fn test_parse_first_label_wins() {
        let critique = parse_critique("SCORE: 4\nSCORE: 9\nFEEDBACK: First.\nFEEDBACK: Second.");
        assert_eq!(critique.score, 4);
        assert_eq!(critique.feedback, "First.");
    }

    #[test]
    fn test_parse_indented_labels() {
        let critique = parse_critique("  SCORE: 7\n\t FEEDBACK: Trim the intro.");
        assert_eq!(critique.score, 7);
        assert_eq!(critique.feedback, "Trim the intro.");
    }

    #[test]
    fn test_parse_labels_after_prose() {
        let text = "Here is my evaluation.\n\nSCORE: 9\nFEEDBACK: All criteria met.";
        let critique = parse_critique(text);
        assert_eq!(critique.score, 9);
        assert_eq!(critique.feedback, "All criteria met.");
    }

    #[test]
    fn test_parse_negative_score() {
        let critique = parse_critique("SCORE: -2\nFEEDBACK: Off topic.");
        assert_eq!(critique.score, -2);
    }

    #[test]
    fn test_parse_empty_input() {
        let critique = parse_critique("");
        assert_eq!(critique.score, 0);
        assert_eq!(critique.feedback, DEFAULT_FEEDBACK);
    }
}
