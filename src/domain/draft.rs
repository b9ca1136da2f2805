//! The draft record threaded through the refinement loop.
//!
//! A `Draft` is immutable-by-replacement: each step derives a new record
//! from the previous one with specific fields overwritten, so a failed
//! step leaves the caller's record untouched.

use serde::{Deserialize, Serialize};

/// The state record carried across generation and evaluation steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// The question being answered. Set once at initialization.
    pub question: String,

    /// Latest produced answer. Overwritten each generation step.
    pub answer: String,

    /// Latest critique text. Overwritten each evaluation step.
    pub feedback: String,

    /// Latest quality score. Overwritten each evaluation step.
    pub score: i64,

    /// Count of completed generation steps.
    pub iteration: u32,
}

impl Draft {
    /// Create the initial draft for a question.
    ///
    /// Answer and feedback start empty, score at 0, iteration at 0.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: String::new(),
            feedback: String::new(),
            score: 0,
            iteration: 0,
        }
    }

    /// Derive a new draft with the answer replaced and the iteration bumped.
    pub fn with_answer(&self, answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            iteration: self.iteration + 1,
            ..self.clone()
        }
    }

    /// Derive a new draft with the critique fields replaced.
    ///
    /// Answer and iteration are carried over unchanged.
    pub fn with_critique(&self, score: i64, feedback: impl Into<String>) -> Self {
        Self {
            score,
            feedback: feedback.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_defaults() {
        let draft = Draft::new("What is compound interest?");
        assert_eq!(draft.question, "What is compound interest?");
        assert!(draft.answer.is_empty());
        assert!(draft.feedback.is_empty());
        assert_eq!(draft.score, 0);
        assert_eq!(draft.iteration, 0);
    }

    #[test]
    fn test_with_answer_increments_iteration() {
        let draft = Draft::new("q");
        let next = draft.with_answer("first attempt");
        assert_eq!(next.answer, "first attempt");
        assert_eq!(next.iteration, 1);

        let after = next.with_answer("second attempt");
        assert_eq!(after.answer, "second attempt");
        assert_eq!(after.iteration, 2);
    }

    #[test]
    fn test_with_answer_preserves_other_fields() {
        let draft = Draft::new("q").with_critique(6, "be clearer");
        let next = draft.with_answer("revised");
        assert_eq!(next.question, "q");
        assert_eq!(next.score, 6);
        assert_eq!(next.feedback, "be clearer");
    }

    #[test]
    fn test_with_critique_preserves_answer_and_iteration() {
        let draft = Draft::new("q").with_answer("attempt");
        let next = draft.with_critique(8, "almost there");
        assert_eq!(next.answer, "attempt");
        assert_eq!(next.iteration, 1);
        assert_eq!(next.score, 8);
        assert_eq!(next.feedback, "almost there");
    }

    #[test]
    fn test_derivation_leaves_original_untouched() {
        let draft = Draft::new("q");
        let _ = draft.with_answer("attempt");
        assert!(draft.answer.is_empty());
        assert_eq!(draft.iteration, 0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let draft = Draft::new("q").with_answer("a").with_critique(7, "f");
        let json = serde_json::to_string(&draft).unwrap();
        let restored: Draft = serde_json::from_str(&json).unwrap();
        assert_eq!(draft, restored);
    }
}
