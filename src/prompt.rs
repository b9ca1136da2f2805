//! Prompt construction for the generation and evaluation steps.

use crate::critique::{FEEDBACK_LABEL, SCORE_LABEL};
use crate::domain::Draft;

/// System prompt for the generation step.
pub const GENERATOR_SYSTEM_PROMPT: &str = "You are a clear explainer.";

/// System prompt for the evaluation step.
pub const GRADER_SYSTEM_PROMPT: &str = "You are a strict but consistent grader.";

/// Build the user prompt asking for a new or improved answer.
///
/// Embeds the question, the prior answer, and the prior critique feedback.
/// Both may be empty on the first iteration.
pub fn generation_prompt(draft: &Draft) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!("Question: {}\n\n", draft.question));

    prompt.push_str("Current answer (may be empty):\n");
    prompt.push_str(&draft.answer);
    prompt.push_str("\n\n");

    prompt.push_str("Critique feedback (may be empty):\n");
    prompt.push_str(&draft.feedback);
    prompt.push_str("\n\n");

    prompt.push_str("Write an improved answer to the question.\n");
    prompt.push_str("Keep it concise and address every point of the critique feedback.\n");

    prompt
}

/// Fixed, enumerable criteria the grader checks - nothing else.
#[derive(Debug, Clone)]
pub struct CritiqueCriteria {
    /// What is being graded (e.g., "answer").
    pub subject: String,

    /// The criteria, in the order they are presented to the grader.
    pub criteria: Vec<String>,
}

impl CritiqueCriteria {
    /// Create empty criteria for the given subject.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            criteria: Vec::new(),
        }
    }

    /// Add a single criterion.
    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.criteria.push(criterion.into());
        self
    }

    /// Add multiple criteria.
    pub fn with_criteria(mut self, criteria: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.criteria.extend(criteria.into_iter().map(|c| c.into()));
        self
    }

    /// Default criteria for grading a written answer.
    pub fn answer_criteria() -> Self {
        Self::new("answer").with_criteria([
            "Directly answers the question that was asked",
            "Is factually correct",
            "Includes at least one concrete example",
            "Is clear enough for a newcomer to follow",
        ])
    }

    /// Build the grading prompt for the given answer.
    ///
    /// The rubric maps the count of criteria met onto a 2..=10 score so the
    /// grader never has to invent its own scale, and the response format is
    /// pinned to the `SCORE:`/`FEEDBACK:` lines the parser scans for.
    pub fn build_prompt(&self, answer: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "Check ONLY these criteria for the {} (no other suggestions):\n",
            self.subject
        ));
        for (i, criterion) in self.criteria.iter().enumerate() {
            prompt.push_str(&format!("{}) {}\n", i + 1, criterion));
        }
        prompt.push('\n');

        prompt.push_str("Score 0-10 based on how many criteria are met:\n");
        let total = self.criteria.len().max(1);
        for met in (0..=total).rev() {
            prompt.push_str(&format!("- {} if {} of {} are met\n", rubric_score(met, total), met, total));
        }
        prompt.push('\n');

        prompt.push_str("Return exactly this format (no extra text):\n");
        prompt.push_str(&format!("{} <integer>\n", SCORE_LABEL));
        prompt.push_str(&format!("{} <which criteria failed, in 1 sentence>\n", FEEDBACK_LABEL));

        prompt.push_str("\nAnswer:\n");
        prompt.push_str(answer);
        prompt.push('\n');

        prompt
    }
}

/// Map a met-criteria count onto the 2..=10 rubric ladder.
fn rubric_score(met: usize, total: usize) -> usize {
    2 + (8 * met) / total
}
