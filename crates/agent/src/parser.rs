//! Extraction of structured decisions from free-form model output.
//!
//! Completions are plain text and the model is only loosely obedient, so we
//! scan for the `Thought:` / `Action:` / `Action Input:` / `Final Answer:`
//! labels case-insensitively and slice the original text between them. No
//! section is required; callers decide what an absent field means.

const THOUGHT: &str = "thought:";
const ACTION: &str = "action:";
const ACTION_INPUT: &str = "action input:";
const FINAL_ANSWER: &str = "final answer:";

/// The parsed outcome of one completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decision {
    pub thought: Option<String>,
    pub action: Option<String>,
    pub action_input: Option<String>,
    pub final_answer: Option<String>,
}

impl Decision {
    /// True when the completion contained none of the expected labels.
    pub fn is_empty(&self) -> bool {
        self.thought.is_none()
            && self.action.is_none()
            && self.action_input.is_none()
            && self.final_answer.is_none()
    }
}

/// Parse a raw completion into its labelled sections.
///
/// Labels are matched case-insensitively; the extracted text keeps the
/// model's original casing. Each section runs from the end of its label to
/// the first following label that could legally terminate it, or to the end
/// of the text. Whitespace is trimmed and empty sections collapse to `None`.
/// An action input of the literal word `None` also collapses to `None`,
/// since models frequently echo it for tools that take no input.
pub fn parse(output: &str) -> Decision {
    let lower = output.to_ascii_lowercase();

    let thought = section(output, &lower, THOUGHT, &[ACTION, FINAL_ANSWER]);
    let action = section(output, &lower, ACTION, &[ACTION_INPUT, FINAL_ANSWER]);
    let action_input = section(output, &lower, ACTION_INPUT, &[FINAL_ANSWER])
        .filter(|input| !input.eq_ignore_ascii_case("none"));
    let final_answer = section(output, &lower, FINAL_ANSWER, &[]);

    Decision {
        thought,
        action,
        action_input,
        final_answer,
    }
}

/// Slice `original` between the end of `label` and the earliest of
/// `terminators`, matching against the pre-lowercased copy. `lower` must be
/// the ASCII-lowercased form of `original` so byte indices line up.
fn section(
    original: &str,
    lower: &str,
    label: &str,
    terminators: &[&str],
) -> Option<String> {
    let start = lower.find(label)? + label.len();
    let end = terminators
        .iter()
        .filter_map(|t| lower[start..].find(t).map(|at| start + at))
        .min()
        .unwrap_or(lower.len());
    let text = original[start..end].trim();
    (!text.is_empty()).then(|| text.to_string())
}
