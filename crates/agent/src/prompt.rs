//! Assembly of the per-iteration tutoring prompt.
//!
//! Every iteration re-renders the whole picture for the model: transcript so
//! far, remaining time, the latest reading from each sensor modality, and the
//! performance summary. Absent modalities serialize as `null` rather than
//! being dropped, so the model can reason about missing sensors.

use sensai_core::session::SessionContext;
use sensai_tools::ToolRegistry;

/// Build the full ReAct prompt for one iteration.
pub fn build_prompt(
    session: &SessionContext,
    registry: &ToolRegistry,
    remaining_minutes: f64,
) -> String {
    let mut tool_lines = String::new();
    for (name, description) in registry.descriptions() {
        tool_lines.push_str("- ");
        tool_lines.push_str(name);
        tool_lines.push_str(": ");
        tool_lines.push_str(description);
        tool_lines.push('\n');
    }

    format!(
        "You are a ReAct agent for an adaptive tutoring system. Your task is to observe multimodal \
         data about a student and decide the best next action using the available tools.\n\n\
         Tools available:\n{tools}\n\
         Current conversation history and context:\n{history}\n\n\
         Current Time Remaining: {remaining:.1} minutes.\n\
         Latest Video Observation: {video}\n\
         Latest Audio Observation: {audio}\n\
         Latest Screen Observation: {screen}\n\
         Historical Performance (Summary): {performance}\n\n\
         If the current conversation history does not contain relevant, retrieved knowledge, your \
         primary goal is to use the 'rag_book' tool to get it.\n\
         Example: Thought: The student is asking about a new topic and I need to retrieve \
         information. Action: rag_book. Action Input: What is a vector space?\n\n\
         If you have already retrieved the necessary information from the 'rag_book' tool, you can \
         then proceed to the next step.\n\n\
         Think about the best action to take. The thought should be concise and direct. The action \
         must be a valid tool name.\n\
         If you choose 'gen_content', the 'Action Input' must be a JSON string with a 'context' key \
         (from the 'rag_book' tool) and a specific 'instruction' key (e.g., 'provide a simple \
         analogy', 'explain with a step-by-step example', or 'give a concise summary').\n\
         Begin with 'Thought:', follow with 'Action: [tool_name]', and 'Action Input: [input]'.\n\
         If you have a final answer, use 'Final Answer: [response]'.\n",
        tools = tool_lines,
        history = session.transcript.render(),
        remaining = remaining_minutes,
        video = as_json(&session.observations.video),
        audio = as_json(&session.observations.audio),
        screen = as_json(&session.observations.screen),
        performance = as_json(&session.performance),
    )
}

/// Render any serializable value as compact JSON; `None` becomes `null`.
fn as_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensai_core::observation::VideoObservation;
    use sensai_core::performance::PerformanceSample;

    #[test]
    fn absent_modalities_render_as_null() {
        let session = SessionContext::new("Student asks about eigenvalues.");
        let prompt = build_prompt(&session, &ToolRegistry::new(), 10.0);

        assert!(prompt.contains("Latest Video Observation: null"));
        assert!(prompt.contains("Latest Audio Observation: null"));
        assert!(prompt.contains("Latest Screen Observation: null"));
    }

    #[test]
    fn present_modalities_render_as_json() {
        let mut session = SessionContext::new("Student asks about eigenvalues.");
        session.observations.set_video(VideoObservation {
            mood: "focused".to_string(),
            concentration_level: 8,
        });
        let prompt = build_prompt(&session, &ToolRegistry::new(), 10.0);

        assert!(prompt.contains(r#""mood":"focused""#));
        assert!(prompt.contains(r#""concentration_level":8"#));
        assert!(prompt.contains("Latest Audio Observation: null"));
    }

    #[test]
    fn remaining_time_uses_one_decimal() {
        let session = SessionContext::new("hello");
        let prompt = build_prompt(&session, &ToolRegistry::new(), 9.0);
        assert!(prompt.contains("Current Time Remaining: 9.0 minutes."));

        let prompt = build_prompt(&session, &ToolRegistry::new(), 4.56);
        assert!(prompt.contains("Current Time Remaining: 4.6 minutes."));
    }

    #[test]
    fn transcript_and_tools_are_embedded() {
        let mut session = SessionContext::new("Student asks about matrix inversion.");
        session.transcript.push_exchange(
            Some("fetch material".to_string()),
            "rag_book".to_string(),
            Some("matrix inversion".to_string()),
            "Retrieved relevant passages:\nThe inverse of A...".to_string(),
        );
        let prompt = build_prompt(&session, &ToolRegistry::new(), 10.0);

        assert!(prompt.contains("Student asks about matrix inversion."));
        assert!(prompt.contains("Action: rag_book"));
        assert!(prompt.contains("- rag_book:"));
        assert!(prompt.contains("- gen_content:"));
    }

    #[test]
    fn performance_summary_is_embedded() {
        let mut session = SessionContext::new("hello");
        session.performance.record(&PerformanceSample {
            knowledge_score: Some(0.7),
            concentration_level: Some(6.0),
            memory_retention_rate: None,
        });
        let prompt = build_prompt(&session, &ToolRegistry::new(), 10.0);

        assert!(prompt.contains(r#""knowledge_scores":[0.7]"#));
        assert!(prompt.contains(r#""concentration_levels":[6.0]"#));
    }
}
