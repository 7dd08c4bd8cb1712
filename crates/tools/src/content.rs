//! Content tools — synthesis, modification, encouragement.
//!
//! `gen_content` is the one tool that calls back into the LLM: it takes
//! retrieved context plus an instruction and asks the model to synthesize
//! a student-facing explanation. Its input arrives as a JSON string
//! written by the reasoning model, so parse failures are expected and
//! recoverable — they become observations, not errors.

use sensai_core::error::ToolError;
use sensai_core::observation::Observation;
use sensai_core::provider::Provider;
use serde::Deserialize;
use tracing::debug;

/// The structured payload `gen_content` expects as Action Input.
#[derive(Debug, Deserialize)]
struct GenContentInput {
    #[serde(default)]
    context: String,
    #[serde(default = "default_instruction")]
    instruction: String,
}

fn default_instruction() -> String {
    "provide a helpful explanation".into()
}

pub(crate) async fn gen_content(
    input: Option<&str>,
    provider: &dyn Provider,
) -> Result<Observation, ToolError> {
    let Some(raw) = input else {
        return Ok(Observation::text(
            "gen_content requires a JSON Action Input with 'context' and 'instruction'. \
             No content generated.",
        ));
    };

    let parsed: GenContentInput = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(_) => {
            // Recoverable: a single malformed turn should not end the session.
            return Ok(Observation::text(
                "Invalid JSON format for gen_content. Please provide a JSON string \
                 with 'context' and 'instruction' keys.",
            ));
        }
    };

    if parsed.context.is_empty() {
        return Ok(Observation::text(
            "gen_content requires context. No content generated.",
        ));
    }

    let synthesis_prompt = format!(
        "You are a friendly and encouraging tutor. Your task is to explain a complex topic \
         in a simple, easy-to-understand way. Based on the student's needs, please {}.\n\n\
         Here is some retrieved context about the topic:\n\
         ---CONTEXT---\n\
         {}\n\
         ---CONTEXT---\n\n\
         Please synthesize this information into a helpful, one-paragraph explanation \
         for the student.",
        parsed.instruction, parsed.context
    );

    debug!(instruction = %parsed.instruction, "Synthesizing content");

    // A transport failure here is a genuine execution failure and ends
    // the session, unlike the input problems above.
    let synthesized = provider
        .complete(&synthesis_prompt)
        .await
        .map_err(|e| ToolError::ExecutionFailed {
            tool_name: "gen_content".into(),
            reason: e.to_string(),
        })?;

    Ok(Observation::text(format!(
        "New content generated: '{synthesized}'"
    )))
}

pub(crate) fn update_content(input: Option<&str>) -> Observation {
    match input {
        Some(change) if !change.is_empty() => {
            Observation::text(format!("Existing content modified: '{change}'."))
        }
        _ => Observation::text(
            "update_content requires a modification as Action Input; nothing was changed.",
        ),
    }
}

pub(crate) fn encourage_user() -> Observation {
    Observation::text("The tutor said, 'You're making great progress!'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensai_core::error::TransportError;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: String,
        calls: Mutex<usize>,
    }

    impl CannedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Provider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, TransportError> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.reply.clone())
        }
    }

    struct BrokenProvider;

    #[async_trait::async_trait]
    impl Provider for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, TransportError> {
            Err(TransportError::Network("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn synthesizes_from_context_and_instruction() {
        let provider = CannedProvider::new("A matrix inverse undoes the matrix.");
        let input = r#"{"context": "Matrix inversion reverses a linear map.", "instruction": "give a simple analogy"}"#;

        let obs = gen_content(Some(input), &provider).await.unwrap();
        assert_eq!(
            obs.render(),
            "New content generated: 'A matrix inverse undoes the matrix.'"
        );
        assert_eq!(*provider.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn malformed_json_is_recoverable() {
        let provider = CannedProvider::new("unused");
        let obs = gen_content(Some("not json at all"), &provider).await.unwrap();
        assert!(obs.render().contains("Invalid JSON format"));
        // The LLM is never consulted for bad input.
        assert_eq!(*provider.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_context_is_recoverable() {
        let provider = CannedProvider::new("unused");
        let obs = gen_content(Some(r#"{"instruction": "summarize"}"#), &provider)
            .await
            .unwrap();
        assert!(obs.render().contains("requires context"));
    }

    #[tokio::test]
    async fn missing_input_is_recoverable() {
        let provider = CannedProvider::new("unused");
        let obs = gen_content(None, &provider).await.unwrap();
        assert!(obs.render().contains("No content generated"));
    }

    #[tokio::test]
    async fn transport_failure_is_an_execution_error() {
        let input = r#"{"context": "some context"}"#;
        let err = gen_content(Some(input), &BrokenProvider).await.unwrap_err();
        let ToolError::ExecutionFailed { tool_name, reason } = err;
        assert_eq!(tool_name, "gen_content");
        assert!(reason.contains("connection refused"));
    }

    #[test]
    fn update_content_echoes_change() {
        let obs = update_content(Some("replace the proof with a diagram"));
        assert!(obs.render().contains("replace the proof with a diagram"));
    }

    #[test]
    fn encouragement_is_fixed() {
        assert!(encourage_user().render().contains("great progress"));
    }
}
