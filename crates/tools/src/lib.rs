//! The tutoring tool set.
//!
//! The tools are a **closed set**: one enum variant per capability, so
//! dispatch is exhaustive at compile time and the registry can never
//! drift out of sync with the implementations. Each tool takes an
//! optional free-text input (whatever the model wrote after
//! `Action Input:`) and returns an [`Observation`].
//!
//! Error contract: a tool returns `Err` only when execution genuinely
//! failed (retriever outage, nested LLM transport failure). Bad input —
//! malformed JSON, a missing required field — is reported *as an
//! observation* so the conversation can recover on the next iteration.

use sensai_core::error::ToolError;
use sensai_core::observation::Observation;
use sensai_core::provider::Provider;
use sensai_core::retriever::KnowledgeRetriever;
use sensai_core::session::SessionContext;
use tokio::sync::Mutex;

mod content;
mod performance;
mod planning;
mod rag;
mod sensors;

pub use rag::StaticRetriever;

/// Everything a tool may need while executing.
///
/// The session sits behind a mutex so the owning layer can refresh sensor
/// readings between iterations; tools hold the lock only for their own
/// reads and writes, never across a provider call.
pub struct ToolContext<'a> {
    pub session: &'a Mutex<SessionContext>,
    pub provider: &'a dyn Provider,
    pub retriever: &'a dyn KnowledgeRetriever,
}

/// The closed set of tutoring capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorTool {
    AnalyzeVideo,
    AnalyzeAudio,
    AnalyzeScreen,
    UpdateShortTerm,
    UpdateLongTerm,
    GenContent,
    UpdateContent,
    EncourageUser,
    RagBook,
    UpdateLongTermPerformance,
    RetrieveLongTermPerformance,
}

impl TutorTool {
    /// Every tool, in prompt order.
    pub const ALL: [TutorTool; 11] = [
        TutorTool::AnalyzeVideo,
        TutorTool::AnalyzeAudio,
        TutorTool::AnalyzeScreen,
        TutorTool::UpdateShortTerm,
        TutorTool::UpdateLongTerm,
        TutorTool::GenContent,
        TutorTool::UpdateContent,
        TutorTool::EncourageUser,
        TutorTool::RagBook,
        TutorTool::UpdateLongTermPerformance,
        TutorTool::RetrieveLongTermPerformance,
    ];

    /// The name the model uses to select this tool.
    pub fn name(&self) -> &'static str {
        match self {
            TutorTool::AnalyzeVideo => "analyze_video",
            TutorTool::AnalyzeAudio => "analyze_audio",
            TutorTool::AnalyzeScreen => "analyze_screen",
            TutorTool::UpdateShortTerm => "update_short_term",
            TutorTool::UpdateLongTerm => "update_long_term",
            TutorTool::GenContent => "gen_content",
            TutorTool::UpdateContent => "update_content",
            TutorTool::EncourageUser => "encourage_user",
            TutorTool::RagBook => "rag_book",
            TutorTool::UpdateLongTermPerformance => "update_long_term_performance",
            TutorTool::RetrieveLongTermPerformance => "retrieve_long_term_performance",
        }
    }

    /// One-line description, shown to the model in the prompt.
    pub fn description(&self) -> &'static str {
        match self {
            TutorTool::AnalyzeVideo => "Read the latest webcam mood/concentration observation",
            TutorTool::AnalyzeAudio => "Read the latest microphone transcription observation",
            TutorTool::AnalyzeScreen => "Read the latest screen-content observation",
            TutorTool::UpdateShortTerm => "Adjust the short-term tutoring plan",
            TutorTool::UpdateLongTerm => "Adjust the long-term tutoring plan",
            TutorTool::GenContent => {
                "Generate new explanatory content; input is a JSON object with 'context' and 'instruction'"
            }
            TutorTool::UpdateContent => "Modify existing tutoring content",
            TutorTool::EncourageUser => "Offer the student some encouragement",
            TutorTool::RagBook => "Retrieve relevant passages from the course book for a query",
            TutorTool::UpdateLongTermPerformance => {
                "Record a performance sample; input is a JSON object with optional knowledge_score, concentration_level, memory_retention_rate"
            }
            TutorTool::RetrieveLongTermPerformance => {
                "Return the student's historical performance record"
            }
        }
    }

    /// Execute this tool. At most one invocation happens per loop
    /// iteration.
    pub async fn invoke(
        &self,
        input: Option<&str>,
        ctx: &ToolContext<'_>,
    ) -> Result<Observation, ToolError> {
        tracing::debug!(tool = self.name(), has_input = input.is_some(), "Invoking tool");

        match self {
            TutorTool::AnalyzeVideo | TutorTool::AnalyzeAudio | TutorTool::AnalyzeScreen => {
                let session = ctx.session.lock().await;
                Ok(sensors::read_modality(*self, &session.observations))
            }
            TutorTool::UpdateShortTerm => Ok(planning::update_short_term(input)),
            TutorTool::UpdateLongTerm => Ok(planning::update_long_term(input)),
            TutorTool::GenContent => content::gen_content(input, ctx.provider).await,
            TutorTool::UpdateContent => Ok(content::update_content(input)),
            TutorTool::EncourageUser => Ok(content::encourage_user()),
            TutorTool::RagBook => rag::rag_book(input, ctx.retriever).await,
            TutorTool::UpdateLongTermPerformance => {
                let mut session = ctx.session.lock().await;
                Ok(performance::update_long_term_performance(
                    input,
                    &mut session.performance,
                ))
            }
            TutorTool::RetrieveLongTermPerformance => {
                let session = ctx.session.lock().await;
                Ok(performance::retrieve_long_term_performance(
                    &session.performance,
                ))
            }
        }
    }
}

/// Name-based lookup over the closed tool set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolRegistry;

impl ToolRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Look up a tool by name. Matching is case-insensitive on the
    /// trimmed name; the parser hands over whatever the model wrote.
    pub fn lookup(&self, name: &str) -> Option<TutorTool> {
        let name = name.trim();
        TutorTool::ALL
            .iter()
            .copied()
            .find(|tool| tool.name().eq_ignore_ascii_case(name))
    }

    /// All registered tool names, in prompt order.
    pub fn names(&self) -> Vec<&'static str> {
        TutorTool::ALL.iter().map(|tool| tool.name()).collect()
    }

    /// `(name, description)` pairs for prompt assembly.
    pub fn descriptions(&self) -> Vec<(&'static str, &'static str)> {
        TutorTool::ALL
            .iter()
            .map(|tool| (tool.name(), tool.description()))
            .collect()
    }
}
