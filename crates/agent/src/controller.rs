//! The Think-Act-Observe loop.
//!
//! One controller drives one tutoring session: each iteration it renders the
//! prompt, asks the model for a decision, and either returns a final answer,
//! dispatches a tool and appends the observation to the transcript, or stops
//! on a terminal condition. The session sits behind an async mutex so that a
//! capture layer can refresh sensor observations between iterations; the
//! controller never holds the lock across a provider call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use sensai_config::SessionConfig;
use sensai_core::error::{Error, Result};
use sensai_core::provider::Provider;
use sensai_core::retriever::KnowledgeRetriever;
use sensai_core::session::SessionContext;
use sensai_tools::{ToolContext, ToolRegistry};

use crate::parser;
use crate::prompt;

/// Reply when the time budget runs out before a final answer.
pub const TIME_EXCEEDED_REPLY: &str = "Maximum time constraint reached.";

/// Reply when the iteration budget runs out before a final answer.
pub const MAX_ITERATIONS_REPLY: &str =
    "Maximum number of iterations reached without a final answer.";

/// Reply when the model names a tool that does not exist.
pub const UNKNOWN_ACTION_REPLY: &str = "I'm sorry, I don't know how to perform that action.";

/// Reply when the model produces neither an action nor a final answer.
pub const MALFORMED_OUTPUT_REPLY: &str = "An unexpected error occurred in the ReAct loop.";

const DEFAULT_MAX_ITERATIONS: usize = 50;
const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(10 * 60);

/// How a session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// The model produced a final answer.
    FinalAnswer,
    /// The time budget elapsed first.
    TimeExceeded,
    /// The iteration budget elapsed first.
    MaxIterations,
    /// The model named a tool that does not exist.
    UnknownAction,
    /// A dispatched tool failed terminally.
    ToolFailure,
    /// The model produced neither an action nor a final answer.
    MalformedOutput,
}

/// The outcome of one full session loop.
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// The student-facing reply.
    pub reply: String,
    pub state: LoopState,
    /// Iterations that ran to the point of calling the model.
    pub iterations: usize,
    /// Tools actually dispatched.
    pub tool_calls_made: usize,
}

/// Drives the ReAct loop for a single tutoring session.
pub struct TutorController {
    provider: Arc<dyn Provider>,
    retriever: Arc<dyn KnowledgeRetriever>,
    registry: ToolRegistry,
    session: Arc<Mutex<SessionContext>>,
    max_iterations: usize,
    time_budget: Duration,
}

impl TutorController {
    pub fn new(
        provider: Arc<dyn Provider>,
        retriever: Arc<dyn KnowledgeRetriever>,
        session: Arc<Mutex<SessionContext>>,
    ) -> Self {
        Self {
            provider,
            retriever,
            registry: ToolRegistry::new(),
            session,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    /// Apply both loop limits from configuration.
    pub fn with_session_config(self, config: &SessionConfig) -> Self {
        self.with_max_iterations(config.max_iterations)
            .with_time_budget(Duration::from_secs_f64(config.time_budget_minutes * 60.0))
    }

    /// Run the loop until a terminal condition.
    ///
    /// The time budget is checked cooperatively at the head of each
    /// iteration, never mid-call; an in-flight completion or tool is always
    /// allowed to finish. Transport failures from the per-iteration
    /// completion propagate as errors; every in-loop terminal condition
    /// returns `Ok` with a student-facing reply.
    pub async fn run(&self) -> Result<SessionResult> {
        let started = Instant::now();
        info!(
            max_iterations = self.max_iterations,
            time_budget_secs = self.time_budget.as_secs_f64(),
            "Starting tutoring session loop"
        );

        let mut tool_calls_made = 0;

        for iteration in 1..=self.max_iterations {
            if started.elapsed() >= self.time_budget {
                warn!(iteration, "Time budget exhausted, ending session");
                return Ok(SessionResult {
                    reply: TIME_EXCEEDED_REPLY.to_string(),
                    state: LoopState::TimeExceeded,
                    iterations: iteration - 1,
                    tool_calls_made,
                });
            }

            let remaining = self.time_budget.saturating_sub(started.elapsed());
            let prompt_text = {
                let session = self.session.lock().await;
                prompt::build_prompt(&session, &self.registry, remaining.as_secs_f64() / 60.0)
            };

            debug!(iteration, "Requesting completion");
            let output = self
                .provider
                .complete(&prompt_text)
                .await
                .map_err(Error::from)?;

            let decision = parser::parse(&output);
            if let Some(thought) = &decision.thought {
                debug!(iteration, thought = %thought, "Model thought");
            }

            // A final answer wins even when an action is present alongside it.
            if let Some(answer) = decision.final_answer {
                info!(iteration, "Session produced a final answer");
                return Ok(SessionResult {
                    reply: answer,
                    state: LoopState::FinalAnswer,
                    iterations: iteration,
                    tool_calls_made,
                });
            }

            let Some(action) = decision.action else {
                warn!(iteration, "Completion contained neither action nor final answer");
                return Ok(SessionResult {
                    reply: MALFORMED_OUTPUT_REPLY.to_string(),
                    state: LoopState::MalformedOutput,
                    iterations: iteration,
                    tool_calls_made,
                });
            };

            let Some(tool) = self.registry.lookup(&action) else {
                warn!(iteration, action = %action, "Unknown tool requested");
                return Ok(SessionResult {
                    reply: UNKNOWN_ACTION_REPLY.to_string(),
                    state: LoopState::UnknownAction,
                    iterations: iteration,
                    tool_calls_made,
                });
            };

            debug!(iteration, tool = tool.name(), "Dispatching tool");
            let context = ToolContext {
                session: &self.session,
                provider: self.provider.as_ref(),
                retriever: self.retriever.as_ref(),
            };
            tool_calls_made += 1;

            let observation = match tool.invoke(decision.action_input.as_deref(), &context).await {
                Ok(observation) => observation,
                Err(error) => {
                    warn!(iteration, tool = tool.name(), %error, "Tool failed");
                    return Ok(SessionResult {
                        reply: format!("An error occurred while executing a tool: {error}"),
                        state: LoopState::ToolFailure,
                        iterations: iteration,
                        tool_calls_made,
                    });
                }
            };

            let rendered = observation.render();
            debug!(iteration, tool = tool.name(), observation = %rendered, "Tool observation");
            self.session.lock().await.transcript.push_exchange(
                decision.thought,
                tool.name().to_string(),
                decision.action_input,
                rendered,
            );
        }

        warn!(
            max_iterations = self.max_iterations,
            "Iteration budget exhausted without a final answer"
        );
        Ok(SessionResult {
            reply: MAX_ITERATIONS_REPLY.to_string(),
            state: LoopState::MaxIterations,
            iterations: self.max_iterations,
            tool_calls_made,
        })
    }
}
