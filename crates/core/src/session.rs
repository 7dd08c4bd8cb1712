//! Session state — everything the loop knows about one tutoring session.
//!
//! A [`SessionContext`] is created from an initial prompt when a session
//! starts, mutated once per loop iteration (transcript append), refreshed
//! with sensor readings by the owning capture layer, and discarded when
//! the loop returns. Nothing here persists across process restarts.
//!
//! The session is the only shared mutable state in the system. The design
//! is single-writer per session: one loop consumes it at a time, and a
//! reimplementation serving multiple users must give each session its own
//! instance rather than adding global locking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observation::{AudioObservation, ScreenObservation, VideoObservation};
use crate::performance::PerformanceHistory;

/// Unique identifier for a tutoring session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recorded reasoning exchange: the model's thought, the tool it
/// chose, the input it gave, and what came back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub thought: Option<String>,
    pub action: String,
    pub action_input: Option<String>,
    pub observation: String,
    pub recorded_at: DateTime<Utc>,
}

/// A single transcript segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TranscriptEntry {
    /// Free-form context text (the initial state, injected notes).
    Context(String),
    /// A recorded thought/action/input/observation exchange.
    Exchange(ExchangeRecord),
}

/// Ordered, append-only record of the session so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a free-form context segment.
    pub fn push_context(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::Context(text.into()));
    }

    /// Append one reasoning exchange.
    pub fn push_exchange(
        &mut self,
        thought: Option<String>,
        action: String,
        action_input: Option<String>,
        observation: String,
    ) {
        self.entries.push(TranscriptEntry::Exchange(ExchangeRecord {
            thought,
            action,
            action_input,
            observation,
            recorded_at: Utc::now(),
        }));
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of recorded exchanges (context segments not counted).
    pub fn exchange_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, TranscriptEntry::Exchange(_)))
            .count()
    }

    /// Render the transcript as prompt text.
    ///
    /// Exchanges use the same labels the model is asked to emit, so the
    /// history reads back in the format the model already knows. An
    /// absent action input renders as the literal `None`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                TranscriptEntry::Context(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                TranscriptEntry::Exchange(record) => {
                    if let Some(thought) = &record.thought {
                        out.push_str(&format!("Thought: {}\n", thought));
                    }
                    out.push_str(&format!("Action: {}\n", record.action));
                    out.push_str(&format!(
                        "Action Input: {}\n",
                        record.action_input.as_deref().unwrap_or("None")
                    ));
                    out.push_str(&format!("Observation: {}\n", record.observation));
                }
            }
        }
        out
    }
}

/// The latest reading per modality. Each slot holds at most one record;
/// a new reading overwrites the previous one. No history at this layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestObservations {
    pub video: Option<VideoObservation>,
    pub audio: Option<AudioObservation>,
    pub screen: Option<ScreenObservation>,
}

impl LatestObservations {
    pub fn set_video(&mut self, observation: VideoObservation) {
        self.video = Some(observation);
    }

    pub fn set_audio(&mut self, observation: AudioObservation) {
        self.audio = Some(observation);
    }

    pub fn set_screen(&mut self, observation: ScreenObservation) {
        self.screen = Some(observation);
    }
}

/// All mutable state for one tutoring session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub id: SessionId,
    pub transcript: Transcript,
    pub observations: LatestObservations,
    pub performance: PerformanceHistory,
}

impl SessionContext {
    /// Create a session seeded with the initial prompt context.
    pub fn new(initial_state: impl Into<String>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_context(initial_state);
        Self {
            id: SessionId::new(),
            transcript,
            observations: LatestObservations::default(),
            performance: PerformanceHistory::new(),
        }
    }
}
