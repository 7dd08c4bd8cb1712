//! Observation value objects.
//!
//! Two distinct things are called "observation" in this system:
//!
//! 1. **Modality observations** — the latest reading from one sensing
//!    channel (video, audio, screen), written by the capture layer and
//!    read by the analysis tools.
//! 2. **Tool observations** — the result of a tool invocation, fed back
//!    into the transcript so the model can reason over it.

use serde::{Deserialize, Serialize};

/// The result of a tool invocation.
///
/// Tools return either plain text or a structured record; both are
/// rendered to text before entering the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    /// A plain text observation.
    Text(String),
    /// A structured record (serialized into the transcript as JSON).
    Record(serde_json::Value),
}

impl Observation {
    /// Convenience constructor for text observations.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Render the observation as transcript text.
    pub fn render(&self) -> String {
        match self {
            Observation::Text(text) => text.clone(),
            Observation::Record(value) => value.to_string(),
        }
    }
}

/// Latest webcam reading: mood plus an estimated concentration level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoObservation {
    /// Primary mood, e.g. "focused", "confused", "bored".
    pub mood: String,
    /// Concentration estimate, 0–100.
    pub concentration_level: u8,
}

/// Latest microphone reading: what the student said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioObservation {
    /// Speech-to-text transcription of the latest utterance.
    pub transcript: String,
}

/// Latest screen reading: what the student is looking at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenObservation {
    /// Description of the visible screen content.
    pub description: String,
}
