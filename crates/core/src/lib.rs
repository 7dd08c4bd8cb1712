//! # Sensai Core
//!
//! Domain types, traits, and error definitions for the Sensai adaptive
//! tutoring agent. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (the LLM backend, the knowledge retriever)
//! is defined as a trait here. Implementations live in their respective
//! crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted mock implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod observation;
pub mod performance;
pub mod provider;
pub mod retriever;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result, RetrievalError, ToolError, TransportError};
pub use observation::{AudioObservation, Observation, ScreenObservation, VideoObservation};
pub use performance::{PerformanceHistory, PerformanceSample};
pub use provider::Provider;
pub use retriever::KnowledgeRetriever;
pub use session::{LatestObservations, SessionContext, SessionId, Transcript, TranscriptEntry};
