//! The Sensai reasoning loop.
//!
//! Implements the Think-Act-Observe cycle for adaptive tutoring sessions:
//! [`parser`] structures raw model output, [`prompt`] renders the session
//! into a completion request, and [`controller`] drives the loop against a
//! provider, a knowledge retriever, and the tutoring tool set.

pub mod controller;
pub mod parser;
pub mod prompt;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use controller::{LoopState, SessionResult, TutorController};
pub use parser::Decision;
