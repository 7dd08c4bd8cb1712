//! LLM provider implementations for Sensai.
//!
//! Every backend implements [`sensai_core::Provider`]; the loop
//! controller never knows which one it is talking to.

pub mod watsonx;

pub use watsonx::WatsonxProvider;
