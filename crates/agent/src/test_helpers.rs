//! Mock providers and retrievers for exercising the loop without a network.

use std::sync::Mutex;

use async_trait::async_trait;

use sensai_core::error::{RetrievalError, TransportError};
use sensai_core::provider::Provider;
use sensai_core::retriever::KnowledgeRetriever;

/// Replays a fixed sequence of completions and records every prompt.
///
/// Panics when asked for more completions than were scripted; a test that
/// trips this has made more model calls than it claimed it would.
pub struct ScriptedProvider {
    responses: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The prompt received by the `index`-th call.
    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, TransportError> {
        let mut prompts = self.prompts.lock().unwrap();
        let index = prompts.len();
        prompts.push(prompt.to_string());
        match self.responses.get(index) {
            Some(response) => Ok(response.clone()),
            None => panic!("scripted provider exhausted after {index} responses"),
        }
    }
}

/// Returns the same completion on every call.
pub struct LoopingProvider {
    response: String,
    calls: Mutex<usize>,
}

impl LoopingProvider {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Provider for LoopingProvider {
    fn name(&self) -> &str {
        "looping"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, TransportError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.response.clone())
    }
}

/// Fails every completion with a network error.
pub struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, TransportError> {
        Err(TransportError::Network("connection refused".to_string()))
    }
}

/// Fails every search, as a knowledge base outage would.
pub struct OfflineRetriever;

#[async_trait]
impl KnowledgeRetriever for OfflineRetriever {
    fn name(&self) -> &str {
        "offline"
    }

    async fn search(&self, _query: &str, _k: usize) -> Result<Vec<String>, RetrievalError> {
        Err(RetrievalError::Unavailable("index offline".to_string()))
    }
}
