//! Knowledge retriever trait — the RAG collaborator.
//!
//! Used only inside the `rag_book` tool. Document ingestion, chunking and
//! embedding generation live entirely behind this interface.

use async_trait::async_trait;
use crate::error::RetrievalError;

/// A source of supporting text passages for grounding generated content.
#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    /// A human-readable name for this retriever.
    fn name(&self) -> &str;

    /// Return up to `k` passages relevant to `query`, most relevant first.
    async fn search(
        &self,
        query: &str,
        k: usize,
    ) -> std::result::Result<Vec<String>, RetrievalError>;
}
