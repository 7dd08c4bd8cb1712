//! Knowledge retrieval — the `rag_book` tool and the in-memory retriever.
//!
//! The tool is a thin shim over the [`KnowledgeRetriever`] trait; the
//! vector database, chunking, and embedding generation live behind that
//! interface. [`StaticRetriever`] is the in-process implementation used
//! by the CLI and tests: a passage list ranked by keyword overlap.

use sensai_core::error::{RetrievalError, ToolError};
use sensai_core::observation::Observation;
use sensai_core::retriever::KnowledgeRetriever;
use tokio::sync::RwLock;
use tracing::debug;

/// How many passages a `rag_book` query pulls.
const PASSAGES_PER_QUERY: usize = 3;

pub(crate) async fn rag_book(
    input: Option<&str>,
    retriever: &dyn KnowledgeRetriever,
) -> Result<Observation, ToolError> {
    let Some(query) = input.filter(|q| !q.is_empty()) else {
        // Recoverable: tell the model what it forgot.
        return Ok(Observation::text(
            "rag_book requires a query as Action Input; nothing was retrieved.",
        ));
    };

    debug!(retriever = retriever.name(), query, "Retrieving knowledge");

    let passages = retriever
        .search(query, PASSAGES_PER_QUERY)
        .await
        .map_err(|e| ToolError::ExecutionFailed {
            tool_name: "rag_book".into(),
            reason: e.to_string(),
        })?;

    if passages.is_empty() {
        return Ok(Observation::text(format!(
            "No relevant passages found for '{query}'."
        )));
    }

    Ok(Observation::text(format!(
        "Retrieved relevant passages:\n{}",
        passages.join("\n\n")
    )))
}

/// An in-memory retriever over a fixed passage list.
///
/// Scoring is plain keyword overlap: the share of query terms a passage
/// contains, case-insensitively. Good enough for tests and demos; a real
/// deployment would put a vector store behind [`KnowledgeRetriever`]
/// instead.
pub struct StaticRetriever {
    passages: RwLock<Vec<String>>,
}

impl StaticRetriever {
    pub fn new(passages: Vec<String>) -> Self {
        Self {
            passages: RwLock::new(passages),
        }
    }

    /// A small linear-algebra library for demo sessions.
    pub fn sample_library() -> Self {
        Self::new(vec![
            "A matrix is invertible exactly when its determinant is nonzero; the inverse \
             reverses the linear transformation the matrix represents."
                .into(),
            "Matrix inversion can be computed by Gauss-Jordan elimination: augment the \
             matrix with the identity and row-reduce until the left block is the identity."
                .into(),
            "A vector space is a set closed under addition and scalar multiplication, \
             satisfying the eight vector space axioms."
                .into(),
            "The determinant of a 2x2 matrix [[a, b], [c, d]] is ad - bc; its inverse \
             is 1/(ad - bc) times [[d, -b], [-c, a]]."
                .into(),
            "Eigenvalues are the scalars lambda for which Av = lambda v has a nonzero \
             solution v, called an eigenvector."
                .into(),
        ])
    }

    /// Append a passage to the library.
    pub async fn add_passage(&self, passage: impl Into<String>) {
        self.passages.write().await.push(passage.into());
    }
}

#[async_trait::async_trait]
impl KnowledgeRetriever for StaticRetriever {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect();
        if terms.is_empty() {
            return Err(RetrievalError::QueryFailed("empty query".into()));
        }

        let passages = self.passages.read().await;
        let mut scored: Vec<(f64, &String)> = passages
            .iter()
            .map(|passage| {
                let haystack = passage.to_lowercase();
                let hits = terms.iter().filter(|t| haystack.contains(*t)).count();
                (hits as f64 / terms.len() as f64, passage)
            })
            .filter(|(score, _)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored.into_iter().take(k).map(|(_, p)| p.clone()).collect())
    }
}
