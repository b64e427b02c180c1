//! Retrieval orchestrator
//!
//! Stateless dispatcher over the two retrieval strategies. A query either
//! carries an embedding (semantic path) or free text (lexical fallback);
//! whichever strategy supports it runs alone. Results from the two paths are
//! never combined into one ranked list.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::database::{Memory, MemoryStore};
use crate::error::{Error, Result};
use crate::retrieval::{LexicalRetriever, VectorRetriever};

/// Default maximum number of results per search
pub const DEFAULT_LIMIT: usize = 10;

/// Default minimum similarity for semantic search
pub const DEFAULT_THRESHOLD: f32 = 0.7;

/// A retrieval request, tagged by which strategy can serve it
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Semantic search by query embedding
    Semantic {
        /// Query embedding, same dimensionality as the stored vectors
        embedding: Vec<f32>,
        /// Minimum similarity; only strictly greater scores are returned
        threshold: f32,
    },
    /// Lexical substring search over memory content
    Lexical {
        /// Query text; empty matches everything
        text: String,
    },
}

impl SearchQuery {
    /// Semantic query with the default threshold
    pub fn semantic(embedding: Vec<f32>) -> Self {
        SearchQuery::Semantic {
            embedding,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Semantic query with an explicit threshold
    pub fn semantic_with_threshold(embedding: Vec<f32>, threshold: f32) -> Self {
        SearchQuery::Semantic {
            embedding,
            threshold,
        }
    }

    /// Lexical query
    pub fn lexical(text: impl Into<String>) -> Self {
        SearchQuery::Lexical { text: text.into() }
    }
}

/// A memory returned from a search, with its similarity score when the
/// semantic path produced it
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedMemory {
    /// The matched memory
    pub memory: Memory,
    /// Similarity score (`1 - cosine_distance`); `None` on the lexical path
    pub similarity: Option<f32>,
}

/// A retrieval strategy
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Whether this strategy can serve the given query
    fn supports(&self, query: &SearchQuery) -> bool;

    /// Execute the search for one user, returning at most `limit` results
    async fn search(
        &self,
        user_id: &str,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RetrievedMemory>>;
}

/// Orchestrates retrieval by selecting the strategy that supports the query
///
/// Stateless between calls; each search is independent.
#[derive(Clone)]
pub struct MemoryRetriever {
    strategies: Vec<Arc<dyn Retriever>>,
}

impl MemoryRetriever {
    /// Create a retriever over the process-wide shared pool (acquired lazily
    /// on the first search)
    pub fn new() -> Self {
        MemoryRetriever {
            strategies: vec![
                Arc::new(VectorRetriever::shared()),
                Arc::new(LexicalRetriever::shared()),
            ],
        }
    }

    /// Create a retriever over an injected store
    pub fn with_store(store: MemoryStore) -> Self {
        MemoryRetriever {
            strategies: vec![
                Arc::new(VectorRetriever::new(store.clone())),
                Arc::new(LexicalRetriever::new(store)),
            ],
        }
    }

    /// Create a retriever over explicit strategies
    ///
    /// This is the seam for substituting fakes in tests.
    pub fn with_retrievers(strategies: Vec<Arc<dyn Retriever>>) -> Self {
        MemoryRetriever { strategies }
    }

    /// Run a search with the strategy that supports the query
    pub async fn search(
        &self,
        user_id: &str,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RetrievedMemory>> {
        let strategy = self
            .strategies
            .iter()
            .find(|s| s.supports(query))
            .ok_or_else(|| Error::InvalidQuery("no retriever supports this query".into()))?;

        strategy.search(user_id, query, limit).await
    }

    /// Semantic search by query embedding.
    ///
    /// `limit` defaults to [`DEFAULT_LIMIT`], `threshold` to
    /// [`DEFAULT_THRESHOLD`]. Every returned similarity is strictly greater
    /// than the threshold; results are ordered closest first.
    pub async fn search_by_embedding(
        &self,
        user_id: &str,
        embedding: Vec<f32>,
        limit: Option<usize>,
        threshold: Option<f32>,
    ) -> Result<Vec<RetrievedMemory>> {
        let query =
            SearchQuery::semantic_with_threshold(embedding, threshold.unwrap_or(DEFAULT_THRESHOLD));
        self.search(user_id, &query, limit.unwrap_or(DEFAULT_LIMIT))
            .await
    }

    /// Lexical substring search over memory content.
    ///
    /// `limit` defaults to [`DEFAULT_LIMIT`]. An empty query matches all of
    /// the user's memories; results are ordered by importance, then recency.
    pub async fn search_by_text(
        &self,
        user_id: &str,
        text: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Memory>> {
        let query = SearchQuery::lexical(text);
        let results = self
            .search(user_id, &query, limit.unwrap_or(DEFAULT_LIMIT))
            .await?;

        Ok(results.into_iter().map(|r| r.memory).collect())
    }
}

impl Default for MemoryRetriever {
    fn default() -> Self {
        MemoryRetriever::new()
    }
}
