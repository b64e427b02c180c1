//! Lexical fallback retrieval strategy
//!
//! Substitute for semantic search when no query embedding is available:
//! case-insensitive substring match on content, ranked by importance and
//! recency rather than textual relevance.

use async_trait::async_trait;
use tracing::info;

use crate::database::MemoryStore;
use crate::error::{Error, Result};
use crate::retrieval::{RetrievedMemory, Retriever, SearchQuery};

/// Matches a user's memories by substring, ranked by importance then recency
pub struct LexicalRetriever {
    store: Option<MemoryStore>,
}

impl LexicalRetriever {
    /// Create a retriever over an injected store
    pub fn new(store: MemoryStore) -> Self {
        LexicalRetriever { store: Some(store) }
    }

    /// Create a retriever over the process-wide shared pool, acquired lazily
    /// on the first search
    pub fn shared() -> Self {
        LexicalRetriever { store: None }
    }

    async fn store(&self) -> Result<MemoryStore> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => MemoryStore::shared().await,
        }
    }
}

/// Validate lexical search inputs; an empty query is legal and matches all
fn validate(user_id: &str, limit: usize) -> Result<()> {
    if user_id.is_empty() {
        return Err(Error::InvalidQuery("user id must not be empty".into()));
    }
    if limit == 0 {
        return Err(Error::InvalidQuery("limit must be at least 1".into()));
    }
    Ok(())
}

#[async_trait]
impl Retriever for LexicalRetriever {
    fn supports(&self, query: &SearchQuery) -> bool {
        matches!(query, SearchQuery::Lexical { .. })
    }

    async fn search(
        &self,
        user_id: &str,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RetrievedMemory>> {
        let SearchQuery::Lexical { text } = query else {
            return Err(Error::InvalidQuery(
                "lexical retriever requires a text query".into(),
            ));
        };

        validate(user_id, limit)?;

        let store = self.store().await?;
        let memories = store.search_lexical(user_id, text, limit).await?;

        info!(
            "Lexical search returned {} memories for user={}",
            memories.len(),
            user_id
        );

        Ok(memories
            .into_iter()
            .map(|memory| RetrievedMemory {
                memory,
                similarity: None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_user_id_is_invalid() {
        let retriever = LexicalRetriever::shared();
        let query = SearchQuery::lexical("mom");

        let err = retriever.search("", &query, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_zero_limit_is_invalid() {
        let retriever = LexicalRetriever::shared();
        let query = SearchQuery::lexical("mom");

        let err = retriever.search("u1", &query, 0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_semantic_query_is_rejected() {
        let retriever = LexicalRetriever::shared();
        let query = SearchQuery::semantic(vec![1.0, 0.0]);

        assert!(!retriever.supports(&query));
        let err = retriever.search("u1", &query, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[test]
    fn test_empty_query_text_is_legal() {
        assert!(validate("u1", 10).is_ok());
    }
}
