//! Semantic retrieval strategy backed by pgvector

use async_trait::async_trait;
use tracing::info;

use crate::database::MemoryStore;
use crate::error::{Error, Result};
use crate::retrieval::{RetrievedMemory, Retriever, SearchQuery};

/// Ranks a user's memories by cosine similarity against a query embedding
pub struct VectorRetriever {
    store: Option<MemoryStore>,
}

impl VectorRetriever {
    /// Create a retriever over an injected store
    pub fn new(store: MemoryStore) -> Self {
        VectorRetriever { store: Some(store) }
    }

    /// Create a retriever over the process-wide shared pool, acquired lazily
    /// on the first search
    pub fn shared() -> Self {
        VectorRetriever { store: None }
    }

    async fn store(&self) -> Result<MemoryStore> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => MemoryStore::shared().await,
        }
    }
}

/// Validate semantic search inputs before any connection is acquired
fn validate(user_id: &str, embedding: &[f32], limit: usize, threshold: f32) -> Result<()> {
    if user_id.is_empty() {
        return Err(Error::InvalidQuery("user id must not be empty".into()));
    }
    if embedding.is_empty() {
        return Err(Error::InvalidQuery("query embedding must not be empty".into()));
    }
    if !embedding.iter().all(|v| v.is_finite()) {
        return Err(Error::InvalidQuery(
            "query embedding contains non-finite values".into(),
        ));
    }
    if limit == 0 {
        return Err(Error::InvalidQuery("limit must be at least 1".into()));
    }
    if !(-1.0..=1.0).contains(&threshold) {
        return Err(Error::InvalidQuery(format!(
            "threshold must be within [-1, 1], got {}",
            threshold
        )));
    }
    Ok(())
}

#[async_trait]
impl Retriever for VectorRetriever {
    fn supports(&self, query: &SearchQuery) -> bool {
        matches!(query, SearchQuery::Semantic { .. })
    }

    async fn search(
        &self,
        user_id: &str,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RetrievedMemory>> {
        let SearchQuery::Semantic {
            embedding,
            threshold,
        } = query
        else {
            return Err(Error::InvalidQuery(
                "vector retriever requires an embedding query".into(),
            ));
        };

        validate(user_id, embedding, limit, *threshold)?;

        let store = self.store().await?;
        let results = store
            .search_semantic(user_id, embedding.clone(), limit, *threshold)
            .await?;

        info!(
            "Semantic search returned {} memories for user={}",
            results.len(),
            user_id
        );

        Ok(results
            .into_iter()
            .map(|(memory, similarity)| RetrievedMemory {
                memory,
                similarity: Some(similarity),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Validation runs before pool acquisition, so these pass without a
    // database and without DATABASE_URL.

    #[tokio::test]
    async fn test_empty_embedding_is_invalid() {
        let retriever = VectorRetriever::shared();
        let query = SearchQuery::semantic(vec![]);

        let err = retriever.search("u1", &query, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_non_finite_embedding_is_invalid() {
        let retriever = VectorRetriever::shared();
        let query = SearchQuery::semantic(vec![0.5, f32::NAN]);

        let err = retriever.search("u1", &query, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_empty_user_id_is_invalid() {
        let retriever = VectorRetriever::shared();
        let query = SearchQuery::semantic(vec![1.0, 0.0]);

        let err = retriever.search("", &query, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_zero_limit_is_invalid() {
        let retriever = VectorRetriever::shared();
        let query = SearchQuery::semantic(vec![1.0, 0.0]);

        let err = retriever.search("u1", &query, 0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_threshold_is_invalid() {
        let retriever = VectorRetriever::shared();
        let query = SearchQuery::semantic_with_threshold(vec![1.0, 0.0], 1.5);

        let err = retriever.search("u1", &query, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_lexical_query_is_rejected() {
        let retriever = VectorRetriever::shared();
        let query = SearchQuery::lexical("mom");

        assert!(!retriever.supports(&query));
        let err = retriever.search("u1", &query, 10).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[test]
    fn test_boundary_thresholds_are_valid() {
        assert!(validate("u1", &[1.0], 1, -1.0).is_ok());
        assert!(validate("u1", &[1.0], 1, 1.0).is_ok());
    }
}
