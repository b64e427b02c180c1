//! Retrieval module - semantic search with a lexical fallback
//!
//! Two strategies share one contract: [`VectorRetriever`] ranks a user's
//! memories by cosine similarity against a query embedding, and
//! [`LexicalRetriever`] falls back to case-insensitive substring matching
//! when no embedding is available. [`MemoryRetriever`] picks the strategy
//! that supports the query; the two result lists are never merged.

mod lexical;
mod orchestrator;
mod vector;

pub use lexical::LexicalRetriever;
pub use orchestrator::{
    MemoryRetriever, RetrievedMemory, Retriever, SearchQuery, DEFAULT_LIMIT, DEFAULT_THRESHOLD,
};
pub use vector::VectorRetriever;
