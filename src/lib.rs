//! # memrecall
//!
//! Hybrid memory retrieval over user-scoped records, backed by
//! PostgreSQL + pgvector.
//!
//! ## Features
//!
//! - **Semantic Search:** Cosine-similarity ranking against stored embeddings
//!   with a strict minimum-similarity threshold
//! - **Lexical Fallback:** Case-insensitive substring search ranked by
//!   importance and recency when no embedding is available
//! - **Lazy Shared Pool:** The connection pool is constructed exactly once,
//!   on the first retrieval call, from `DATABASE_URL`
//! - **Read-Only:** Memory records are written elsewhere; this crate only
//!   retrieves them
//!
//! ## Usage
//!
//! ```no_run
//! use memrecall::{MemoryRetriever, Result};
//!
//! async fn example(query_embedding: Vec<f32>) -> Result<()> {
//!     let retriever = MemoryRetriever::new();
//!
//!     // Semantic path: defaults are limit 10, threshold 0.7.
//!     let scored = retriever
//!         .search_by_embedding("u1", query_embedding, None, None)
//!         .await?;
//!
//!     // Lexical fallback when no embedding is available.
//!     let memories = retriever.search_by_text("u1", "mom", None).await?;
//!
//!     let _ = (scored, memories);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod retrieval;

pub use config::PostgresConfig;
pub use database::{Memory, MemoryStore};
pub use error::{Error, Result};
pub use retrieval::{
    LexicalRetriever, MemoryRetriever, RetrievedMemory, Retriever, SearchQuery, VectorRetriever,
    DEFAULT_LIMIT, DEFAULT_THRESHOLD,
};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
