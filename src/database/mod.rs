//! Database module - PostgreSQL + pgvector
//!
//! Read-only access to the `memories` table:
//! - pgvector cosine distance for semantic search
//! - ILIKE substring matching for the lexical fallback
//!
//! The schema itself (table definitions, migrations) is owned by the writing
//! side of the system and is not managed here.

mod memory;
mod postgres;
pub mod query;

pub use memory::{Memory, MemoryStore};
pub use postgres::{init_pool, pool, PostgresPool};
