//! Query text for memory retrieval
//!
//! The ranking rules live here as plain data and pure functions so they can
//! be unit-tested without a live database: the threshold comparison is
//! strictly greater-than, semantic results are ordered by cosine distance
//! ascending, lexical results by importance then recency, and user-supplied
//! text is escaped before it becomes a LIKE pattern.

/// Semantic search over a user's memories.
///
/// Binds: $1 query embedding, $2 user id, $3 similarity threshold, $4 limit.
/// Similarity is `1 - cosine_distance`; only rows strictly above the
/// threshold survive. `<=>` returns double precision, so the projected score
/// is cast down to `float4` for decoding.
pub const SEMANTIC_SEARCH_SQL: &str = r#"
    SELECT
        id, user_id, content, category, importance, metadata, tags,
        embedding, created_at,
        (1 - (embedding <=> $1))::float4 AS similarity
    FROM memories
    WHERE user_id = $2
      AND embedding IS NOT NULL
      AND 1 - (embedding <=> $1) > $3
    ORDER BY embedding <=> $1
    LIMIT $4
"#;

/// Lexical fallback search over a user's memories.
///
/// Binds: $1 user id, $2 LIKE pattern (see [`like_pattern`]), $3 limit.
/// Case-insensitive substring match, ranked by importance then recency.
pub const LEXICAL_SEARCH_SQL: &str = r#"
    SELECT
        id, user_id, content, category, importance, metadata, tags,
        embedding, created_at
    FROM memories
    WHERE user_id = $1
      AND content ILIKE $2
    ORDER BY importance DESC, created_at DESC
    LIMIT $3
"#;

/// Escape LIKE metacharacters so user text matches as a literal substring.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the ILIKE pattern for a substring query.
///
/// An empty query yields `%%`, which matches every row.
pub fn like_pattern(query: &str) -> String {
    format!("%{}%", escape_like(query))
}
