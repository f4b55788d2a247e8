//! In-memory vector index over embedded chunks.
//!
//! The index is rebuilt from scratch on every process action and never
//! persisted. Search is exact cosine similarity over all entries.

use std::sync::Arc;

use tracing::debug;

use crate::error::EmbeddingError;
use crate::models::Chunk;
use crate::services::embedding::EmbeddingProvider;

/// A chunk returned from a similarity search.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub chunk: Chunk,
    pub score: f32,
}

struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// An in-memory (chunk, vector) store with top-K cosine retrieval.
///
/// Holds the embedding provider it was built with, so queries are
/// embedded consistently with the indexed chunks.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimension: usize,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("entries", &self.entries.len())
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl VectorIndex {
    /// Embed all chunks and build the index. Fails without producing an
    /// index if the provider errors or returns inconsistent vectors.
    pub async fn build(
        chunks: Vec<Chunk>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, EmbeddingError> {
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} vectors, got {}",
                chunks.len(),
                vectors.len()
            )));
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        for vector in &vectors {
            if vector.len() != dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dimension,
                    got: vector.len(),
                });
            }
        }

        debug!(chunks = chunks.len(), dimension, "built vector index");

        let entries = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();

        Ok(Self {
            entries,
            dimension,
            embedder,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed a query with the index's own provider and return the top
    /// `limit` chunks by cosine similarity.
    pub async fn retrieve(
        &self,
        query: &str,
        limit: usize,
        min_score: Option<f32>,
    ) -> Result<Vec<RetrievedChunk>, EmbeddingError> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed_query(query).await?;
        if query_vector.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                got: query_vector.len(),
            });
        }

        Ok(self.search(&query_vector, limit, min_score))
    }

    fn search(&self, query: &[f32], limit: usize, min_score: Option<f32>) -> Vec<RetrievedChunk> {
        let mut scored: Vec<RetrievedChunk> = self
            .entries
            .iter()
            .map(|entry| RetrievedChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query, &entry.vector),
            })
            .filter(|r| min_score.is_none_or(|min| r.score >= min))
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        scored
    }
}

/// Cosine similarity of two equal-length vectors; 0.0 when either has
/// zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
