//! In-memory corpus index with cosine-similarity scoring.
//!
//! A [`CorpusIndex`] holds a fixed, ordered set of entries (job postings or
//! knowledge-base paragraphs), each paired with a precomputed embedding.
//! Indices are built once at startup and never mutated; scoring is a pure
//! function over the query vector.

use thiserror::Error;
use tracing::warn;

pub mod loader;

/// Errors raised while building a corpus index. All of them are startup
/// configuration errors: a bad corpus silently producing wrong rankings is
/// worse than refusing to start.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("corpus has no entries")]
    Empty,

    #[error("embedding for entry {id:?} has {got} dimensions, expected {expected}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        got: usize,
    },
}

/// One corpus entry: an identifier (job title or paragraph index), the
/// display text, and its precomputed embedding.
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A corpus entry paired with its similarity to a query.
#[derive(Debug, Clone, Copy)]
pub struct Scored<'a> {
    pub entry: &'a CorpusEntry,
    pub similarity: f32,
}

/// Fixed ordered collection of entries with uniform embedding dimensionality.
#[derive(Debug)]
pub struct CorpusIndex {
    entries: Vec<CorpusEntry>,
    dimensions: usize,
}

impl CorpusIndex {
    /// Build an index from an ordered sequence of entries.
    ///
    /// Rejects an empty corpus and any entry whose embedding does not have
    /// exactly `dimensions` components.
    pub fn new(entries: Vec<CorpusEntry>, dimensions: usize) -> Result<Self, CorpusError> {
        if entries.is_empty() {
            return Err(CorpusError::Empty);
        }

        for entry in &entries {
            if entry.embedding.len() != dimensions {
                return Err(CorpusError::DimensionMismatch {
                    id: entry.id.clone(),
                    expected: dimensions,
                    got: entry.embedding.len(),
                });
            }
        }

        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Score every entry against the query vector, sorted by similarity
    /// descending. The sort is stable: ties keep insertion order, so results
    /// are deterministic.
    pub fn score(&self, query: &[f32]) -> Vec<Scored<'_>> {
        let mut scored: Vec<Scored<'_>> = self
            .entries
            .iter()
            .map(|entry| Scored {
                entry,
                similarity: cosine_similarity(query, &entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        scored
    }

    /// Return the `k` most similar entries. If the corpus is smaller than
    /// `k`, returns all entries.
    pub fn top(&self, query: &[f32], k: usize) -> Vec<Scored<'_>> {
        let mut scored = self.score(query);
        scored.truncate(k);
        scored
    }

    /// Return the single most similar entry.
    ///
    /// Ties resolve to the earliest entry. Always succeeds: the index is
    /// non-empty by construction.
    pub fn best(&self, query: &[f32]) -> Scored<'_> {
        let mut best = Scored {
            entry: &self.entries[0],
            similarity: cosine_similarity(query, &self.entries[0].embedding),
        };

        for entry in &self.entries[1..] {
            let similarity = cosine_similarity(query, &entry.embedding);
            if similarity > best.similarity {
                best = Scored { entry, similarity };
            }
        }

        best
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[must_use]
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }
}

/// Cosine similarity: dot product divided by the product of L2 norms.
///
/// Defined as 0.0 when either vector has zero norm, so degenerate inputs
/// never divide by zero. A length mismatch also scores 0.0 (with a warning)
/// rather than panicking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "vector dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
