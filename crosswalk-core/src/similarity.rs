//! Similarity engine: semantic (embedding-backed) or lexical (key-term overlap).
//!
//! The strategy is picked once when the engine is built and never changes for
//! the lifetime of that engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::embeddings::{cosine_similarity, create_embedder, Embedder, EmbeddingConfig};
use crate::evidence::key_terms;

/// Weight of the Jaccard index in the lexical score.
const JACCARD_WEIGHT: f64 = 0.6;
/// Weight of the common-term ratio in the lexical score.
const COMMON_RATIO_WEIGHT: f64 = 0.4;

/// Which similarity algorithm an engine is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMode {
    Semantic,
    Lexical,
}

impl fmt::Display for SimilarityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityMode::Semantic => f.write_str("semantic"),
            SimilarityMode::Lexical => f.write_str("lexical"),
        }
    }
}

/// Scores how close two statements are, in `[0.0, 1.0]`.
pub trait SimilarityStrategy: Send + Sync {
    fn mode(&self) -> SimilarityMode;

    /// Name of the backing provider, for logs and reports.
    fn provider_name(&self) -> &str;

    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Score every `rows[j]` against every `columns[i]`; result is indexed
    /// `[j][i]`.
    fn similarity_matrix(&self, rows: &[&str], columns: &[&str]) -> Vec<Vec<f64>> {
        rows.iter()
            .map(|row| columns.iter().map(|col| self.similarity(row, col)).collect())
            .collect()
    }
}

/// Lexical overlap score of two key-term sets:
/// `0.6 * jaccard + 0.4 * |A ∩ B| / min(|A|, |B|)`, capped at 1.0.
/// Empty on either side scores 0.0.
pub fn lexical_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    let jaccard = intersection / union;
    let common_ratio = intersection / a.len().min(b.len()) as f64;
    (JACCARD_WEIGHT * jaccard + COMMON_RATIO_WEIGHT * common_ratio).min(1.0)
}

/// Fallback strategy over stop-word filtered key terms.
#[derive(Debug, Clone, Default)]
pub struct LexicalSimilarity;

impl SimilarityStrategy for LexicalSimilarity {
    fn mode(&self) -> SimilarityMode {
        SimilarityMode::Lexical
    }

    fn provider_name(&self) -> &str {
        "lexical"
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        lexical_similarity(&key_terms(a), &key_terms(b))
    }

    fn similarity_matrix(&self, rows: &[&str], columns: &[&str]) -> Vec<Vec<f64>> {
        let column_terms: Vec<BTreeSet<String>> = columns.iter().map(|c| key_terms(c)).collect();
        rows.iter()
            .map(|row| {
                let row_terms = key_terms(row);
                column_terms
                    .iter()
                    .map(|col| lexical_similarity(&row_terms, col))
                    .collect()
            })
            .collect()
    }
}

/// Embedding-backed strategy: cosine similarity of sentence embeddings.
///
/// Cosine values are clamped into `[0.0, 1.0]`; opposed vectors score 0.0
/// rather than a negative similarity.
pub struct SemanticSimilarity {
    embedder: Box<dyn Embedder>,
}

impl SemanticSimilarity {
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self { embedder }
    }

    fn score(a: &[f32], b: &[f32]) -> f64 {
        f64::from(cosine_similarity(a, b)).clamp(0.0, 1.0)
    }
}

impl fmt::Debug for SemanticSimilarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticSimilarity")
            .field("provider", &self.embedder.provider_name())
            .field("dimensions", &self.embedder.dimensions())
            .finish()
    }
}

impl SimilarityStrategy for SemanticSimilarity {
    fn mode(&self) -> SimilarityMode {
        SimilarityMode::Semantic
    }

    fn provider_name(&self) -> &str {
        self.embedder.provider_name()
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        Self::score(&self.embedder.embed(a), &self.embedder.embed(b))
    }

    fn similarity_matrix(&self, rows: &[&str], columns: &[&str]) -> Vec<Vec<f64>> {
        // Each text is encoded once per call, not once per pair.
        let row_vectors = self.embedder.embed_batch(rows);
        let column_vectors = self.embedder.embed_batch(columns);
        row_vectors
            .iter()
            .map(|row| {
                column_vectors
                    .iter()
                    .map(|col| Self::score(row, col))
                    .collect()
            })
            .collect()
    }
}

/// Select the similarity strategy for an engine. Falls back to lexical scoring
/// whenever no embedding provider can be built.
pub fn build_strategy(config: &EmbeddingConfig) -> Box<dyn SimilarityStrategy> {
    match create_embedder(config) {
        Some(embedder) => {
            tracing::info!(
                provider = embedder.provider_name(),
                dimensions = embedder.dimensions(),
                "Semantic similarity enabled"
            );
            Box::new(SemanticSimilarity::new(embedder))
        }
        None => {
            if config.provider != "lexical" {
                tracing::warn!(
                    requested = %config.provider,
                    "Embedding model unavailable, running in degraded lexical mode"
                );
            } else {
                tracing::info!("Lexical similarity enabled");
            }
            Box::new(LexicalSimilarity)
        }
    }
}
