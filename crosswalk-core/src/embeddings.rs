//! Pluggable embedding providers for the semantic similarity mode.
//!
//! Provides a trait-based abstraction over sentence-embedding models, with a
//! deterministic hashing embedder (always available) and FastEmbed (optional,
//! behind the `semantic-search` feature). When no provider can be built the
//! engine runs in lexical mode instead.

use serde::{Deserialize, Serialize};

use crate::evidence::key_terms;

/// Trait for embedding providers.
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    fn embed(&self, text: &str) -> Vec<f32>;

    /// Generate embeddings for a batch of texts.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Vec<f32>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Return the dimensionality of embeddings.
    fn dimensions(&self) -> usize;

    /// Return the provider name.
    fn provider_name(&self) -> &str;
}

/// Configuration for the similarity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider name: "lexical" (default), "fastembed", "hashing"
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Provider-specific model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Embedding dimensions for the hashing provider (256 if 0).
    #[serde(default)]
    pub dimensions: usize,
    /// Batch size for bulk embedding operations.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_provider() -> String {
    "lexical".into()
}

fn default_batch_size() -> usize {
    32
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            dimensions: 0,
            batch_size: default_batch_size(),
        }
    }
}

/// Bag-of-key-terms embedder: each key term is hashed into a dimension and the
/// vector is L2-normalised. Deterministic and model-free.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }
}

fn simple_hash(s: &str) -> usize {
    let mut hash: usize = 5381;
    for b in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(b as usize);
    }
    hash
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for term in key_terms(text) {
            let idx = simple_hash(&term) % self.dimensions;
            vector[idx] += 1.0;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "hashing"
    }
}

/// FastEmbed embedder (behind `semantic-search` feature flag).
/// Uses the `fastembed` crate with local ONNX models.
#[cfg(feature = "semantic-search")]
pub struct FastEmbedder {
    model: fastembed::TextEmbedding,
    dims: usize,
    batch_size: usize,
}

#[cfg(feature = "semantic-search")]
impl FastEmbedder {
    pub fn new(
        model_name: Option<&str>,
        batch_size: usize,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

        let model_enum = match model_name {
            Some("all-MiniLM-L6-v2") | None => EmbeddingModel::AllMiniLML6V2,
            Some("bge-small-en-v1.5") => EmbeddingModel::BGESmallENV15,
            Some("bge-base-en-v1.5") => EmbeddingModel::BGEBaseENV15,
            Some(other) => {
                tracing::warn!(
                    "Unknown fastembed model '{}', falling back to AllMiniLML6V2",
                    other
                );
                EmbeddingModel::AllMiniLML6V2
            }
        };

        let model = TextEmbedding::try_new(
            InitOptions::new(model_enum).with_show_download_progress(false),
        )?;

        // Detect dimensions from a probe embedding
        let probe = model.embed(vec!["probe"], None)?;
        let dims = probe.first().map(|v| v.len()).unwrap_or(384);

        Ok(Self {
            model,
            dims,
            batch_size: batch_size.max(1),
        })
    }
}

#[cfg(feature = "semantic-search")]
impl Embedder for FastEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        match self.model.embed(vec![text], None) {
            Ok(embeddings) => embeddings
                .into_iter()
                .next()
                .unwrap_or_else(|| vec![0.0; self.dims]),
            Err(e) => {
                tracing::warn!("FastEmbed error: {}, returning zero vector", e);
                vec![0.0; self.dims]
            }
        }
    }

    fn embed_batch(&self, texts: &[&str]) -> Vec<Vec<f32>> {
        match self.model.embed(texts.to_vec(), Some(self.batch_size)) {
            Ok(embeddings) => embeddings,
            Err(e) => {
                tracing::warn!("FastEmbed batch error: {}", e);
                texts.iter().map(|_| vec![0.0; self.dims]).collect()
            }
        }
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn provider_name(&self) -> &str {
        "fastembed"
    }
}

/// Compute cosine similarity between two vectors.
///
/// Mismatched lengths, empty vectors, and zero-norm vectors give 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
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

/// Build the configured embedding provider.
///
/// Returns `None` when the configuration asks for lexical scoring or when the
/// requested provider cannot be constructed; the caller then runs in lexical
/// mode.
pub fn create_embedder(config: &EmbeddingConfig) -> Option<Box<dyn Embedder>> {
    match config.provider.as_str() {
        "lexical" => None,
        "hashing" => {
            let dims = if config.dimensions > 0 {
                config.dimensions
            } else {
                256
            };
            Some(Box::new(HashingEmbedder::new(dims)))
        }
        #[cfg(feature = "semantic-search")]
        "fastembed" => match FastEmbedder::new(config.model.as_deref(), config.batch_size) {
            Ok(embedder) => Some(Box::new(embedder)),
            Err(e) => {
                tracing::warn!(
                    "Failed to load embedding model: {}, falling back to lexical similarity",
                    e
                );
                None
            }
        },
        #[cfg(not(feature = "semantic-search"))]
        "fastembed" => {
            tracing::warn!(
                "FastEmbed requested but 'semantic-search' feature is not enabled, falling back to lexical similarity"
            );
            None
        }
        other => {
            tracing::warn!(
                "Unknown similarity provider '{}', falling back to lexical similarity",
                other
            );
            None
        }
    }
}
