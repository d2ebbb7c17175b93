//! # Crosswalk Core
//!
//! Comparison engine for learning-outcome crosswalks. Scores institutional
//! outcome statements against a reference taxonomy, classifies each pair into
//! an alignment tier, extracts shared terms and cognitive-level evidence, and
//! aggregates theme summaries and recommendations.

pub mod comparator;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod evidence;
pub mod export;
pub mod recommendations;
pub mod report;
pub mod scoring;
pub mod similarity;
pub mod taxonomy;

// Re-export commonly used types at the crate root.
pub use comparator::{Comparator, PairScore};
pub use config::{config_exists, load_config, CrosswalkConfig};
pub use embeddings::{Embedder, EmbeddingConfig};
pub use error::{CrosswalkError, Result};
pub use evidence::{CognitiveLevel, CognitiveTags};
pub use export::{export_report, ExportFormat};
pub use report::{
    ComparisonReport, CrosswalkCell, CrosswalkMatrix, MatchResult, StatementResult, Summary,
};
pub use scoring::{classify, AlignmentType};
pub use similarity::{SimilarityMode, SimilarityStrategy};
pub use taxonomy::{ReferenceStatement, Taxonomy, Theme};
