//! Result types produced by a comparison.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::evidence::CognitiveTags;
use crate::scoring::AlignmentType;
use crate::similarity::SimilarityMode;
use crate::taxonomy::{ReferenceStatement, Theme};

/// Score and evidence for one (institutional, reference) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Position of the reference statement in the flattened taxonomy.
    pub reference_index: usize,
    pub reference: ReferenceStatement,
    pub raw_similarity: f64,
    pub alignment_score: f64,
    pub alignment_type: AlignmentType,
    pub shared_terms: BTreeSet<String>,
    pub cognitive_alignment: bool,
    pub institutional_cognitive_tags: CognitiveTags,
    pub reference_cognitive_tags: CognitiveTags,
}

/// All matches of one institutional statement, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    pub institutional_statement: String,
    pub matches: Vec<MatchResult>,
    pub best_match: Option<MatchResult>,
}

/// Aggregate figures of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_statements_analyzed: usize,
    pub similarity_mode: SimilarityMode,
    /// Mean of every raw similarity, rounded to 3 decimals.
    pub overall_alignment: f64,
    /// Mean raw similarity per theme, rounded to 3 decimals. Every theme is
    /// present; unscored themes report 0.0.
    pub theme_averages: BTreeMap<Theme, f64>,
    pub strongest_theme: Option<Theme>,
    pub weakest_theme: Option<Theme>,
}

/// One cell of the crosswalk matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosswalkCell {
    pub reference_index: usize,
    pub institutional_index: usize,
    pub similarity: f64,
    pub alignment_score: f64,
    pub alignment_type: AlignmentType,
    pub shared_terms: BTreeSet<String>,
    pub cognitive_alignment: bool,
}

impl CrosswalkCell {
    /// Cell view of a match made by institutional statement `institutional_index`.
    pub fn from_match(m: &MatchResult, institutional_index: usize) -> Self {
        Self {
            reference_index: m.reference_index,
            institutional_index,
            similarity: m.raw_similarity,
            alignment_score: m.alignment_score,
            alignment_type: m.alignment_type,
            shared_terms: m.shared_terms.clone(),
            cognitive_alignment: m.cognitive_alignment,
        }
    }
}

/// Reference × institutional grid. Cells are stored row-major by reference
/// index, so cell `(i, j)` lives at `i * institutional_len + j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosswalkMatrix {
    pub reference_statements: Vec<ReferenceStatement>,
    pub institutional_statements: Vec<String>,
    pub cells: Vec<CrosswalkCell>,
}

impl CrosswalkMatrix {
    /// Cell for reference `i` and institutional statement `j`.
    pub fn cell(&self, reference_index: usize, institutional_index: usize) -> Option<&CrosswalkCell> {
        let width = self.institutional_statements.len();
        if reference_index >= self.reference_statements.len() || institutional_index >= width {
            return None;
        }
        self.cells.get(reference_index * width + institutional_index)
    }

    /// Cells of one reference row, in institutional order.
    pub fn row(&self, reference_index: usize) -> &[CrosswalkCell] {
        let width = self.institutional_statements.len();
        let start = reference_index * width;
        self.cells.get(start..start + width).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Full outcome of one `compare` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Name of the reference framework the statements were scored against.
    pub framework: String,
    pub summary: Summary,
    pub results: Vec<StatementResult>,
    /// Raw similarity values per theme, in scoring order.
    pub theme_breakdown: BTreeMap<Theme, Vec<f64>>,
    pub crosswalk: CrosswalkMatrix,
    pub recommendations: Vec<String>,
}

impl ComparisonReport {
    /// Best match of every institutional statement, in input order.
    pub fn best_matches(&self) -> impl Iterator<Item = (&str, Option<&MatchResult>)> {
        self.results
            .iter()
            .map(|r| (r.institutional_statement.as_str(), r.best_match.as_ref()))
    }

    /// Number of pairs per alignment tier across the whole crosswalk.
    pub fn tier_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for cell in &self.crosswalk.cells {
            *counts.entry(cell.alignment_type.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
