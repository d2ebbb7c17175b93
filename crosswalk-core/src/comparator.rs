//! Comparison engine: scores institutional statements against every reference
//! statement and aggregates the crosswalk report.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use crate::config::CrosswalkConfig;
use crate::embeddings::EmbeddingConfig;
use crate::error::Result;
use crate::evidence::{cognitive_tags, key_terms, shared_terms, CognitiveTags};
use crate::recommendations::{self, FrameworkWording};
use crate::report::{
    ComparisonReport, CrosswalkCell, CrosswalkMatrix, MatchResult, StatementResult, Summary,
};
use crate::scoring::{classify, AlignmentType};
use crate::similarity::{build_strategy, LexicalSimilarity, SimilarityMode, SimilarityStrategy};
use crate::taxonomy::{Taxonomy, Theme};

/// Evidence for one reference statement, computed once at construction.
#[derive(Debug, Clone)]
struct ReferenceProfile {
    key_terms: BTreeSet<String>,
    cognitive_tags: CognitiveTags,
}

/// Score and evidence for an ad-hoc statement pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    pub similarity: f64,
    pub alignment_score: f64,
    pub alignment_type: AlignmentType,
    pub shared_terms: BTreeSet<String>,
    pub cognitive_alignment: bool,
    pub institutional_cognitive_tags: CognitiveTags,
    pub reference_cognitive_tags: CognitiveTags,
}

/// The comparison engine. Holds the reference taxonomy and the similarity
/// strategy chosen at construction; both are read-only afterwards.
pub struct Comparator {
    taxonomy: Taxonomy,
    profiles: Vec<ReferenceProfile>,
    strategy: Box<dyn SimilarityStrategy>,
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("framework", &self.taxonomy.name())
            .field("reference_statements", &self.taxonomy.len())
            .field("mode", &self.strategy.mode())
            .field("provider", &self.strategy.provider_name())
            .finish()
    }
}

impl Comparator {
    /// Build an engine, selecting the similarity strategy from `embedding`.
    pub fn new(taxonomy: Taxonomy, embedding: &EmbeddingConfig) -> Self {
        Self::with_strategy(taxonomy, build_strategy(embedding))
    }

    /// Build an engine that always uses lexical similarity.
    pub fn lexical(taxonomy: Taxonomy) -> Self {
        Self::with_strategy(taxonomy, Box::new(LexicalSimilarity))
    }

    /// Build an engine around an explicit strategy.
    pub fn with_strategy(taxonomy: Taxonomy, strategy: Box<dyn SimilarityStrategy>) -> Self {
        let profiles = taxonomy
            .statements()
            .iter()
            .map(|s| ReferenceProfile {
                key_terms: key_terms(&s.text),
                cognitive_tags: cognitive_tags(&s.text),
            })
            .collect();

        tracing::info!(
            framework = taxonomy.name(),
            reference_statements = taxonomy.len(),
            mode = %strategy.mode(),
            provider = strategy.provider_name(),
            "Comparison engine ready"
        );

        Self {
            taxonomy,
            profiles,
            strategy,
        }
    }

    /// Build an engine from loaded configuration: custom taxonomy if one is
    /// configured, otherwise the built-in framework.
    pub fn from_config(config: &CrosswalkConfig) -> Result<Self> {
        let taxonomy = match &config.taxonomy.path {
            Some(path) => Taxonomy::from_path(path)?,
            None => Taxonomy::builtin(),
        };
        Ok(Self::new(taxonomy, &config.similarity))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Similarity mode in effect for every call on this engine.
    pub fn mode(&self) -> SimilarityMode {
        self.strategy.mode()
    }

    pub fn provider_name(&self) -> &str {
        self.strategy.provider_name()
    }

    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        self.strategy.similarity(a, b)
    }

    /// Score a single pair with full evidence.
    pub fn score_pair(&self, institutional: &str, reference: &str) -> PairScore {
        let similarity = self.strategy.similarity(institutional, reference);
        let (alignment_score, alignment_type) = classify(similarity);
        let institutional_tags = cognitive_tags(institutional);
        let reference_tags = cognitive_tags(reference);
        PairScore {
            similarity,
            alignment_score,
            alignment_type,
            shared_terms: shared_terms(&key_terms(institutional), &key_terms(reference)),
            cognitive_alignment: institutional_tags.aligns_with(&reference_tags),
            institutional_cognitive_tags: institutional_tags,
            reference_cognitive_tags: reference_tags,
        }
    }

    /// Compare institutional statements against the whole taxonomy.
    ///
    /// Each pair is scored exactly once; that one score feeds the sorted match
    /// lists, the theme aggregates, and the crosswalk matrix. An empty input
    /// yields a report with zeroed aggregates and an empty matrix.
    pub fn compare<S: AsRef<str>>(&self, statements: &[S]) -> ComparisonReport {
        let started = Instant::now();
        let statements: Vec<&str> = statements.iter().map(|s| s.as_ref()).collect();
        let references = self.taxonomy.statements();
        let reference_texts: Vec<&str> = references.iter().map(|r| r.text.as_str()).collect();

        let scores = if statements.is_empty() {
            Vec::new()
        } else {
            self.strategy.similarity_matrix(&statements, &reference_texts)
        };

        let mut theme_breakdown: BTreeMap<Theme, Vec<f64>> =
            Theme::ALL.iter().map(|t| (*t, Vec::new())).collect();

        // Match lists in reference order; sorted only after the matrix is built.
        let mut rows: Vec<Vec<MatchResult>> = Vec::with_capacity(statements.len());
        for (j, statement) in statements.iter().enumerate() {
            let terms = key_terms(statement);
            let tags = cognitive_tags(statement);
            let mut row = Vec::with_capacity(references.len());

            for (i, (reference, profile)) in references.iter().zip(&self.profiles).enumerate() {
                let raw_similarity = scores[j][i];
                let (alignment_score, alignment_type) = classify(raw_similarity);
                theme_breakdown
                    .entry(reference.theme)
                    .or_default()
                    .push(raw_similarity);

                row.push(MatchResult {
                    reference_index: i,
                    reference: reference.clone(),
                    raw_similarity,
                    alignment_score,
                    alignment_type,
                    shared_terms: shared_terms(&terms, &profile.key_terms),
                    cognitive_alignment: tags.aligns_with(&profile.cognitive_tags),
                    institutional_cognitive_tags: tags.clone(),
                    reference_cognitive_tags: profile.cognitive_tags.clone(),
                });
            }
            rows.push(row);
        }

        let mut cells = Vec::with_capacity(references.len() * statements.len());
        for i in 0..references.len() {
            for (j, row) in rows.iter().enumerate() {
                cells.push(CrosswalkCell::from_match(&row[i], j));
            }
        }

        let results: Vec<StatementResult> = statements
            .iter()
            .zip(rows)
            .map(|(statement, mut matches)| {
                matches.sort_by(|a, b| b.raw_similarity.total_cmp(&a.raw_similarity));
                let best_match = matches.first().cloned();
                if let Some(best) = &best_match {
                    tracing::debug!(
                        statement = %statement,
                        best_reference = best.reference_index,
                        similarity = best.raw_similarity,
                        alignment = %best.alignment_type,
                        "Scored institutional statement"
                    );
                }
                StatementResult {
                    institutional_statement: statement.to_string(),
                    matches,
                    best_match,
                }
            })
            .collect();

        let summary = self.summarize(statements.len(), &theme_breakdown);
        let recommendations = recommendations::generate(
            &FrameworkWording::for_taxonomy(self.taxonomy.name()),
            &summary.theme_averages,
            summary.overall_alignment,
        );

        tracing::info!(
            statements = statements.len(),
            references = references.len(),
            overall_alignment = summary.overall_alignment,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Comparison complete"
        );

        ComparisonReport {
            framework: self.taxonomy.name().to_string(),
            summary,
            results,
            theme_breakdown,
            crosswalk: CrosswalkMatrix {
                reference_statements: references.to_vec(),
                institutional_statements: statements.iter().map(|s| s.to_string()).collect(),
                cells,
            },
            recommendations,
        }
    }

    fn summarize(&self, total: usize, breakdown: &BTreeMap<Theme, Vec<f64>>) -> Summary {
        let theme_averages: BTreeMap<Theme, f64> = Theme::ALL
            .iter()
            .map(|theme| {
                let average = breakdown.get(theme).map(|v| mean(v)).unwrap_or(0.0);
                (*theme, round3(average))
            })
            .collect();

        let all_scores: Vec<f64> = breakdown.values().flatten().copied().collect();
        let overall_alignment = round3(mean(&all_scores));

        // Only themes that received at least one score compete.
        let scored: Vec<(Theme, f64)> = Theme::ALL
            .iter()
            .filter(|t| breakdown.get(*t).is_some_and(|v| !v.is_empty()))
            .map(|t| (*t, theme_averages[t]))
            .collect();

        let mut strongest: Option<(Theme, f64)> = None;
        let mut weakest: Option<(Theme, f64)> = None;
        for &(theme, average) in &scored {
            if strongest.is_none_or(|(_, best)| average > best) {
                strongest = Some((theme, average));
            }
            if weakest.is_none_or(|(_, worst)| average < worst) {
                weakest = Some((theme, average));
            }
        }

        Summary {
            total_statements_analyzed: total,
            similarity_mode: self.strategy.mode(),
            overall_alignment,
            theme_averages,
            strongest_theme: strongest.map(|(t, _)| t),
            weakest_theme: weakest.map(|(t, _)| t),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Round to 3 decimals, the precision aggregates are reported at.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
