//! Explanatory evidence for a statement pair: shared key terms and
//! cognitive-level tags.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Function words ignored when extracting key terms.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "this", "that", "these", "those", "i",
    "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

/// Tokens this short or shorter are never key terms.
const MAX_IGNORED_LEN: usize = 2;

/// Extract the key terms of a statement.
///
/// Lowercases, splits on anything that is not a word character (letters,
/// digits, underscore), then drops stop words and tokens of two characters or
/// fewer.
pub fn key_terms(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() > MAX_IGNORED_LEN && !STOP_WORDS.contains(w))
        .map(String::from)
        .collect()
}

/// Key terms present in both statements.
pub fn common_terms(a: &str, b: &str) -> BTreeSet<String> {
    shared_terms(&key_terms(a), &key_terms(b))
}

/// Intersection of two precomputed key-term sets.
pub fn shared_terms(a: &BTreeSet<String>, b: &BTreeSet<String>) -> BTreeSet<String> {
    a.intersection(b).cloned().collect()
}

/// Level of cognitive demand implied by a statement's verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveLevel {
    Recall,
    Comprehension,
    Application,
    Analysis,
    Evaluation,
    Synthesis,
}

impl CognitiveLevel {
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Recall,
        CognitiveLevel::Comprehension,
        CognitiveLevel::Application,
        CognitiveLevel::Analysis,
        CognitiveLevel::Evaluation,
        CognitiveLevel::Synthesis,
    ];

    /// Verbs that mark a statement as demanding this level.
    pub fn trigger_verbs(&self) -> &'static [&'static str] {
        match self {
            CognitiveLevel::Recall => &[
                "define",
                "describe",
                "identify",
                "list",
                "name",
                "recall",
                "recognize",
                "state",
            ],
            CognitiveLevel::Comprehension => &[
                "explain",
                "summarize",
                "interpret",
                "classify",
                "compare",
                "contrast",
                "describe",
            ],
            CognitiveLevel::Application => &[
                "apply",
                "demonstrate",
                "execute",
                "implement",
                "solve",
                "use",
                "utilize",
            ],
            CognitiveLevel::Analysis => &[
                "analyze",
                "examine",
                "investigate",
                "compare",
                "differentiate",
                "distinguish",
            ],
            CognitiveLevel::Evaluation => &[
                "evaluate", "assess", "critique", "judge", "appraise", "examine",
            ],
            CognitiveLevel::Synthesis => &[
                "create",
                "design",
                "develop",
                "formulate",
                "generate",
                "produce",
                "construct",
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveLevel::Recall => "recall",
            CognitiveLevel::Comprehension => "comprehension",
            CognitiveLevel::Application => "application",
            CognitiveLevel::Analysis => "analysis",
            CognitiveLevel::Evaluation => "evaluation",
            CognitiveLevel::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-level tags for one statement. Always holds an entry for every level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CognitiveTags(BTreeMap<CognitiveLevel, bool>);

impl CognitiveTags {
    pub fn is_tagged(&self, level: CognitiveLevel) -> bool {
        self.0.get(&level).copied().unwrap_or(false)
    }

    /// Levels tagged true, in level order.
    pub fn tagged_levels(&self) -> Vec<CognitiveLevel> {
        self.0
            .iter()
            .filter(|(_, tagged)| **tagged)
            .map(|(level, _)| *level)
            .collect()
    }

    pub fn as_map(&self) -> &BTreeMap<CognitiveLevel, bool> {
        &self.0
    }

    /// True iff at least one level is tagged on both sides.
    pub fn aligns_with(&self, other: &CognitiveTags) -> bool {
        CognitiveLevel::ALL
            .iter()
            .any(|level| self.is_tagged(*level) && other.is_tagged(*level))
    }
}

/// Tag a statement with the cognitive levels its verbs imply.
///
/// Matching is by substring on the lowercased text, not by whole word, so
/// "use" also fires inside "because" and "state" inside "statements". This
/// permissive behaviour is kept on purpose; a whole-word match would change
/// alignment outcomes.
pub fn cognitive_tags(text: &str) -> CognitiveTags {
    let lowered = text.to_lowercase();
    CognitiveTags(
        CognitiveLevel::ALL
            .iter()
            .map(|level| {
                let tagged = level
                    .trigger_verbs()
                    .iter()
                    .any(|verb| lowered.contains(verb));
                (*level, tagged)
            })
            .collect(),
    )
}

/// True iff some level is tagged in both mappings.
pub fn cognitive_alignment(a: &CognitiveTags, b: &CognitiveTags) -> bool {
    a.aligns_with(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_stop_word_list_size() {
        assert_eq!(STOP_WORDS.len(), 50);
    }

    #[test]
    fn test_key_terms_filters_stop_words_and_short_tokens() {
        let terms = key_terms("The cell is an IMPORTANT unit of DNA and life");
        assert_eq!(terms, set(&["cell", "important", "unit", "dna", "life"]));
    }

    #[test]
    fn test_key_terms_splits_on_punctuation() {
        let terms = key_terms("questions/objectives, hypotheses; data-driven");
        assert_eq!(
            terms,
            set(&["questions", "objectives", "hypotheses", "data", "driven"])
        );
    }

    #[test]
    fn test_key_terms_empty_text() {
        assert!(key_terms("").is_empty());
        assert!(key_terms("   ,,, ").is_empty());
        assert!(key_terms("it is to be").is_empty());
    }

    #[test]
    fn test_common_terms() {
        let common = common_terms("analyze cellular data", "analyze cell information data");
        assert_eq!(common, set(&["analyze", "data"]));
    }

    #[test]
    fn test_common_terms_none() {
        assert!(common_terms("genetics", "ethics").is_empty());
        assert!(common_terms("", "").is_empty());
    }

    #[test]
    fn test_cognitive_tags_cover_all_levels() {
        let tags = cognitive_tags("");
        assert_eq!(tags.as_map().len(), 6);
        assert!(tags.tagged_levels().is_empty());
    }

    #[test]
    fn test_cognitive_tags_overlapping_verbs() {
        // "describe" triggers both recall and comprehension.
        let tags = cognitive_tags("Describe the peer review process");
        assert!(tags.is_tagged(CognitiveLevel::Recall));
        assert!(tags.is_tagged(CognitiveLevel::Comprehension));
        assert!(!tags.is_tagged(CognitiveLevel::Synthesis));
    }

    #[test]
    fn test_cognitive_tags_substring_match_is_permissive() {
        // "use" inside "because", "state" inside "statements".
        let tags = cognitive_tags("Because statements matter");
        assert!(tags.is_tagged(CognitiveLevel::Application));
        assert!(tags.is_tagged(CognitiveLevel::Recall));
    }

    #[test]
    fn test_cognitive_tags_case_insensitive() {
        let tags = cognitive_tags("EVALUATE new concepts");
        assert_eq!(tags.tagged_levels(), vec![CognitiveLevel::Evaluation]);
    }

    #[test]
    fn test_cognitive_alignment() {
        let a = cognitive_tags("Evaluate gaps in knowledge");
        let b = cognitive_tags("Critique and judge arguments");
        let c = cognitive_tags("Design experiments");
        assert!(cognitive_alignment(&a, &b));
        assert!(!cognitive_alignment(&a, &c));
        assert!(!cognitive_alignment(&cognitive_tags(""), &cognitive_tags("")));
    }

    #[test]
    fn test_cognitive_tags_serialize_as_map() {
        let tags = cognitive_tags("apply methods");
        let json = serde_json::to_value(&tags).unwrap();
        assert_eq!(json["application"], true);
        assert_eq!(json["synthesis"], false);
    }
}
