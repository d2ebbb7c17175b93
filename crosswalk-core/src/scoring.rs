//! Similarity → alignment tier classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Similarity at or above which a pair counts as fully aligned.
pub const FULL_THRESHOLD: f64 = 0.7;
/// Similarity at or above which a pair counts as partially aligned.
pub const PARTIAL_THRESHOLD: f64 = 0.5;

/// Discrete alignment tier of a statement pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignmentType {
    None,
    Partial,
    Full,
}

impl AlignmentType {
    /// Coarse alignment weight of the tier.
    pub fn score(&self) -> f64 {
        match self {
            AlignmentType::None => 0.0,
            AlignmentType::Partial => 0.5,
            AlignmentType::Full => 1.0,
        }
    }

    /// Traffic-light colour used when rendering a crosswalk cell.
    pub fn color(&self) -> &'static str {
        match self {
            AlignmentType::None => "red",
            AlignmentType::Partial => "yellow",
            AlignmentType::Full => "green",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentType::None => "None",
            AlignmentType::Partial => "Partial",
            AlignmentType::Full => "Full",
        }
    }
}

impl fmt::Display for AlignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw similarity to `(alignment_score, alignment_type)`.
///
/// Lower bounds are inclusive and the value is compared unrounded.
pub fn classify(similarity: f64) -> (f64, AlignmentType) {
    let tier = if similarity >= FULL_THRESHOLD {
        AlignmentType::Full
    } else if similarity >= PARTIAL_THRESHOLD {
        AlignmentType::Partial
    } else {
        AlignmentType::None
    };
    (tier.score(), tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_full_at_threshold() {
        assert_eq!(classify(0.7), (1.0, AlignmentType::Full));
        assert_eq!(classify(1.0), (1.0, AlignmentType::Full));
    }

    #[test]
    fn test_classify_partial_band() {
        assert_eq!(classify(0.6999), (0.5, AlignmentType::Partial));
        assert_eq!(classify(0.5), (0.5, AlignmentType::Partial));
    }

    #[test]
    fn test_classify_none_band() {
        assert_eq!(classify(0.4999), (0.0, AlignmentType::None));
        assert_eq!(classify(0.0), (0.0, AlignmentType::None));
    }

    #[test]
    fn test_classify_does_not_round() {
        assert_eq!(classify(0.69999999).1, AlignmentType::Partial);
        assert_eq!(classify(0.49999999).1, AlignmentType::None);
    }

    #[test]
    fn test_colors() {
        assert_eq!(AlignmentType::Full.color(), "green");
        assert_eq!(AlignmentType::Partial.color(), "yellow");
        assert_eq!(AlignmentType::None.color(), "red");
    }

    #[test]
    fn test_alignment_type_serializes_as_name() {
        let json = serde_json::to_string(&AlignmentType::Partial).unwrap();
        assert_eq!(json, "\"Partial\"");
    }
}
