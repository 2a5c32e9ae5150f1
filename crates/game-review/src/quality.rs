//! Move quality classification from raw engine scores.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality label for a single move.
///
/// Derived from the raw score the engine reports after the move. The
/// inherited convention treats larger positive scores as worse for the
/// side to move; no side-relative adjustment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveQuality {
    /// Score below the inaccuracy threshold.
    Good,
    /// Noticeable evaluation loss.
    Inaccuracy,
    /// Significant evaluation loss.
    Mistake,
    /// Major evaluation loss.
    Blunder,
}

impl MoveQuality {
    /// Classifies a score. Bands are checked from worst to best; the lower
    /// bound of each band is inclusive.
    pub fn from_score(score: i32) -> Self {
        if score >= 300 {
            MoveQuality::Blunder
        } else if score >= 100 {
            MoveQuality::Mistake
        } else if score >= 50 {
            MoveQuality::Inaccuracy
        } else {
            MoveQuality::Good
        }
    }
}

impl fmt::Display for MoveQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoveQuality::Good => "Good move",
            MoveQuality::Inaccuracy => "Inaccuracy",
            MoveQuality::Mistake => "Mistake",
            MoveQuality::Blunder => "Blunder",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(MoveQuality::from_score(49), MoveQuality::Good);
        assert_eq!(MoveQuality::from_score(50), MoveQuality::Inaccuracy);
        assert_eq!(MoveQuality::from_score(99), MoveQuality::Inaccuracy);
        assert_eq!(MoveQuality::from_score(100), MoveQuality::Mistake);
        assert_eq!(MoveQuality::from_score(299), MoveQuality::Mistake);
        assert_eq!(MoveQuality::from_score(300), MoveQuality::Blunder);
    }

    #[test]
    fn test_negative_scores_are_good() {
        assert_eq!(MoveQuality::from_score(-500), MoveQuality::Good);
        assert_eq!(MoveQuality::from_score(0), MoveQuality::Good);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(MoveQuality::Good.to_string(), "Good move");
        assert_eq!(MoveQuality::Inaccuracy.to_string(), "Inaccuracy");
        assert_eq!(MoveQuality::Mistake.to_string(), "Mistake");
        assert_eq!(MoveQuality::Blunder.to_string(), "Blunder");
    }

    #[test]
    fn test_serializes_as_snake_case() {
        let json = serde_json::to_string(&MoveQuality::Blunder).unwrap();
        assert_eq!(json, "\"blunder\"");
    }
}
