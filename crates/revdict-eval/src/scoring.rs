//! Rank finding and top-N crediting

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome label for one scored case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "n", rename_all = "snake_case")]
pub enum Outcome {
    /// Expected answer ranked first
    Correct,
    /// Expected answer ranked within the smallest threshold `n` above its position
    InTop(usize),
    /// No expected answer within the largest threshold
    Wrong,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Correct => write!(f, "CORRECT"),
            Outcome::InTop(n) => write!(f, "IN_TOP_{}", n),
            Outcome::Wrong => write!(f, "WRONG"),
        }
    }
}

/// Position of the first candidate matching any expected answer, scanning at
/// most `window` candidates
pub fn find_rank(candidates: &[String], expected: &[String], window: usize) -> Option<usize> {
    candidates
        .iter()
        .take(window)
        .position(|c| expected.iter().any(|e| e == c))
}

/// Label a rank against sorted, deduplicated thresholds
pub fn classify(rank: Option<usize>, thresholds: &[usize]) -> Outcome {
    match rank {
        Some(0) => Outcome::Correct,
        Some(i) => thresholds
            .iter()
            .find(|&&n| n > i)
            .map(|&n| Outcome::InTop(n))
            .unwrap_or(Outcome::Wrong),
        None => Outcome::Wrong,
    }
}

/// Thresholds credited by a match at `rank`: every `N > rank`
pub fn credited(rank: Option<usize>, thresholds: &[usize]) -> Vec<usize> {
    match rank {
        Some(i) => thresholds.iter().copied().filter(|&n| n > i).collect(),
        None => Vec::new(),
    }
}
