//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations.

use super::CandidateSet;
use crate::core::Code;

/// A strategy for selecting the next guess from the live candidates
pub trait Strategy {
    /// Select the next guess
    ///
    /// Returns `None` if no candidates remain.
    fn select_guess(&self, candidates: &CandidateSet) -> Option<Code>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    /// Color-diversity heuristic (default)
    Diversity(DiversityStrategy),
    /// Lowest live candidate
    First(FirstCandidateStrategy),
}

impl Strategy for StrategyType {
    fn select_guess(&self, candidates: &CandidateSet) -> Option<Code> {
        match self {
            Self::Diversity(s) => s.select_guess(candidates),
            Self::First(s) => s.select_guess(candidates),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "diversity", "first"
    /// Defaults to diversity if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "first" | "naive" => Self::First(FirstCandidateStrategy),
            _ => Self::Diversity(DiversityStrategy::default()),
        }
    }

    /// Override the diversity threshold (no effect on other strategies)
    #[must_use]
    pub const fn with_threshold(self, threshold: u32) -> Self {
        match self {
            Self::Diversity(_) => Self::Diversity(DiversityStrategy::new(threshold)),
            other => other,
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Diversity(_) => "diversity",
            Self::First(_) => "first",
        }
    }
}

/// Color-diversity heuristic
///
/// Scans live candidates in ascending order, tracking the highest number of
/// distinct colors seen so far. The last candidate that reached the running
/// best is the guess; the scan stops as soon as the running best reaches
/// `threshold`.
///
/// Diverse guesses tend to split the remaining candidates evenly, and the
/// scan stays linear in the number of live codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiversityStrategy {
    /// Stop scanning once a candidate with this many distinct colors is seen
    pub threshold: u32,
}

impl DiversityStrategy {
    pub const DEFAULT_THRESHOLD: u32 = 4;

    /// Create a new diversity strategy
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self { threshold }
    }
}

impl Default for DiversityStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl Strategy for DiversityStrategy {
    fn select_guess(&self, candidates: &CandidateSet) -> Option<Code> {
        let mut best = 0;
        let mut selected = None;

        for candidate in candidates.iter() {
            let distinct = candidate.distinct_colors();
            best = best.max(distinct);
            if distinct >= best {
                selected = Some(candidate);
            }
            if best >= self.threshold {
                break;
            }
        }

        selected
    }
}

/// Naive strategy
///
/// Always guesses the lowest live candidate. Useful as a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstCandidateStrategy;

impl Strategy for FirstCandidateStrategy {
    fn select_guess(&self, candidates: &CandidateSet) -> Option<Code> {
        candidates.iter().next()
    }
}
