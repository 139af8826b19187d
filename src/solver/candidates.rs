//! Live candidate tracking
//!
//! The candidate set starts as the whole code space and only ever shrinks.

use crate::core::{CODE_SPACE, Code, Feedback, all_codes, score};

/// Codes still consistent with every observed feedback
///
/// Kept in ascending packed order, which is the order guess selection scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    live: Vec<Code>,
}

impl CandidateSet {
    /// Candidate set holding the entire code space
    #[must_use]
    pub fn full() -> Self {
        let mut live = Vec::with_capacity(usize::from(CODE_SPACE));
        live.extend(all_codes());
        Self { live }
    }

    /// Restore the entire code space
    pub fn reset(&mut self) {
        self.live.clear();
        self.live.extend(all_codes());
    }

    /// Number of live codes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// True once every code has been ruled out
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Check whether `code` is still live
    #[must_use]
    pub fn contains(&self, code: Code) -> bool {
        self.live.binary_search(&code).is_ok()
    }

    /// Live codes in ascending packed order
    pub fn iter(&self) -> impl Iterator<Item = Code> + '_ {
        self.live.iter().copied()
    }

    /// Live codes as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Code] {
        &self.live
    }

    /// Drop every code that would not have produced `observed` for `guess`
    ///
    /// One pass over the live codes. Returns the number left.
    pub fn exclude(&mut self, guess: Code, observed: Feedback) -> usize {
        let guess = guess.digits();
        self.live
            .retain(|candidate| score(&guess, &candidate.digits()) == observed);
        self.live.len()
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(digits: [u8; 5]) -> Code {
        Code::from_digits(digits).unwrap()
    }

    #[test]
    fn starts_with_whole_space() {
        let set = CandidateSet::full();
        assert_eq!(set.len(), usize::from(CODE_SPACE));
        assert!(set.contains(Code::new(0).unwrap()));
        assert!(set.contains(Code::new(CODE_SPACE - 1).unwrap()));
    }

    #[test]
    fn exclude_is_sound() {
        let mut set = CandidateSet::full();
        let guess = code([3, 2, 1, 0, 0]);
        let observed = Feedback::new(1, 2).unwrap();

        set.exclude(guess, observed);

        assert!(!set.is_empty());
        assert!(
            set.iter()
                .all(|c| Feedback::calculate(guess, c) == observed)
        );
    }

    #[test]
    fn exclude_is_monotone_and_keeps_secret() {
        let secret = code([2, 5, 1, 6, 0]);
        let mut set = CandidateSet::full();
        let mut previous = set.len();

        for guess in [code([3, 2, 1, 0, 0]), code([0, 1, 2, 3, 4]), code([5, 5, 6, 6, 7])] {
            let remaining = set.exclude(guess, Feedback::calculate(guess, secret));

            assert!(remaining <= previous);
            assert!(set.contains(secret));
            previous = remaining;
        }
    }

    #[test]
    fn solved_feedback_leaves_only_the_guess() {
        let mut set = CandidateSet::full();
        let guess = code([7, 0, 7, 0, 7]);

        assert_eq!(set.exclude(guess, Feedback::SOLVED), 1);
        assert_eq!(set.as_slice(), &[guess]);
    }

    #[test]
    fn contradictory_feedback_empties_the_set() {
        let mut set = CandidateSet::full();
        let guess = code([0, 0, 0, 0, 0]);

        // Only one color in play, so no code can score whites against it
        assert_eq!(set.exclude(guess, Feedback::new(0, 3).unwrap()), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn stays_sorted_and_resets() {
        let mut set = CandidateSet::full();
        set.exclude(code([0, 1, 2, 3, 4]), Feedback::new(2, 2).unwrap());

        assert!(set.as_slice().windows(2).all(|w| w[0] < w[1]));

        set.reset();
        assert_eq!(set, CandidateSet::full());
    }
}
