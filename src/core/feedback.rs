//! Red/white feedback calculation
//!
//! Feedback is the pair of peg counts returned for a guess:
//! - red: digits matching in both color and position
//! - white: digits present in the secret but in another position,
//!   counted only among the positions that are not red

use super::code::{COLORS, Code, Digits, SLOTS};
use std::fmt;
use std::str::FromStr;

/// Peg counts for one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    red: u8,
    white: u8,
}

impl Feedback {
    /// All reds (secret found)
    pub const SOLVED: Self = Self {
        red: SLOTS as u8,
        white: 0,
    };

    /// Create feedback from peg counts
    ///
    /// Returns `None` unless `red + white <= 5`.
    #[must_use]
    pub const fn new(red: u8, white: u8) -> Option<Self> {
        if red as usize + white as usize <= SLOTS {
            Some(Self { red, white })
        } else {
            None
        }
    }

    /// Number of exact matches
    #[inline]
    #[must_use]
    pub const fn red(self) -> u8 {
        self.red
    }

    /// Number of color-only matches
    #[inline]
    #[must_use]
    pub const fn white(self) -> u8 {
        self.white
    }

    /// Check whether every slot matched
    #[inline]
    #[must_use]
    pub const fn is_solved(self) -> bool {
        self.red as usize == SLOTS
    }

    /// Calculate the feedback when `guess` is played against `secret`
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::{Code, Feedback};
    ///
    /// let guess = Code::from_digits([0, 0, 1, 2, 3]).unwrap();
    /// let secret = Code::from_digits([0, 1, 1, 1, 4]).unwrap();
    /// let feedback = Feedback::calculate(guess, secret);
    ///
    /// assert_eq!((feedback.red(), feedback.white()), (2, 0));
    /// ```
    #[must_use]
    pub fn calculate(guess: Code, secret: Code) -> Self {
        score(&guess.digits(), &secret.digits())
    }
}

/// Score `guess` against `secret`
///
/// # Algorithm
/// 1. First pass: count reds and pool the secret's colors at non-red positions
/// 2. Second pass: each non-red guess digit takes one matching color from the pool
///
/// A single pass would count a repeated guess color more than once.
#[must_use]
pub fn score(guess: &Digits, secret: &Digits) -> Feedback {
    let mut available = [0u8; COLORS as usize];
    let mut red = 0;

    for (&g, &s) in guess.iter().zip(secret) {
        if g == s {
            red += 1;
        } else {
            available[usize::from(s)] += 1;
        }
    }

    let mut white = 0;
    for (&g, &s) in guess.iter().zip(secret) {
        if g != s {
            let count = &mut available[usize::from(g)];
            if *count > 0 {
                *count -= 1;
                white += 1;
            }
        }
    }

    Feedback { red, white }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} red, {} white", self.red, self.white)
    }
}

impl FromStr for Feedback {
    type Err = String;

    /// Parse feedback typed as two counts, e.g. `"2 1"` or `"2,1"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let counts: Vec<u8> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| format!("Invalid feedback: {s}"))?;

        match counts.as_slice() {
            &[red, white] => {
                Self::new(red, white).ok_or_else(|| format!("Too many pegs in feedback: {s}"))
            }
            _ => Err(format!("Feedback needs a red and a white count: {s}")),
        }
    }
}
