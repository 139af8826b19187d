//! Mastermind code representation
//!
//! A code is five color digits in `0..8`. Its canonical packed form is a 15-bit
//! integer where digit `i` occupies bits `3i..=3i+2`, so every value in
//! `0..32768` names exactly one code.

use std::fmt;
use std::str::FromStr;

/// Number of slots in a code
pub const SLOTS: usize = 5;

/// Number of available colors per slot
pub const COLORS: u8 = 8;

/// Size of the code space (8^5)
pub const CODE_SPACE: u16 = 1 << (DIGIT_BITS * SLOTS as u32);

const DIGIT_BITS: u32 = 3;
const DIGIT_MASK: u16 = 0b111;

/// Digits of a code, slot 0 first
pub type Digits = [u8; SLOTS];

/// A packed Mastermind code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(u16);

/// Error type for invalid codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    OutOfRange(u16),
    InvalidColor(u8),
    InvalidLength(usize),
    InvalidCharacter(char),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(value) => {
                write!(f, "Packed code must be below {CODE_SPACE}, got {value}")
            }
            Self::InvalidColor(color) => {
                write!(f, "Color must be in 0..{COLORS}, got {color}")
            }
            Self::InvalidLength(len) => write!(f, "Code must have exactly {SLOTS} digits, got {len}"),
            Self::InvalidCharacter(ch) => write!(f, "Code contains invalid character '{ch}'"),
        }
    }
}

impl std::error::Error for CodeError {}

/// Split a packed value into its five color digits
///
/// # Examples
/// ```
/// use mastermind_solver::core::decode;
///
/// assert_eq!(decode(83), [3, 2, 1, 0, 0]);
/// ```
#[must_use]
pub const fn decode(packed: u16) -> Digits {
    let mut digits = [0u8; SLOTS];
    let mut i = 0;
    while i < SLOTS {
        digits[i] = ((packed >> (DIGIT_BITS * i as u32)) & DIGIT_MASK) as u8;
        i += 1;
    }
    digits
}

/// Pack five color digits into a 15-bit value
///
/// Only the low three bits of each digit are used.
#[must_use]
pub const fn encode(digits: Digits) -> u16 {
    let mut packed = 0u16;
    let mut i = 0;
    while i < SLOTS {
        packed |= (digits[i] as u16 & DIGIT_MASK) << (DIGIT_BITS * i as u32);
        i += 1;
    }
    packed
}

/// Iterate over the whole code space in ascending packed order
///
/// The iterator is cheap to clone, so it can be restarted at will.
pub fn all_codes() -> impl Iterator<Item = Code> + Clone {
    (0..CODE_SPACE).map(Code)
}

impl Code {
    /// Create a code from its packed value
    ///
    /// # Errors
    /// Returns `CodeError::OutOfRange` if `packed >= 32768`.
    pub const fn new(packed: u16) -> Result<Self, CodeError> {
        if packed < CODE_SPACE {
            Ok(Self(packed))
        } else {
            Err(CodeError::OutOfRange(packed))
        }
    }

    /// Create the code at `index` in the code space, wrapping modulo 32768
    ///
    /// Total counterpart of [`Code::new`] for indices already known to be in
    /// range, such as values drawn from `0..CODE_SPACE`.
    #[inline]
    #[must_use]
    pub const fn from_index(index: u16) -> Self {
        Self(index % CODE_SPACE)
    }

    /// Create a code from its digits
    ///
    /// # Errors
    /// Returns `CodeError::InvalidColor` if any digit is 8 or more.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::Code;
    ///
    /// let code = Code::from_digits([2, 5, 1, 6, 0]).unwrap();
    /// assert_eq!(code.digits(), [2, 5, 1, 6, 0]);
    /// assert!(Code::from_digits([8, 0, 0, 0, 0]).is_err());
    /// ```
    pub fn from_digits(digits: Digits) -> Result<Self, CodeError> {
        if let Some(&color) = digits.iter().find(|&&d| d >= COLORS) {
            return Err(CodeError::InvalidColor(color));
        }
        Ok(Self(encode(digits)))
    }

    /// Get the packed 15-bit value
    #[inline]
    #[must_use]
    pub const fn packed(self) -> u16 {
        self.0
    }

    /// Get the color digits, slot 0 first
    #[inline]
    #[must_use]
    pub const fn digits(self) -> Digits {
        decode(self.0)
    }

    /// Number of distinct colors used by this code (1-5)
    #[must_use]
    pub const fn distinct_colors(self) -> u32 {
        let digits = self.digits();
        let mut seen = 0u8;
        let mut i = 0;
        while i < SLOTS {
            seen |= 1 << digits[i];
            i += 1;
        }
        seen.count_ones()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.digits();
        write!(f, "{a} {b} {c} {d} {e}")
    }
}

impl FromStr for Code {
    type Err = CodeError;

    /// Parse a code from its digits, e.g. `"25160"` or `"2 5 1 6 0"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();

        if chars.len() != SLOTS {
            return Err(CodeError::InvalidLength(chars.len()));
        }

        let mut digits = [0u8; SLOTS];
        for (slot, ch) in digits.iter_mut().zip(chars) {
            let value = ch.to_digit(10).ok_or(CodeError::InvalidCharacter(ch))?;
            *slot = u8::try_from(value).map_err(|_| CodeError::InvalidCharacter(ch))?;
        }

        Self::from_digits(digits)
    }
}
