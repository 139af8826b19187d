//! Core domain types for Mastermind
//!
//! This module contains the fundamental domain types with zero external dependencies.
//! All types here are pure, testable, and have clear mathematical properties.

mod code;
mod feedback;

pub use code::{
    CODE_SPACE, COLORS, Code, CodeError, Digits, SLOTS, all_codes, decode, encode,
};
pub use feedback::{Feedback, score};
