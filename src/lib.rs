//! Mastermind Solver
//!
//! A Mastermind solver for 5 slots and 8 colors that plays against a remote
//! referee over a parity-checked binary protocol.
//!
//! # Quick Start
//!
//! ```rust
//! use mastermind_solver::core::{Code, Feedback};
//!
//! // Create codes
//! let guess: Code = "3 2 1 0 0".parse().unwrap();
//! let secret: Code = "2 5 1 6 0".parse().unwrap();
//!
//! // Score the guess
//! let feedback = Feedback::calculate(guess, secret);
//! assert_eq!((feedback.red(), feedback.white()), (2, 1));
//! ```

// Core domain types
pub mod core;

// Candidate elimination and the round engine
pub mod solver;

// Wire framing and transports
pub mod protocol;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
