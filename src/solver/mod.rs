//! Mastermind solving engine
//!
//! Candidate elimination, guess selection and the round engine that plays a
//! session over the wire protocol.

mod candidates;
mod engine;
mod outcome;
pub mod strategy;

pub use candidates::CandidateSet;
pub use engine::{CancelToken, MAX_ROUNDS, Session, SessionConfig, State};
pub use outcome::{Outcome, SessionError, SessionReport, Step, exit_code};
pub use strategy::{DiversityStrategy, FirstCandidateStrategy, Strategy, StrategyType};
