//! Session outcomes and reports

use crate::core::{Code, Feedback};
use crate::protocol::PeerError;
use std::fmt;
use std::io;

/// Process exit codes a driver reports for each outcome class
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
    pub const PARITY_ERROR: u8 = 2;
    pub const GAME_LOST: u8 = 3;
    pub const MULTIPLE_ERRORS: u8 = 4;
}

/// Terminal state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The secret was guessed
    Solved { rounds: u32, code: Code },
    /// A response failed the local parity check
    ParityFault { round: u32, byte: u8 },
    /// The peer reported an error
    PeerError { round: u32, error: PeerError },
    /// The round budget ran out
    Exhausted { rounds: u32 },
    /// Feedback ruled out every code
    Inconsistent { round: u32 },
    /// A response passed parity but carried impossible counts
    Malformed { round: u32, byte: u8 },
    /// The transport failed
    TransportFault { round: u32 },
    /// The session was cancelled
    Aborted { round: u32 },
}

impl Outcome {
    /// Round in which the session ended
    #[must_use]
    pub const fn round(&self) -> u32 {
        match *self {
            Self::Solved { rounds, .. } | Self::Exhausted { rounds } => rounds,
            Self::ParityFault { round, .. }
            | Self::PeerError { round, .. }
            | Self::Inconsistent { round }
            | Self::Malformed { round, .. }
            | Self::TransportFault { round }
            | Self::Aborted { round } => round,
        }
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    /// Exit code following the classic client convention
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Solved { .. } => exit_code::SUCCESS,
            Self::ParityFault { .. }
            | Self::PeerError {
                error: PeerError::ParityError,
                ..
            } => exit_code::PARITY_ERROR,
            Self::Exhausted { .. }
            | Self::PeerError {
                error: PeerError::GameLost,
                ..
            } => exit_code::GAME_LOST,
            Self::PeerError {
                error: PeerError::MultipleErrors,
                ..
            } => exit_code::MULTIPLE_ERRORS,
            Self::Inconsistent { .. }
            | Self::Malformed { .. }
            | Self::TransportFault { .. }
            | Self::Aborted { .. } => exit_code::FAILURE,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved { rounds, code } => write!(f, "Solved {code} in {rounds} rounds"),
            Self::ParityFault { round, byte } => {
                write!(f, "Parity error in response {byte:#04x} (round {round})")
            }
            Self::PeerError { round, error } => write!(f, "{error} (round {round})"),
            Self::Exhausted { rounds } => write!(f, "Game lost after {rounds} rounds"),
            Self::Inconsistent { round } => {
                write!(f, "No code matches the feedback received (round {round})")
            }
            Self::Malformed { round, byte } => {
                write!(f, "Malformed response {byte:#04x} (round {round})")
            }
            Self::TransportFault { round } => write!(f, "Connection failed (round {round})"),
            Self::Aborted { round } => write!(f, "Session aborted (round {round})"),
        }
    }
}

/// One guess/feedback exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub round: u32,
    pub guess: Code,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Full record of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: Outcome,
    pub steps: Vec<Step>,
}

impl SessionReport {
    /// Number of rounds played
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.outcome.round()
    }
}

/// Errors that end a session outside the protocol
#[derive(Debug)]
pub enum SessionError {
    /// Sending or receiving a frame failed
    Transport { round: u32, source: io::Error },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { round, source } => {
                write!(f, "Transport failure in round {round}: {source}")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
        }
    }
}
