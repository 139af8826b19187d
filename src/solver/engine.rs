//! Round engine
//!
//! A session plays one game over a [`Transport`]:
//!
//! ```text
//! Init -> AwaitingResponse -> Evaluating -> AwaitingResponse -> ... -> Finished
//! ```
//!
//! Each round sends one guess and waits for exactly one response. Every
//! anomaly ends the session; there is no retransmission.

use super::outcome::{Outcome, SessionError, SessionReport, Step};
use super::{CandidateSet, Strategy};
use crate::core::Code;
use crate::protocol::{
    RESPONSE_LEN, ResponseLayout, Transport, decode_response, encode_request,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Default round budget
pub const MAX_ROUNDS: u32 = 35;

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Rounds allowed before the game counts as lost
    pub max_rounds: u32,
    /// Response frame layout spoken by the peer
    pub layout: ResponseLayout,
}

impl SessionConfig {
    #[must_use]
    pub const fn new(layout: ResponseLayout) -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            layout,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(ResponseLayout::default())
    }
}

/// Shared flag that aborts a session from another thread
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the session sends nothing afterwards
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Position in the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Init,
    AwaitingResponse,
    Evaluating,
    Finished,
}

/// One game against one peer
pub struct Session<'a, S: Strategy, T: Transport> {
    strategy: &'a S,
    transport: T,
    config: SessionConfig,
    candidates: CandidateSet,
    round: u32,
    state: State,
    outcome: Option<Outcome>,
    steps: Vec<Step>,
    cancel: CancelToken,
}

impl<'a, S: Strategy, T: Transport> Session<'a, S, T> {
    /// Create a session with a full candidate set
    #[must_use]
    pub fn new(strategy: &'a S, transport: T, config: SessionConfig) -> Self {
        Self {
            strategy,
            transport,
            config,
            candidates: CandidateSet::full(),
            round: 0,
            state: State::Init,
            outcome: None,
            steps: Vec::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Number of guesses sent so far
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Play until the session ends
    ///
    /// # Errors
    /// Returns `SessionError::Transport` if a frame cannot be sent or received.
    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        let outcome = loop {
            if let Some(outcome) = self.step()? {
                break outcome;
            }
        };

        Ok(SessionReport {
            outcome,
            steps: self.steps,
        })
    }

    /// Play a single round
    ///
    /// Returns the outcome once the session has ended. A finished session
    /// keeps returning its outcome and never touches the transport again.
    ///
    /// # Errors
    /// Returns `SessionError::Transport` if a frame cannot be sent or received.
    pub fn step(&mut self) -> Result<Option<Outcome>, SessionError> {
        if let Some(outcome) = self.outcome {
            return Ok(Some(outcome));
        }

        if self.cancel.is_cancelled() {
            return Ok(Some(self.finish(Outcome::Aborted { round: self.round })));
        }

        // Only reachable with a zero budget; later rounds stop in `evaluate`
        if self.round >= self.config.max_rounds {
            return Ok(Some(self.finish(Outcome::Exhausted { rounds: self.round })));
        }

        let Some(guess) = self.strategy.select_guess(&self.candidates) else {
            return Ok(Some(self.finish(Outcome::Inconsistent { round: self.round })));
        };

        self.round += 1;
        let frame = encode_request(guess);
        if let Err(source) = self.transport.send(&frame) {
            return self.transport_fault(source);
        }
        self.state = State::AwaitingResponse;
        debug!(round = self.round, %guess, frame = ?frame, "sent guess");

        let mut buf = [0u8; RESPONSE_LEN];
        if let Err(source) = self.transport.recv(&mut buf) {
            return self.transport_fault(source);
        }
        let byte = buf[0];
        debug!(round = self.round, byte = %format!("{byte:#04x}"), "received response");

        if self.cancel.is_cancelled() {
            return Ok(Some(self.finish(Outcome::Aborted { round: self.round })));
        }

        self.state = State::Evaluating;
        Ok(self.evaluate(guess, byte).map(|outcome| self.finish(outcome)))
    }

    fn evaluate(&mut self, guess: Code, byte: u8) -> Option<Outcome> {
        let round = self.round;
        let response = decode_response(byte, self.config.layout);

        // Local parity takes precedence over anything the frame claims
        if !response.parity_ok {
            return Some(Outcome::ParityFault { round, byte });
        }
        if let Some(error) = response.peer_error {
            return Some(Outcome::PeerError { round, error });
        }
        let Ok(feedback) = response.feedback() else {
            return Some(Outcome::Malformed { round, byte });
        };

        let candidates_before = self.candidates.len();
        let candidates_after = self.candidates.exclude(guess, feedback);
        self.steps.push(Step {
            round,
            guess,
            feedback,
            candidates_before,
            candidates_after,
        });
        debug!(round, %feedback, remaining = candidates_after, "excluded candidates");

        if feedback.is_solved() {
            Some(Outcome::Solved {
                rounds: round,
                code: guess,
            })
        } else if candidates_after == 0 {
            Some(Outcome::Inconsistent { round })
        } else if round >= self.config.max_rounds {
            Some(Outcome::Exhausted { rounds: round })
        } else {
            None
        }
    }

    fn transport_fault(&mut self, source: std::io::Error) -> Result<Option<Outcome>, SessionError> {
        let round = self.round;
        // A wait interrupted by cancellation is an abort, not a fault
        if self.cancel.is_cancelled() {
            return Ok(Some(self.finish(Outcome::Aborted { round })));
        }
        self.finish(Outcome::TransportFault { round });
        Err(SessionError::Transport { round, source })
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.state = State::Finished;
        self.outcome = Some(outcome);

        if outcome.is_solved() {
            info!(%outcome, "session finished");
        } else {
            warn!(%outcome, "session failed");
        }
        outcome
    }
}
