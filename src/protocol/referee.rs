//! Answering side of the protocol
//!
//! A referee holds the secret, scores each request frame and produces the
//! response frame. It doubles as an in-memory [`Transport`], which lets a
//! session run end to end without a network.

use super::frame::{
    FrameError, PeerError, REQUEST_LEN, RESPONSE_LEN, ResponseLayout, decode_request,
    encode_response,
};
use super::transport::Transport;
use crate::core::{Code, Feedback};
use std::io;

/// Scores guesses against a fixed secret
#[derive(Debug, Clone)]
pub struct Referee {
    secret: Code,
    layout: ResponseLayout,
    round_limit: Option<u32>,
    rounds: u32,
    pending: Option<u8>,
}

impl Referee {
    /// Create a referee for `secret` answering in `layout`
    #[must_use]
    pub const fn new(secret: Code, layout: ResponseLayout) -> Self {
        Self {
            secret,
            layout,
            round_limit: None,
            rounds: 0,
            pending: None,
        }
    }

    /// Declare the game lost when the guess numbered `limit` misses
    #[must_use]
    pub fn with_round_limit(mut self, limit: u32) -> Self {
        self.round_limit = Some(limit);
        self
    }

    /// The secret being guessed
    #[must_use]
    pub const fn secret(&self) -> Code {
        self.secret
    }

    /// Number of requests answered so far
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Answer one request frame
    ///
    /// A request with bad parity is answered with a peer parity error rather
    /// than rejected. In the `Checked` layout a lost game is not signaled and
    /// a lost game with bad parity is reported as a parity error.
    ///
    /// # Errors
    /// Returns `FrameError::UnsupportedError` if the resulting peer error
    /// cannot be expressed in the referee's layout.
    pub fn answer(&mut self, frame: [u8; REQUEST_LEN]) -> Result<u8, FrameError> {
        self.rounds += 1;

        let (feedback, parity_error) = match decode_request(frame) {
            Ok(guess) => (Feedback::calculate(guess, self.secret), false),
            Err(_) => (Feedback::default(), true),
        };

        let lost = !feedback.is_solved()
            && self.round_limit.is_some_and(|limit| self.rounds >= limit);

        let error = match (parity_error, lost) {
            (true, true) => Some(PeerError::MultipleErrors),
            (true, false) => Some(PeerError::ParityError),
            (false, true) => Some(PeerError::GameLost),
            (false, false) => None,
        };

        encode_response(feedback, self.representable(error), self.layout)
    }

    /// Reduce a peer error to what the layout can carry
    ///
    /// `Checked` only has a parity flag: a lost game is left to the client's
    /// own round budget.
    const fn representable(&self, error: Option<PeerError>) -> Option<PeerError> {
        match (self.layout, error) {
            (ResponseLayout::Checked, Some(PeerError::MultipleErrors | PeerError::ParityError)) => {
                Some(PeerError::ParityError)
            }
            (ResponseLayout::Checked, Some(PeerError::GameLost)) => None,
            (_, error) => error,
        }
    }
}

impl Transport for Referee {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        let frame: [u8; REQUEST_LEN] = frame.try_into().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("request frame must be {REQUEST_LEN} bytes, got {}", frame.len()),
            )
        })?;

        let response = self
            .answer(frame)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pending = Some(response);
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<()> {
        if buf.len() != RESPONSE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("response frame is {RESPONSE_LEN} byte, asked for {}", buf.len()),
            ));
        }

        let response = self.pending.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no request awaiting an answer")
        })?;
        buf[0] = response;
        Ok(())
    }
}
