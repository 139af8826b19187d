//! Request and response frames
//!
//! Request (2 bytes, little-endian word):
//! - bits 0-14: packed code
//! - bit 15: even parity over bits 0-14
//!
//! Response (1 byte):
//! - bits 0-2: red count
//! - bits 3-5: white count
//! - bits 6-7: depend on the [`ResponseLayout`]

use crate::core::{CODE_SPACE, Code, Feedback};
use std::fmt;
use std::str::FromStr;

/// Size of a request frame in bytes
pub const REQUEST_LEN: usize = 2;

/// Size of a response frame in bytes
pub const RESPONSE_LEN: usize = 1;

const REQUEST_PARITY_SHIFT: u32 = 15;
const CODE_MASK: u16 = CODE_SPACE - 1;

const COUNT_MASK: u8 = 0b111;
const WHITE_SHIFT: u32 = 3;
const ERROR_SHIFT: u32 = 6;
const PEER_ERROR_FLAG: u8 = 1 << ERROR_SHIFT;
const RESPONSE_PARITY_SHIFT: u32 = 7;
const RESPONSE_BODY_MASK: u8 = (1 << RESPONSE_PARITY_SHIFT) - 1;

/// Even parity bit of a 16-bit word
#[inline]
#[must_use]
pub const fn parity16(word: u16) -> u8 {
    (word.count_ones() & 1) as u8
}

/// Even parity bit of a byte
#[inline]
#[must_use]
pub const fn parity8(byte: u8) -> u8 {
    (byte.count_ones() & 1) as u8
}

/// How the two upper bits of a response byte are used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseLayout {
    /// Bit 7 is even parity over bits 0-6, bit 6 flags a peer-side parity error
    #[default]
    Checked,
    /// Bits 6-7 carry the full two-bit peer error class, no parity is sent
    Classic,
}

impl ResponseLayout {
    /// Name as accepted on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Checked => "checked",
            Self::Classic => "classic",
        }
    }
}

impl FromStr for ResponseLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checked" | "parity" => Ok(Self::Checked),
            "classic" => Ok(Self::Classic),
            _ => Err(format!("Unknown response layout: {s} (expected 'checked' or 'classic')")),
        }
    }
}

impl fmt::Display for ResponseLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error signaled by the answering peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerError {
    /// Peer received a request with bad parity
    ParityError = 1,
    /// Peer declared the game lost
    GameLost = 2,
    /// Parity error and game lost at once
    MultipleErrors = 3,
}

impl PeerError {
    /// Map a two-bit error class to a peer error; class 0 means no error
    #[must_use]
    pub const fn from_class(class: u8) -> Option<Self> {
        match class & 0b11 {
            1 => Some(Self::ParityError),
            2 => Some(Self::GameLost),
            3 => Some(Self::MultipleErrors),
            _ => None,
        }
    }

    /// Two-bit error class
    #[must_use]
    pub const fn class(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParityError => f.write_str("Parity error"),
            Self::GameLost => f.write_str("Game lost"),
            Self::MultipleErrors => f.write_str("Multiple errors"),
        }
    }
}

/// Framing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Request word whose parity bit does not match its code bits
    RequestParity { word: u16 },
    /// Response counts that cannot come from a real score
    MalformedFeedback { red: u8, white: u8 },
    /// Peer error that the layout has no room for
    UnsupportedError {
        error: PeerError,
        layout: ResponseLayout,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestParity { word } => {
                write!(f, "Request frame {word:#06x} failed the parity check")
            }
            Self::MalformedFeedback { red, white } => {
                write!(f, "Response carries impossible feedback ({red} red, {white} white)")
            }
            Self::UnsupportedError { error, layout } => {
                write!(f, "'{error}' cannot be sent with the {layout} layout")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Encode a guess as a request frame
///
/// # Examples
/// ```
/// use mastermind_solver::core::Code;
/// use mastermind_solver::protocol::encode_request;
///
/// // 83 = 0b101_0011 has four set bits, so the parity bit stays clear
/// let code = Code::new(83).unwrap();
/// assert_eq!(encode_request(code), [0x53, 0x00]);
/// ```
#[must_use]
pub const fn encode_request(code: Code) -> [u8; REQUEST_LEN] {
    let packed = code.packed();
    let word = packed | ((parity16(packed) as u16) << REQUEST_PARITY_SHIFT);
    word.to_le_bytes()
}

/// Decode a request frame, checking its parity
///
/// # Errors
/// Returns `FrameError::RequestParity` if the parity bit is wrong.
pub fn decode_request(bytes: [u8; REQUEST_LEN]) -> Result<Code, FrameError> {
    let word = u16::from_le_bytes(bytes);
    // Total weight including the parity bit must be even
    if parity16(word) != 0 {
        return Err(FrameError::RequestParity { word });
    }
    Code::new(word & CODE_MASK).map_err(|_| FrameError::RequestParity { word })
}

/// Decoded response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub red: u8,
    pub white: u8,
    pub peer_error: Option<PeerError>,
    pub parity_ok: bool,
}

impl Response {
    /// Two-bit error class (0 when the peer reported nothing)
    #[must_use]
    pub fn error_class(&self) -> u8 {
        self.peer_error.map_or(0, PeerError::class)
    }

    /// Validated feedback carried by the frame
    ///
    /// # Errors
    /// Returns `FrameError::MalformedFeedback` if the counts exceed five pegs.
    pub fn feedback(&self) -> Result<Feedback, FrameError> {
        Feedback::new(self.red, self.white).ok_or(FrameError::MalformedFeedback {
            red: self.red,
            white: self.white,
        })
    }
}

/// Decode a response byte
///
/// Parity is checked only in the checked layout; the classic layout reports
/// `parity_ok` unconditionally.
#[must_use]
pub const fn decode_response(byte: u8, layout: ResponseLayout) -> Response {
    let red = byte & COUNT_MASK;
    let white = (byte >> WHITE_SHIFT) & COUNT_MASK;

    match layout {
        ResponseLayout::Checked => Response {
            red,
            white,
            peer_error: if byte & PEER_ERROR_FLAG == 0 {
                None
            } else {
                Some(PeerError::ParityError)
            },
            parity_ok: parity8(byte & RESPONSE_BODY_MASK) == byte >> RESPONSE_PARITY_SHIFT,
        },
        ResponseLayout::Classic => Response {
            red,
            white,
            peer_error: PeerError::from_class(byte >> ERROR_SHIFT),
            parity_ok: true,
        },
    }
}

/// Encode a response byte
///
/// # Errors
/// Returns `FrameError::UnsupportedError` when the checked layout is asked to
/// carry anything but a parity error.
pub fn encode_response(
    feedback: Feedback,
    peer_error: Option<PeerError>,
    layout: ResponseLayout,
) -> Result<u8, FrameError> {
    let counts = feedback.red() | (feedback.white() << WHITE_SHIFT);

    match (layout, peer_error) {
        (ResponseLayout::Checked, None) => Ok(counts | (parity8(counts) << RESPONSE_PARITY_SHIFT)),
        (ResponseLayout::Checked, Some(PeerError::ParityError)) => {
            let body = counts | PEER_ERROR_FLAG;
            Ok(body | (parity8(body) << RESPONSE_PARITY_SHIFT))
        }
        (ResponseLayout::Checked, Some(error)) => {
            Err(FrameError::UnsupportedError { error, layout })
        }
        (ResponseLayout::Classic, error) => {
            let class = error.map_or(0, PeerError::class);
            Ok(counts | (class << ERROR_SHIFT))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::all_codes;

    fn feedback(red: u8, white: u8) -> Feedback {
        Feedback::new(red, white).unwrap()
    }

    #[test]
    fn parity_helpers() {
        assert_eq!(parity16(0), 0);
        assert_eq!(parity16(0b1), 1);
        assert_eq!(parity16(0b11), 0);
        assert_eq!(parity8(0x7f), 1);
        assert_eq!(parity8(0xff), 0);
    }

    #[test]
    fn request_frames_have_even_weight() {
        for code in all_codes() {
            let word = u16::from_le_bytes(encode_request(code));
            assert_eq!(word.count_ones() % 2, 0);
            assert_eq!(word & CODE_MASK, code.packed());
        }
    }

    #[test]
    fn request_parity_bit_set_for_odd_codes() {
        // [1,0,0,0,0] packs to 1: one set bit
        let code = Code::new(1).unwrap();
        assert_eq!(encode_request(code), [0x01, 0x80]);
        assert_eq!(decode_request([0x01, 0x80]), Ok(code));
    }

    #[test]
    fn request_single_bit_flips_are_detected() {
        let code = Code::from_digits([2, 5, 1, 6, 0]).unwrap();
        let frame = encode_request(code);
        assert_eq!(decode_request(frame), Ok(code));

        for bit in 0..16 {
            let word = u16::from_le_bytes(frame) ^ (1 << bit);
            assert!(
                matches!(
                    decode_request(word.to_le_bytes()),
                    Err(FrameError::RequestParity { .. })
                ),
                "flip of bit {bit} went unnoticed"
            );
        }
    }

    #[test]
    fn checked_response_round_trip() {
        for red in 0..=5 {
            for white in 0..=(5 - red) {
                let byte = encode_response(feedback(red, white), None, ResponseLayout::Checked)
                    .unwrap();
                let response = decode_response(byte, ResponseLayout::Checked);

                assert!(response.parity_ok);
                assert_eq!(response.peer_error, None);
                assert_eq!(response.feedback(), Ok(feedback(red, white)));
            }
        }
    }

    #[test]
    fn checked_response_single_bit_flips_fail_parity() {
        let byte = encode_response(feedback(2, 1), None, ResponseLayout::Checked).unwrap();
        for bit in 0..8 {
            let response = decode_response(byte ^ (1 << bit), ResponseLayout::Checked);
            assert!(!response.parity_ok, "flip of bit {bit} went unnoticed");
        }
    }

    #[test]
    fn checked_layout_carries_peer_parity_error_only() {
        let byte = encode_response(
            Feedback::default(),
            Some(PeerError::ParityError),
            ResponseLayout::Checked,
        )
        .unwrap();
        let response = decode_response(byte, ResponseLayout::Checked);

        assert!(response.parity_ok);
        assert_eq!(response.peer_error, Some(PeerError::ParityError));
        assert_eq!(response.error_class(), 1);

        assert_eq!(
            encode_response(
                Feedback::default(),
                Some(PeerError::GameLost),
                ResponseLayout::Checked
            ),
            Err(FrameError::UnsupportedError {
                error: PeerError::GameLost,
                layout: ResponseLayout::Checked,
            })
        );
    }

    #[test]
    fn checked_frame_can_fail_parity_and_flag_error() {
        // body 0b0100_0000 has odd weight, so a clear bit 7 is a parity failure
        let response = decode_response(0b0100_0000, ResponseLayout::Checked);
        assert!(!response.parity_ok);
        assert_eq!(response.peer_error, Some(PeerError::ParityError));
    }

    #[test]
    fn classic_layout_error_classes() {
        for (class, expected) in [
            (0, None),
            (1, Some(PeerError::ParityError)),
            (2, Some(PeerError::GameLost)),
            (3, Some(PeerError::MultipleErrors)),
        ] {
            let byte = 0b0000_1010 | (class << 6);
            let response = decode_response(byte, ResponseLayout::Classic);

            assert!(response.parity_ok);
            assert_eq!(response.peer_error, expected);
            assert_eq!(response.error_class(), class);
            assert_eq!((response.red, response.white), (2, 1));
            assert_eq!(
                encode_response(feedback(2, 1), expected, ResponseLayout::Classic),
                Ok(byte)
            );
        }
    }

    #[test]
    fn malformed_feedback_is_reported() {
        let response = decode_response(0b0011_0110, ResponseLayout::Classic);
        assert_eq!(
            response.feedback(),
            Err(FrameError::MalformedFeedback { red: 6, white: 6 })
        );
    }

    #[test]
    fn layout_parsing() {
        assert_eq!("checked".parse::<ResponseLayout>(), Ok(ResponseLayout::Checked));
        assert_eq!("classic".parse::<ResponseLayout>(), Ok(ResponseLayout::Classic));
        assert!("other".parse::<ResponseLayout>().is_err());
        assert_eq!(ResponseLayout::default(), ResponseLayout::Checked);
    }
}
