//! Wire protocol
//!
//! Parity-protected framing for guesses and answers, the transport seam the
//! round engine talks through, and the answering referee.

pub mod frame;
mod referee;
mod transport;

pub use frame::{
    FrameError, PeerError, REQUEST_LEN, RESPONSE_LEN, Response, ResponseLayout, decode_request,
    decode_response, encode_request, encode_response,
};
pub use referee::Referee;
pub use transport::{StreamTransport, Transport};
