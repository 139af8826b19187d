//! Frame transport abstraction
//!
//! The round engine only needs to push fixed-size frames out and pull
//! fixed-size frames in, strictly in order.

use std::io::{self, Read, Write};

/// Reliable, ordered delivery of fixed-size frames
pub trait Transport {
    /// Send a whole frame
    ///
    /// # Errors
    /// Returns the underlying I/O error if the frame could not be written.
    fn send(&mut self, frame: &[u8]) -> io::Result<()>;

    /// Fill `buf` with the next frame
    ///
    /// # Errors
    /// Returns an error on a short read or a closed connection.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).send(frame)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<()> {
        (**self).recv(buf)
    }
}

/// Transport over any byte stream (e.g. a `TcpStream`)
///
/// Partial reads and writes are retried until the whole frame is through.
pub struct StreamTransport<S> {
    stream: S,
}

impl<S: Read + Write> StreamTransport<S> {
    /// Wrap a connected stream
    pub const fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Give back the wrapped stream
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        self.stream.write_all(frame)?;
        self.stream.flush()
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.stream.read_exact(buf)
    }
}
