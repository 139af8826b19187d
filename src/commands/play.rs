//! Remote play command
//!
//! Connects to a game server over TCP and plays one session.

use crate::protocol::StreamTransport;
use crate::solver::{CancelToken, Session, SessionConfig, SessionReport, Strategy};
use anyhow::{Context, Result};
use std::net::TcpStream;
use tracing::info;

/// Play one game against the server at `host:port`
///
/// # Errors
/// Returns an error if the connection cannot be established or a frame
/// cannot be sent or received.
pub fn play_remote<S: Strategy>(
    host: &str,
    port: u16,
    strategy: &S,
    config: SessionConfig,
    cancel: CancelToken,
) -> Result<SessionReport> {
    let stream = TcpStream::connect((host, port))
        .with_context(|| format!("Failed to connect to {host}:{port}"))?;
    stream.set_nodelay(true).context("Failed to configure socket")?;
    info!(%host, port, layout = %config.layout, "connected");

    let report = Session::new(strategy, StreamTransport::new(stream), config)
        .with_cancel(cancel)
        .run()?;
    Ok(report)
}
