//! Transport abstraction for the roshambo room protocol.
//!
//! The [`Transport`] trait models the persistent duplex message channel to
//! the matchmaking server. The protocol is JSON text frames, one frame per
//! event, so implementations must handle framing internally (WebSocket
//! frames, length-prefixed TCP, and so on).
//!
//! Connection setup is not part of this trait — different transports have
//! different dial parameters. The controller accepts a dial future (see
//! [`SessionController::connect_with`](crate::SessionController::connect_with))
//! that resolves to a connected transport.

use async_trait::async_trait;

use crate::error::SessionError;

/// A bidirectional text message channel to the room server.
///
/// Each call to [`send`](Transport::send) transmits one complete JSON frame;
/// each call to [`recv`](Transport::recv) yields one.
///
/// # Cancel safety
///
/// [`recv`](Transport::recv) **must** be cancel-safe because the session loop
/// polls it inside `tokio::select!`. If the future is dropped before
/// completion, calling `recv` again must not lose a frame. Channel-backed
/// implementations are naturally cancel-safe.
#[async_trait]
pub trait Transport: Send + 'static {
    /// Send one JSON text frame to the server.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::TransportSend`] if the frame could not be sent.
    async fn send(&mut self, message: String) -> Result<(), SessionError>;

    /// Receive the next JSON text frame from the server.
    ///
    /// Returns:
    /// - `Some(Ok(text))` — a complete frame was received
    /// - `Some(Err(e))` — a transport error occurred
    /// - `None` — the connection was closed cleanly
    async fn recv(&mut self) -> Option<Result<String, SessionError>>;

    /// Close the connection.
    ///
    /// Must be idempotent: closing an already-closed transport is a no-op.
    /// In-flight outbound frames are not guaranteed delivery once close is
    /// requested.
    ///
    /// # Errors
    ///
    /// Returns an error if shutdown fails; implementations should release
    /// resources regardless.
    async fn close(&mut self) -> Result<(), SessionError>;
}
