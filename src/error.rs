//! Error types for the roshambo client.
//!
//! [`SessionError`] is used by transport implementations and internal
//! plumbing. It never crosses the controller boundary toward a renderer:
//! every failure the session loop observes terminates in
//! [`SessionState::error`](crate::SessionState) as a display string.

use thiserror::Error;

/// Errors that can occur inside the roshambo client.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to send a message through the transport.
    #[error("transport send error: {0}")]
    TransportSend(String),

    /// Failed to receive a message from the transport.
    #[error("transport receive error: {0}")]
    TransportReceive(String),

    /// The transport connection was closed unexpectedly.
    #[error("transport connection closed")]
    TransportClosed,

    /// An operation timed out.
    #[error("operation timed out")]
    Timeout,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
