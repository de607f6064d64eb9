#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
//! Shared test utilities for roshambo client integration tests.
//!
//! Provides a channel-based [`MockTransport`] with scripted server frames
//! and helpers for building common server JSON.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use roshambo_client::{SessionError, Transport};

// ── MockTransport ───────────────────────────────────────────────────

/// A scripted mock transport for integration testing.
///
/// Scripted server frames are consumed in order by `recv()`; an explicit
/// `None` entry signals a clean close, `Some(Err(..))` a transport error.
/// Once the script is exhausted `recv()` hangs so the session loop stays
/// alive until teardown. Everything the client sends is recorded in `sent`.
pub struct MockTransport {
    incoming: VecDeque<Option<Result<String, SessionError>>>,
    pub sent: Arc<StdMutex<Vec<String>>>,
    pub closed: Arc<AtomicBool>,
}

impl MockTransport {
    /// Create a mock transport with the given scripted incoming frames.
    ///
    /// Returns the transport plus shared handles for inspecting sent frames
    /// and whether close was called.
    #[allow(clippy::type_complexity)]
    pub fn new(
        incoming: Vec<Option<Result<String, SessionError>>>,
    ) -> (Self, Arc<StdMutex<Vec<String>>>, Arc<AtomicBool>) {
        let sent = Arc::new(StdMutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        let transport = Self {
            incoming: VecDeque::from(incoming),
            sent: Arc::clone(&sent),
            closed: Arc::clone(&closed),
        };
        (transport, sent, closed)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, message: String) -> Result<(), SessionError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<String, SessionError>> {
        if let Some(item) = self.incoming.pop_front() {
            item
        } else {
            // Script exhausted — hang so the session loop stays alive.
            std::future::pending().await
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.closed.store(true, Ordering::Relaxed);
        Ok(())
    }
}

// ── JSON helpers ────────────────────────────────────────────────────

/// The `ready` broadcast: both players joined, play permitted.
pub fn ready_json() -> String {
    r#"{"type":"ready"}"#.to_string()
}

/// An authoritative round result without slot identity tags
/// (positional first-slot = local).
pub fn result_json(
    p1_choice: &str,
    p2_choice: &str,
    p1_score: u32,
    p2_score: u32,
    winner: Option<&str>,
) -> String {
    let winner = match winner {
        Some(id) => format!("\"{id}\""),
        None => "null".to_string(),
    };
    format!(
        r#"{{"type":"result","player1Choice":"{p1_choice}","player2Choice":"{p2_choice}","player1Score":{p1_score},"player2Score":{p2_score},"winner":{winner}}}"#
    )
}

/// A server-reported error with human-readable text.
pub fn error_json(message: &str) -> String {
    format!(r#"{{"type":"error","message":"{message}"}}"#)
}
