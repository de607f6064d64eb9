//! # Roshambo Client
//!
//! Transport-agnostic Rust client for two-player rock/paper/scissors rooms.
//!
//! This crate owns the client-side session state machine: joining a room on a
//! matchmaking server, tracking connection and readiness, submitting moves,
//! interpreting authoritative round results, and recovering from disconnects.
//! All of it is surfaced through a single [`SessionState`] snapshot that a
//! rendering layer observes read-only.
//!
//! ## Features
//!
//! - **Transport-agnostic** — implement the [`Transport`] trait for any backend
//! - **Single-writer state** — the [`SessionController`] is the only component
//!   that mutates [`SessionState`]; renderers subscribe via a watch channel
//! - **WebSocket built-in** — default `transport-websocket` feature provides
//!   `WebSocketTransport`
//! - **Total protocol parser** — unknown server message types decode to an
//!   explicit ignored variant instead of failing the connection
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let mut controller = SessionController::new(SessionConfig::new("ws://localhost:8080/ws"));
//! let mut state = controller.subscribe();
//!
//! controller.connect("room1");
//!
//! while state.changed().await.is_ok() {
//!     let snapshot = state.borrow().clone();
//!     if snapshot.ready && snapshot.player_choice.is_none() {
//!         controller.submit_choice(Choice::Rock);
//!     }
//! }
//! ```

pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod transports;

// Re-export primary types for ergonomic imports.
pub use error::SessionError;
pub use protocol::{Choice, ClientMessage, PlayerId, ServerMessage};
pub use session::{SessionConfig, SessionController, SessionState};
pub use transport::Transport;

#[cfg(feature = "transport-websocket")]
pub use transports::WebSocketTransport;
