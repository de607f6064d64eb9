//! Transport implementations for the roshambo room protocol.
//!
//! Concrete [`Transport`](crate::Transport) implementations live here behind
//! feature gates:
//!
//! | Feature                | Transport              |
//! |------------------------|------------------------|
//! | `transport-websocket`  | [`WebSocketTransport`] |

#[cfg(feature = "transport-websocket")]
pub mod websocket;

#[cfg(feature = "transport-websocket")]
pub use websocket::WebSocketTransport;
