//! # Scripted Opponent Example
//!
//! Shows how to plug a custom [`Transport`] into the session controller with
//! a simple in-process loopback channel. This is useful for:
//!
//! - **Testing** — drive a full session without a real server
//! - **Custom backends** — adapt any I/O layer (TCP, QUIC, WebRTC data channels)
//!
//! The "server" half of the loopback plays one scripted round: it accepts the
//! join, announces the room as ready, reads the client's move, and answers
//! with an authoritative result.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example scripted_opponent
//! ```
//!
//! No server required — the opponent is scripted in-process.

use async_trait::async_trait;
use roshambo_client::{Choice, SessionConfig, SessionController, SessionError, Transport};
use tokio::sync::mpsc;

// ─────────────────────────────────────────────────────────────────────
// Step 1: Define a channel-based "loopback" transport
// ─────────────────────────────────────────────────────────────────────

/// A loopback transport that shuttles frames through in-process channels.
///
/// Two halves:
/// - The **client half** (`LoopbackTransport`) implements [`Transport`] and is
///   handed to `SessionController::connect_with`.
/// - The **server half** (`LoopbackServer`) lets you inject responses and read
///   what the client sent.
pub struct LoopbackTransport {
    /// Frames the client sends go here (server reads the other end).
    tx: mpsc::UnboundedSender<String>,
    /// Frames the server sends arrive here (client reads them).
    rx: mpsc::UnboundedReceiver<String>,
}

/// The "server side" of the loopback — use this to drive the conversation.
pub struct LoopbackServer {
    /// Read what the client sent.
    pub rx: mpsc::UnboundedReceiver<String>,
    /// Send frames to the client (as if they came from a server).
    pub tx: mpsc::UnboundedSender<String>,
}

/// Create a connected `(transport, server)` pair.
fn loopback_pair() -> (LoopbackTransport, LoopbackServer) {
    // Client → Server channel
    let (client_tx, server_rx) = mpsc::unbounded_channel();
    // Server → Client channel
    let (server_tx, client_rx) = mpsc::unbounded_channel();

    let transport = LoopbackTransport {
        tx: client_tx,
        rx: client_rx,
    };
    let server = LoopbackServer {
        rx: server_rx,
        tx: server_tx,
    };

    (transport, server)
}

// ─────────────────────────────────────────────────────────────────────
// Step 2: Implement the Transport trait
// ─────────────────────────────────────────────────────────────────────

#[async_trait]
impl Transport for LoopbackTransport {
    /// Send a JSON frame to the "server" side of the loopback.
    async fn send(&mut self, message: String) -> Result<(), SessionError> {
        self.tx
            .send(message)
            .map_err(|e| SessionError::TransportSend(e.to_string()))
    }

    /// Receive the next frame from the "server" side.
    ///
    /// Returns `None` when the server channel is closed — this is how the
    /// session loop discovers that the connection has ended.
    ///
    /// This method is **cancel-safe** because `mpsc::UnboundedReceiver::recv`
    /// is cancel-safe.
    async fn recv(&mut self) -> Option<Result<String, SessionError>> {
        self.rx.recv().await.map(Ok)
    }

    /// Close is a no-op for channels — dropping is sufficient.
    async fn close(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Step 3: Wire together the controller and the scripted server
// ─────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for readable output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Create the loopback pair.
    let (transport, mut server) = loopback_pair();

    // Connect through the loopback — the controller immediately sends a
    // `join` frame once the "dial" resolves.
    let mut controller = SessionController::new(SessionConfig::default());
    let mut state_rx = controller.subscribe();
    let local_id = controller.player_id().clone();

    controller.connect_with("loopback-room", async move { Ok(transport) });

    // ── Scripted server: accept the join ────────────────────────────
    let Some(join_frame) = server.rx.recv().await else {
        return Err("client channel closed before join was received".into());
    };
    tracing::info!("Server received: {join_frame}");

    // Both players present — announce ready.
    server.tx.send(r#"{"type":"ready"}"#.to_string())?;

    // Wait until the controller reflects the ready room, then play.
    state_rx.wait_for(|s| s.ready).await?;
    tracing::info!("Room ready: {:?}", state_rx.borrow().result);

    controller.submit_choice(Choice::Rock);

    // ── Scripted server: read the move, answer with a result ────────
    let Some(move_frame) = server.rx.recv().await else {
        return Err("client channel closed before move was received".into());
    };
    tracing::info!("Server received: {move_frame}");

    // The scripted opponent plays scissors; local rock wins 1–0. The JSON
    // must match the server's wire format — flat camelCase fields with a
    // lowercase `type` tag.
    let result = serde_json::json!({
        "type": "result",
        "player1Choice": "rock",
        "player2Choice": "scissors",
        "player1Score": 1,
        "player2Score": 0,
        "winner": local_id,
        "player1Id": local_id,
        "player2Id": "player-scripted-opponent",
    });
    server.tx.send(result.to_string())?;

    // ── Read the outcome from the snapshot ──────────────────────────
    state_rx.wait_for(|s| s.player_score == 1).await?;
    let snapshot = state_rx.borrow().clone();
    tracing::info!(
        "Outcome: {}  (score {}–{})",
        snapshot.result.as_deref().unwrap_or("<none>"),
        snapshot.player_score,
        snapshot.opponent_score
    );

    // ── Clean shutdown ──────────────────────────────────────────────
    controller.disconnect().await;
    tracing::info!("Done — scripted opponent works!");
    Ok(())
}
