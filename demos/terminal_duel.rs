//! # Terminal Duel Example
//!
//! Demonstrates a complete roshambo session lifecycle against a real server:
//!
//! 1. Connect to a room server via WebSocket
//! 2. Join a room and wait for the opponent
//! 3. Submit a choice each round and print the authoritative outcome
//! 4. Exit when the server closes the connection
//!
//! ## Running
//!
//! ```sh
//! # Start a roshambo server on localhost:8080, then:
//! cargo run --example terminal_duel
//!
//! # Override the server URL or room:
//! ROSHAMBO_URL=ws://my-server:8080/ws ROSHAMBO_ROOM=duel-42 \
//!     cargo run --example terminal_duel
//! ```
//!
//! Run it twice (same room) to play both sides.

use roshambo_client::{Choice, SessionConfig, SessionController};

/// Default server URL when `ROSHAMBO_URL` is not set.
const DEFAULT_URL: &str = "ws://localhost:8080/ws";

/// Default room when `ROSHAMBO_ROOM` is not set.
const DEFAULT_ROOM: &str = "demo-room";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Logging ─────────────────────────────────────────────────────
    // Initialize tracing. Set `RUST_LOG=debug` for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // ── Configuration ───────────────────────────────────────────────
    let url = std::env::var("ROSHAMBO_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let room = std::env::var("ROSHAMBO_ROOM").unwrap_or_else(|_| DEFAULT_ROOM.to_string());
    tracing::info!("Connecting to {url}, room {room}");

    // ── Connect ─────────────────────────────────────────────────────
    let mut controller = SessionController::new(SessionConfig::new(&url));
    let mut state_rx = controller.subscribe();
    tracing::info!("Playing as {}", controller.player_id());

    controller.connect(&room);

    // Cycle through the three choices, one per round.
    let mut hand = [Choice::Rock, Choice::Paper, Choice::Scissors]
        .into_iter()
        .cycle();
    let mut round = 0usize;
    let mut was_connected = false;
    let mut last_result: Option<String> = None;

    // ── State loop ──────────────────────────────────────────────────
    // Every controller transition lands in the watch channel; render each
    // snapshot and react to the interesting edges.
    while state_rx.changed().await.is_ok() {
        let snapshot = state_rx.borrow_and_update().clone();

        if let Some(err) = &snapshot.error {
            tracing::warn!("session error: {err}");
        }

        if snapshot.connected && !was_connected {
            tracing::info!("Connected — waiting for an opponent to join {room}");
        } else if !snapshot.connected && was_connected {
            break;
        }
        was_connected = snapshot.connected;

        // A new status or outcome line from the server.
        if snapshot.result != last_result {
            last_result = snapshot.result.clone();
            if let Some(text) = &snapshot.result {
                tracing::info!(
                    "{text}  (score {}–{})",
                    snapshot.player_score,
                    snapshot.opponent_score
                );
            }

            // Round boundary: the game just started, or an authoritative
            // outcome arrived. Skip the status edge our own submit produces.
            let awaiting_opponent = snapshot.result.as_deref() == Some("Waiting for opponent...");
            if snapshot.ready && !awaiting_opponent {
                if let Some(choice) = hand.next() {
                    round += 1;
                    tracing::info!("Round {round}: playing {choice}");
                    controller.submit_choice(choice);
                }
            }
        }
    }

    tracing::info!("Connection closed after {round} round(s)");
    controller.disconnect().await;
    Ok(())
}
