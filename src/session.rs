//! Session controller for two-player rock/paper/scissors rooms.
//!
//! [`SessionController`] owns the connection lifecycle, the [`SessionState`]
//! snapshot, and the protocol interpreter that turns inbound server frames
//! into state transitions and player intents into wire messages. A renderer
//! subscribes to the snapshot via [`SessionController::subscribe`] and calls
//! exactly two entry points: [`connect`](SessionController::connect) and
//! [`submit_choice`](SessionController::submit_choice).
//!
//! Every failure — local validation, transport drop, malformed frame, or a
//! server-reported error — terminates in [`SessionState::error`]. Nothing is
//! thrown past the controller boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut controller = SessionController::new(SessionConfig::default());
//! let mut state = controller.subscribe();
//!
//! controller.connect("room1");
//!
//! while state.changed().await.is_ok() {
//!     let snapshot = state.borrow().clone();
//!     if let Some(err) = &snapshot.error {
//!         eprintln!("error: {err}");
//!     }
//! }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, warn};

use crate::error::SessionError;
use crate::protocol::{Choice, ClientMessage, PlayerId, ServerMessage};
use crate::transport::Transport;

/// Default connection endpoint for local development.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080/ws";

/// Default timeout for the graceful disconnect.
const DEFAULT_DISCONNECT_TIMEOUT: Duration = Duration::from_secs(1);

// Status and error strings surfaced to the renderer.
const EMPTY_ROOM_ERROR: &str = "Please enter a room ID";
const CONNECTION_ERROR: &str = "Connection error occurred";
const PROTOCOL_ERROR: &str = "Received an invalid message from the server";
const GAME_STARTING: &str = "Both players joined! Game starting...";
const WAITING_FOR_OPPONENT: &str = "Waiting for opponent...";

// ── Configuration ───────────────────────────────────────────────────

/// Configuration for a [`SessionController`].
///
/// The endpoint is resolved once at construction and reused for every
/// connection attempt.
///
/// # Example
///
/// ```
/// use roshambo_client::session::SessionConfig;
///
/// let config = SessionConfig::new("ws://game.example.net/ws");
/// assert_eq!(config.endpoint, "ws://game.example.net/ws");
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Connection URL of the room server.
    pub endpoint: String,
    /// Timeout for the graceful disconnect.
    ///
    /// When [`SessionController::disconnect`] is called, the session loop is
    /// given this much time to close the transport; if the deadline expires
    /// the loop task is aborted. Defaults to **1 second**.
    pub disconnect_timeout: Duration,
}

impl SessionConfig {
    /// Create a configuration pointing at the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            disconnect_timeout: DEFAULT_DISCONNECT_TIMEOUT,
        }
    }

    /// Set the timeout for the graceful disconnect.
    #[must_use]
    pub fn with_disconnect_timeout(mut self, timeout: Duration) -> Self {
        self.disconnect_timeout = timeout;
        self
    }
}

impl Default for SessionConfig {
    /// Local-development default: [`DEFAULT_ENDPOINT`].
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

// ── State snapshot ──────────────────────────────────────────────────

/// The single mutable session snapshot.
///
/// Owned exclusively by the [`SessionController`]; renderers read it through
/// [`SessionController::subscribe`] or [`SessionController::state`] and never
/// mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Room identifier chosen by the local player before connecting.
    pub room_id: String,
    /// The transport is open.
    pub connected: bool,
    /// Both players have joined; round play is permitted.
    /// Implies `connected`.
    pub ready: bool,
    /// Local player's submitted choice for the current round.
    /// Cleared when the transport closes.
    pub player_choice: Option<Choice>,
    /// Opponent's revealed choice, populated once a round resolves.
    pub opponent_choice: Option<Choice>,
    /// Cumulative round wins for the local player, overwritten verbatim from
    /// every authoritative result — never incremented locally.
    pub player_score: u32,
    /// Cumulative round wins for the opponent (authoritative, like
    /// `player_score`).
    pub opponent_score: u32,
    /// Human-readable outcome or status message for the current round.
    pub result: Option<String>,
    /// Last protocol/transport error surfaced to the user. Survives
    /// disconnects; cleared when a connection opens or the room turns ready.
    pub error: Option<String>,
}

// ── Controller ──────────────────────────────────────────────────────

/// Handle to one live connection's session loop.
struct Connection {
    /// Sender half of the outbound intent channel into the session loop.
    cmd_tx: mpsc::UnboundedSender<ClientMessage>,
    /// Oneshot to request a graceful loop shutdown.
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// The spawned session loop task.
    task: tokio::task::JoinHandle<()>,
}

/// The session controller: sole owner and sole writer of [`SessionState`].
///
/// Holds at most one live transport at any time. A fresh opaque
/// [`PlayerId`] is generated when the controller is created and reused for
/// its whole lifetime, across reconnects.
pub struct SessionController {
    player_id: PlayerId,
    endpoint: String,
    disconnect_timeout: Duration,
    /// Shared with the session loop; both sides mutate through `send_modify`.
    state: Arc<watch::Sender<SessionState>>,
    conn: Option<Connection>,
}

impl SessionController {
    /// Create a controller with default state and a fresh [`PlayerId`].
    pub fn new(config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            player_id: PlayerId::generate(),
            endpoint: config.endpoint,
            disconnect_timeout: config.disconnect_timeout,
            state: Arc::new(state),
            conn: None,
        }
    }

    /// The controller's stable player identity.
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// A read-only subscription to the session snapshot.
    ///
    /// Any number of observers may subscribe; the controller is the only
    /// writer. Use [`watch::Receiver::changed`] to await transitions or
    /// `borrow` to poll.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// A clone of the current session snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Connect to a room over the configured WebSocket endpoint.
    ///
    /// Returns immediately after issuing the dial; the open transition and
    /// the `join` frame happen later on the session loop, so callers must
    /// not assume `connected` or `ready` right after this call.
    ///
    /// An empty (after trimming) room id never opens a transport — it
    /// surfaces a validation message into [`SessionState::error`] instead.
    /// Any prior live connection is torn down first: the controller owns at
    /// most one transport at a time.
    #[cfg(feature = "transport-websocket")]
    pub fn connect(&mut self, room_id: &str) {
        let url = self.endpoint.clone();
        self.connect_with(room_id, async move {
            crate::transports::WebSocketTransport::connect(&url).await
        });
    }

    /// Connect to a room using a caller-supplied dial future.
    ///
    /// This is the transport-agnostic form of
    /// [`connect`](SessionController::connect): `dial` resolves to any
    /// connected [`Transport`]. Semantics are otherwise identical.
    pub fn connect_with<T, F>(&mut self, room_id: &str, dial: F)
    where
        T: Transport,
        F: Future<Output = Result<T, SessionError>> + Send + 'static,
    {
        let room = room_id.trim();
        if room.is_empty() {
            warn!("connect rejected: empty room id");
            self.state
                .send_modify(|s| s.error = Some(EMPTY_ROOM_ERROR.to_string()));
            return;
        }

        // At most one live transport per controller.
        self.abort_connection();

        let room = room.to_string();
        self.state.send_modify(|s| s.room_id = room.clone());

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ClientMessage>();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let join = ClientMessage::Join {
            room_id: room,
            player_id: self.player_id.clone(),
        };
        let task = tokio::spawn(session_loop(
            dial,
            join,
            self.player_id.clone(),
            cmd_rx,
            Arc::clone(&self.state),
            shutdown_rx,
        ));

        self.conn = Some(Connection {
            cmd_tx,
            shutdown_tx: Some(shutdown_tx),
            task,
        });
    }

    /// Submit the local player's choice for the current round.
    ///
    /// A defensive no-op — no outbound frame, no state change — unless the
    /// session is both connected and ready. On success it sends a `move`
    /// frame, records the choice, and sets the waiting status; the opponent
    /// choice and the scores only ever change on an authoritative result.
    pub fn submit_choice(&mut self, choice: Choice) {
        let Some(conn) = &self.conn else {
            debug!(%choice, "submit_choice ignored: no live connection");
            return;
        };

        // Gate, frame dispatch, and snapshot update run as one transition
        // under the watch lock. The session loop mutates the same sender
        // from its own task, so a split check-then-act here could interleave
        // with a close reset and leave a pending choice on a closed session.
        let submitted = self.state.send_if_modified(|s| {
            if !(s.connected && s.ready) {
                return false;
            }
            let msg = ClientMessage::Move {
                room_id: s.room_id.clone(),
                player_id: self.player_id.clone(),
                choice,
            };
            if conn.cmd_tx.send(msg).is_err() {
                return false;
            }
            s.player_choice = Some(choice);
            s.result = Some(WAITING_FOR_OPPONENT.to_string());
            true
        });

        if !submitted {
            debug!(%choice, "submit_choice ignored: session not ready");
        }
    }

    /// Tear the session down gracefully.
    ///
    /// Idempotent: disconnecting twice, or before any connect, is a no-op
    /// and sends no traffic. The session loop gets the configured timeout to
    /// close the transport; past the deadline its task is aborted.
    pub async fn disconnect(&mut self) {
        let Some(mut conn) = self.conn.take() else {
            return;
        };
        debug!("disconnect requested");

        if let Some(tx) = conn.shutdown_tx.take() {
            let _ = tx.send(());
        }

        match tokio::time::timeout(self.disconnect_timeout, &mut conn.task).await {
            Ok(Ok(())) => {}
            Ok(Err(join_err)) => {
                warn!("session loop terminated with join error: {join_err}");
            }
            Err(_) => {
                warn!("session loop did not exit within timeout; aborting task");
                conn.task.abort();
                if let Err(join_err) = conn.task.await {
                    debug!("session loop aborted: {join_err}");
                }
            }
        }
    }

    /// Abort the current session loop immediately (no close handshake) and
    /// apply the closed-state reset so a new connection starts clean.
    fn abort_connection(&mut self) {
        if let Some(conn) = self.conn.take() {
            conn.task.abort();
            apply_close_reset(&self.state);
        }
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.state.borrow();
        f.debug_struct("SessionController")
            .field("player_id", &self.player_id)
            .field("room_id", &s.room_id)
            .field("connected", &s.connected)
            .field("ready", &s.ready)
            .field("has_connection", &self.conn.is_some())
            .finish()
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        // `Drop` is synchronous, so the graceful path (which awaits
        // `transport.close()`) is unavailable. Aborting the task drops the
        // session loop future and with it the transport handle.
        if let Some(conn) = self.conn.take() {
            conn.task.abort();
        }
    }
}

// ── Session loop ────────────────────────────────────────────────────

/// Background task driving one connection: dials the transport, performs the
/// open transition, then applies exactly one state transition per iteration
/// of a `tokio::select!` over outbound intents, shutdown, and inbound frames.
async fn session_loop<T, F>(
    dial: F,
    join: ClientMessage,
    local: PlayerId,
    mut cmd_rx: mpsc::UnboundedReceiver<ClientMessage>,
    state: Arc<watch::Sender<SessionState>>,
    mut shutdown_rx: oneshot::Receiver<()>,
) where
    T: Transport,
    F: Future<Output = Result<T, SessionError>> + Send + 'static,
{
    debug!("session loop started");

    // Connecting → Open, unless shutdown wins the race or the dial fails.
    let mut transport = tokio::select! {
        res = dial => match res {
            Ok(t) => t,
            Err(e) => {
                error!("failed to open transport: {e}");
                state.send_modify(|s| s.error = Some(CONNECTION_ERROR.to_string()));
                apply_close_reset(&state);
                return;
            }
        },
        _ = &mut shutdown_rx => {
            debug!("shutdown before transport opened");
            return;
        }
    };

    state.send_modify(|s| {
        s.connected = true;
        s.error = None;
    });

    // The join intent is the only frame sent without waiting for `ready`.
    if !send_frame(&mut transport, &join, &state).await {
        let _ = transport.close().await;
        return;
    }

    loop {
        tokio::select! {
            // Branch 1: outbound intent from the controller handle
            cmd = cmd_rx.recv() => match cmd {
                Some(msg) => {
                    if !send_frame(&mut transport, &msg, &state).await {
                        break;
                    }
                }
                // Handle dropped — unconditional close.
                None => {
                    debug!("command channel closed, shutting down session loop");
                    let _ = transport.close().await;
                    apply_close_reset(&state);
                    break;
                }
            },

            // Branch 2: graceful disconnect
            _ = &mut shutdown_rx => {
                debug!("shutdown signal received");
                let _ = transport.close().await;
                apply_close_reset(&state);
                break;
            }

            // Branch 3: inbound frame from the server
            incoming = transport.recv() => match incoming {
                Some(Ok(text)) => apply_server_frame(&state, &local, &text),
                Some(Err(e)) => {
                    error!("transport receive error: {e}");
                    state.send_modify(|s| s.error = Some(CONNECTION_ERROR.to_string()));
                    apply_close_reset(&state);
                    break;
                }
                // Transport closed by the server.
                None => {
                    debug!("transport closed by server");
                    apply_close_reset(&state);
                    break;
                }
            }
        }
    }

    debug!("session loop exited");
}

/// Serialize and send one client frame. Returns `false` when the transport
/// failed and the loop should stop (the error overlay and close reset have
/// already been applied). A serialization failure is a programming bug and
/// does not kill the loop.
async fn send_frame(
    transport: &mut impl Transport,
    msg: &ClientMessage,
    state: &watch::Sender<SessionState>,
) -> bool {
    match serde_json::to_string(msg) {
        Ok(frame) => {
            debug!("sending client frame: {:?}", std::mem::discriminant(msg));
            if let Err(e) = transport.send(frame).await {
                error!("transport send error: {e}");
                state.send_modify(|s| s.error = Some(CONNECTION_ERROR.to_string()));
                apply_close_reset(state);
                return false;
            }
            true
        }
        Err(e) => {
            error!("failed to serialize client message: {e}");
            true
        }
    }
}

/// Decode one inbound frame and apply its transition. A frame that fails to
/// decode — undecodable body, or a recognized type missing required fields —
/// surfaces a generic protocol error and leaves everything else unchanged;
/// the connection stays open.
fn apply_server_frame(state: &watch::Sender<SessionState>, local: &PlayerId, text: &str) {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(msg) => apply_server_message(state, local, msg),
        Err(e) => {
            warn!("undecodable server frame: {e} — raw: {text}");
            state.send_modify(|s| s.error = Some(PROTOCOL_ERROR.to_string()));
        }
    }
}

/// Apply one decoded server message to the session snapshot.
fn apply_server_message(state: &watch::Sender<SessionState>, local: &PlayerId, msg: ServerMessage) {
    match msg {
        ServerMessage::Ready => {
            debug!("room ready, play permitted");
            state.send_modify(|s| {
                s.ready = true;
                s.error = None;
                s.result = Some(GAME_STARTING.to_string());
            });
        }
        ServerMessage::Result {
            player1_choice,
            player2_choice,
            player1_score,
            player2_score,
            winner,
            player1_id,
            player2_id,
        } => {
            // Slot orientation: trust the identity tags when present, fall
            // back to first-slot = local for servers that omit them.
            let local_is_first = match (&player1_id, &player2_id) {
                (_, Some(p2)) if p2 == local => false,
                _ => true,
            };
            let (own, theirs, own_score, their_score) = if local_is_first {
                (player1_choice, player2_choice, player1_score, player2_score)
            } else {
                (player2_choice, player1_choice, player2_score, player1_score)
            };
            let text = round_outcome(winner.as_ref(), local, own, theirs);
            state.send_modify(|s| {
                s.player_choice = Some(own);
                s.opponent_choice = Some(theirs);
                s.player_score = own_score;
                s.opponent_score = their_score;
                s.result = Some(text);
            });
        }
        ServerMessage::Error { message } => {
            debug!("server reported error: {message}");
            state.send_modify(|s| s.error = Some(message));
        }
        ServerMessage::Unknown => {
            debug!("ignoring unrecognized server message");
        }
    }
}

/// The Closed-state reset: connection- and round-scoped fields go back to
/// their defaults, while `error` and both scores persist — the scores are
/// the last known authoritative tally, not session-scoped.
fn apply_close_reset(state: &watch::Sender<SessionState>) {
    state.send_modify(|s| {
        s.connected = false;
        s.ready = false;
        s.player_choice = None;
        s.opponent_choice = None;
        s.result = None;
    });
}

// ── Outcome derivation ──────────────────────────────────────────────

/// Derive the human-readable round outcome from an authoritative result.
///
/// Pure function. `own`/`theirs` are the local and opponent choices after
/// slot orientation. A missing `winner`, or equal choices, is a tie; a
/// `winner` matching `local` names the local choice's winning relationship;
/// anything else names the relationship that beat the local player. The
/// relationship table is closed over the three choices, so every ordered
/// pair of distinct choices maps to exactly one line.
pub fn round_outcome(
    winner: Option<&PlayerId>,
    local: &PlayerId,
    own: Choice,
    theirs: Choice,
) -> String {
    match winner {
        None => format!("Tie! You both chose {own}"),
        _ if own == theirs => format!("Tie! You both chose {own}"),
        Some(w) if w == local => format!("You win! {}", own.victory_line()),
        Some(_) => format!("You lose! {}", theirs.victory_line()),
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    fn local() -> PlayerId {
        PlayerId::from("player-local")
    }

    fn rival() -> PlayerId {
        PlayerId::from("player-rival")
    }

    fn state_channel() -> watch::Sender<SessionState> {
        let (tx, _) = watch::channel(SessionState::default());
        tx
    }

    // ── round_outcome: all nine ordered pairs ───────────────────────

    #[test]
    fn outcome_tie_when_winner_absent() {
        for c in [Choice::Rock, Choice::Paper, Choice::Scissors] {
            let text = round_outcome(None, &local(), c, c);
            assert_eq!(text, format!("Tie! You both chose {c}"));
        }
    }

    #[test]
    fn outcome_tie_when_choices_equal_even_with_winner() {
        // Equal choices can only mean a tie; a spurious winner field from a
        // buggy server must not produce win/loss text.
        let text = round_outcome(Some(&local()), &local(), Choice::Rock, Choice::Rock);
        assert_eq!(text, "Tie! You both chose rock");
    }

    #[test]
    fn outcome_win_names_local_relationship() {
        let me = local();
        let cases = [
            (Choice::Rock, Choice::Scissors, "Rock crushes scissors!"),
            (Choice::Paper, Choice::Rock, "Paper covers rock!"),
            (Choice::Scissors, Choice::Paper, "Scissors cut paper!"),
        ];
        for (own, theirs, line) in cases {
            let text = round_outcome(Some(&me), &me, own, theirs);
            assert_eq!(text, format!("You win! {line}"));
        }
    }

    #[test]
    fn outcome_loss_names_opposing_relationship() {
        let me = local();
        let other = rival();
        let cases = [
            (Choice::Rock, Choice::Paper, "Paper covers rock!"),
            (Choice::Paper, Choice::Scissors, "Scissors cut paper!"),
            (Choice::Scissors, Choice::Rock, "Rock crushes scissors!"),
        ];
        for (own, theirs, line) in cases {
            let text = round_outcome(Some(&other), &me, own, theirs);
            assert_eq!(text, format!("You lose! {line}"));
        }
    }

    #[test]
    fn outcome_consistent_regardless_of_declared_side() {
        // The same distinct pair yields the same relationship line whether
        // the local player won or lost with it.
        let me = local();
        let other = rival();
        let win = round_outcome(Some(&me), &me, Choice::Rock, Choice::Scissors);
        let loss = round_outcome(Some(&other), &me, Choice::Scissors, Choice::Rock);
        assert!(win.ends_with("Rock crushes scissors!"));
        assert!(loss.ends_with("Rock crushes scissors!"));
    }

    // ── Inbound transitions (pure, via the watch sender) ────────────

    #[test]
    fn ready_sets_ready_and_clears_error() {
        let state = state_channel();
        state.send_modify(|s| {
            s.connected = true;
            s.error = Some("stale".into());
        });

        apply_server_message(&state, &local(), ServerMessage::Ready);

        let s = state.borrow().clone();
        assert!(s.ready);
        assert!(s.error.is_none());
        assert_eq!(s.result.as_deref(), Some(GAME_STARTING));
    }

    #[test]
    fn result_overwrites_scores_verbatim() {
        let state = state_channel();
        state.send_modify(|s| {
            s.connected = true;
            s.ready = true;
            s.player_score = 9;
            s.opponent_score = 9;
        });

        let me = local();
        apply_server_message(
            &state,
            &me,
            ServerMessage::Result {
                player1_choice: Choice::Rock,
                player2_choice: Choice::Scissors,
                player1_score: 1,
                player2_score: 0,
                winner: Some(me.clone()),
                player1_id: None,
                player2_id: None,
            },
        );

        let s = state.borrow().clone();
        assert_eq!(s.player_score, 1);
        assert_eq!(s.opponent_score, 0);
        assert_eq!(s.player_choice, Some(Choice::Rock));
        assert_eq!(s.opponent_choice, Some(Choice::Scissors));
        assert_eq!(s.result.as_deref(), Some("You win! Rock crushes scissors!"));
    }

    #[test]
    fn result_swaps_slots_when_local_is_second() {
        let state = state_channel();
        let me = local();
        apply_server_message(
            &state,
            &me,
            ServerMessage::Result {
                player1_choice: Choice::Rock,
                player2_choice: Choice::Scissors,
                player1_score: 1,
                player2_score: 0,
                winner: Some(rival()),
                player1_id: Some(rival()),
                player2_id: Some(me.clone()),
            },
        );

        let s = state.borrow().clone();
        assert_eq!(s.player_choice, Some(Choice::Scissors));
        assert_eq!(s.opponent_choice, Some(Choice::Rock));
        assert_eq!(s.player_score, 0);
        assert_eq!(s.opponent_score, 1);
        assert_eq!(
            s.result.as_deref(),
            Some("You lose! Rock crushes scissors!")
        );
    }

    #[test]
    fn server_error_only_touches_error_field() {
        let state = state_channel();
        state.send_modify(|s| {
            s.connected = true;
            s.ready = true;
            s.player_score = 2;
        });

        apply_server_message(
            &state,
            &local(),
            ServerMessage::Error {
                message: "room full".into(),
            },
        );

        let s = state.borrow().clone();
        assert_eq!(s.error.as_deref(), Some("room full"));
        assert!(s.connected);
        assert!(s.ready);
        assert_eq!(s.player_score, 2);
    }

    #[test]
    fn unknown_message_changes_nothing() {
        let state = state_channel();
        state.send_modify(|s| {
            s.connected = true;
            s.ready = true;
        });
        let before = state.borrow().clone();

        apply_server_message(&state, &local(), ServerMessage::Unknown);

        assert_eq!(*state.borrow(), before);
    }

    #[test]
    fn undecodable_frame_sets_protocol_error_and_keeps_session() {
        let state = state_channel();
        state.send_modify(|s| {
            s.connected = true;
            s.ready = true;
            s.player_choice = Some(Choice::Paper);
        });

        apply_server_frame(&state, &local(), "not json at all");

        let s = state.borrow().clone();
        assert_eq!(s.error.as_deref(), Some(PROTOCOL_ERROR));
        assert!(s.connected);
        assert!(s.ready);
        assert_eq!(s.player_choice, Some(Choice::Paper));
    }

    #[test]
    fn recognized_type_with_missing_fields_is_a_protocol_error() {
        let state = state_channel();
        state.send_modify(|s| s.connected = true);

        apply_server_frame(&state, &local(), r#"{"type":"result","winner":null}"#);

        let s = state.borrow().clone();
        assert_eq!(s.error.as_deref(), Some(PROTOCOL_ERROR));
        assert!(s.connected);
    }

    #[test]
    fn unknown_type_frame_is_ignored_not_an_error() {
        let state = state_channel();
        state.send_modify(|s| s.connected = true);

        apply_server_frame(&state, &local(), r#"{"type":"matchmaking_hint","ttl":5}"#);

        let s = state.borrow().clone();
        assert!(s.error.is_none());
        assert!(s.connected);
    }

    #[test]
    fn close_reset_preserves_scores_and_error() {
        let state = state_channel();
        state.send_modify(|s| {
            s.connected = true;
            s.ready = true;
            s.player_choice = Some(Choice::Rock);
            s.opponent_choice = Some(Choice::Paper);
            s.player_score = 3;
            s.opponent_score = 5;
            s.result = Some("You lose! Paper covers rock!".into());
            s.error = Some("Connection error occurred".into());
        });

        apply_close_reset(&state);

        let s = state.borrow().clone();
        assert!(!s.connected);
        assert!(!s.ready);
        assert!(s.player_choice.is_none());
        assert!(s.opponent_choice.is_none());
        assert!(s.result.is_none());
        assert_eq!(s.player_score, 3);
        assert_eq!(s.opponent_score, 5);
        assert_eq!(s.error.as_deref(), Some("Connection error occurred"));
    }
}
