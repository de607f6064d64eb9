//! Wire types for the roshambo room protocol.
//!
//! Messages are single JSON frames with a lowercase `type` discriminator and
//! camelCase fields, matching the server exactly:
//!
//! ```json
//! {"type":"move","roomId":"room1","playerId":"player-ab12","choice":"rock"}
//! ```
//!
//! [`ServerMessage`] decoding is total: a frame whose `type` value is not
//! recognized decodes to [`ServerMessage::Unknown`] instead of an error, so
//! newer servers never break older clients. A *recognized* type with missing
//! or malformed fields still fails to decode — the session loop treats that
//! as a protocol error without dropping the connection.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Identity ────────────────────────────────────────────────────────

/// Opaque identity distinguishing the two occupants of a room.
///
/// Generated once per [`SessionController`](crate::SessionController)
/// lifetime — not per connection — so the server sees the same identity
/// across reconnects and the client can recognize itself in the `winner`
/// field of a round result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self(format!("player-{}", Uuid::new_v4().simple()))
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Choices ─────────────────────────────────────────────────────────

/// One of the three hands a player can throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// The choice this one defeats. Total over all three variants, so every
    /// ordered pair of distinct choices has exactly one winner.
    pub fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }

    /// Lowercase wire spelling, also used in user-facing text.
    pub fn as_str(self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    /// Capitalized display name for sentence-initial use.
    fn title(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }

    /// The verb this choice uses against the one it [`beats`](Choice::beats).
    fn verb(self) -> &'static str {
        match self {
            Choice::Rock => "crushes",
            Choice::Paper => "covers",
            Choice::Scissors => "cut",
        }
    }

    /// The line naming this choice's winning relationship, e.g.
    /// `"Rock crushes scissors!"`. The defeated choice comes from
    /// [`beats`](Choice::beats), so the line and the relationship table
    /// cannot drift apart.
    pub(crate) fn victory_line(self) -> String {
        format!("{} {} {}!", self.title(), self.verb(), self.beats())
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Messages ────────────────────────────────────────────────────────

/// Message types sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Join a room (sent exactly once, immediately after transport open).
    #[serde(rename = "join", rename_all = "camelCase")]
    Join { room_id: String, player_id: PlayerId },
    /// Submit a move for the current round (at most once per round).
    #[serde(rename = "move", rename_all = "camelCase")]
    Move {
        room_id: String,
        player_id: PlayerId,
        choice: Choice,
    },
}

/// Message types sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Both players have joined; round play is permitted.
    #[serde(rename = "ready")]
    Ready,
    /// Authoritative round result with cumulative scores.
    ///
    /// Scores are cumulative and authoritative — clients never increment
    /// locally. `winner` is a player identity, or `None` for a tie.
    ///
    /// `player1_id`/`player2_id` tag each slot with its owning identity so
    /// clients do not have to rely on join order to orient the positional
    /// fields; servers that predate the tags omit them and the client falls
    /// back to first-slot = local.
    #[serde(rename = "result", rename_all = "camelCase")]
    Result {
        player1_choice: Choice,
        player2_choice: Choice,
        player1_score: u32,
        player2_score: u32,
        winner: Option<PlayerId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player1_id: Option<PlayerId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player2_id: Option<PlayerId>,
    },
    /// Human-readable error text from the server.
    #[serde(rename = "error")]
    Error { message: String },
    /// Any unrecognized `type` value (forward-compatibility contract).
    #[serde(other)]
    Unknown,
}

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

    #[test]
    fn player_id_is_opaque_and_unique() {
        let a = PlayerId::generate();
        let b = PlayerId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("player-"));
    }

    #[test]
    fn beats_is_a_closed_cycle() {
        assert_eq!(Choice::Rock.beats(), Choice::Scissors);
        assert_eq!(Choice::Paper.beats(), Choice::Rock);
        assert_eq!(Choice::Scissors.beats(), Choice::Paper);
        // Every choice both beats one and is beaten by one.
        for c in [Choice::Rock, Choice::Paper, Choice::Scissors] {
            assert_eq!(c.beats().beats().beats(), c);
        }
    }

    #[test]
    fn victory_lines_follow_the_beats_table() {
        assert_eq!(Choice::Rock.victory_line(), "Rock crushes scissors!");
        assert_eq!(Choice::Paper.victory_line(), "Paper covers rock!");
        assert_eq!(Choice::Scissors.victory_line(), "Scissors cut paper!");
        for c in [Choice::Rock, Choice::Paper, Choice::Scissors] {
            assert!(c.victory_line().contains(c.beats().as_str()));
        }
    }

    #[test]
    fn choice_wire_spelling_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Choice::Scissors).unwrap(),
            "\"scissors\""
        );
        let c: Choice = serde_json::from_str("\"paper\"").unwrap();
        assert_eq!(c, Choice::Paper);
    }
}
