#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
//! Wire-format tests for the room protocol.
//!
//! Verifies that every frame the client emits and consumes matches the
//! server's JSON exactly: lowercase `type` discriminators, camelCase fields,
//! and the forward-compatibility contract for unrecognized message types.

use roshambo_client::{Choice, ClientMessage, PlayerId, ServerMessage};

// ════════════════════════════════════════════════════════════════════
// Client → server frames
// ════════════════════════════════════════════════════════════════════

#[test]
fn join_frame_matches_wire_format() {
    let msg = ClientMessage::Join {
        room_id: "room1".into(),
        player_id: PlayerId::from("player-abc123"),
    };
    let val: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
    assert_eq!(val["type"], "join");
    assert_eq!(val["roomId"], "room1");
    assert_eq!(val["playerId"], "player-abc123");
    assert_eq!(val.as_object().unwrap().len(), 3);
}

#[test]
fn move_frame_matches_wire_format() {
    let msg = ClientMessage::Move {
        room_id: "room1".into(),
        player_id: PlayerId::from("player-abc123"),
        choice: Choice::Scissors,
    };
    let val: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
    assert_eq!(val["type"], "move");
    assert_eq!(val["roomId"], "room1");
    assert_eq!(val["playerId"], "player-abc123");
    assert_eq!(val["choice"], "scissors");
}

#[test]
fn choice_wire_spellings() {
    for (choice, spelling) in [
        (Choice::Rock, "\"rock\""),
        (Choice::Paper, "\"paper\""),
        (Choice::Scissors, "\"scissors\""),
    ] {
        assert_eq!(serde_json::to_string(&choice).unwrap(), spelling);
        let back: Choice = serde_json::from_str(spelling).unwrap();
        assert_eq!(back, choice);
    }
}

// ════════════════════════════════════════════════════════════════════
// Server → client frames
// ════════════════════════════════════════════════════════════════════

#[test]
fn fixture_ready() {
    let msg: ServerMessage = serde_json::from_str(r#"{"type":"ready"}"#).unwrap();
    assert!(matches!(msg, ServerMessage::Ready));
}

#[test]
fn fixture_result_with_winner() {
    let json = r#"{
        "type": "result",
        "player1Choice": "rock",
        "player2Choice": "scissors",
        "player1Score": 1,
        "player2Score": 0,
        "winner": "player-abc123"
    }"#;
    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    if let ServerMessage::Result {
        player1_choice,
        player2_choice,
        player1_score,
        player2_score,
        winner,
        player1_id,
        player2_id,
    } = msg
    {
        assert_eq!(player1_choice, Choice::Rock);
        assert_eq!(player2_choice, Choice::Scissors);
        assert_eq!(player1_score, 1);
        assert_eq!(player2_score, 0);
        assert_eq!(winner, Some(PlayerId::from("player-abc123")));
        assert!(player1_id.is_none());
        assert!(player2_id.is_none());
    } else {
        panic!("expected Result variant");
    }
}

#[test]
fn fixture_result_tie_has_null_winner() {
    let json = r#"{
        "type": "result",
        "player1Choice": "paper",
        "player2Choice": "paper",
        "player1Score": 2,
        "player2Score": 2,
        "winner": null
    }"#;
    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    if let ServerMessage::Result { winner, .. } = msg {
        assert!(winner.is_none());
    } else {
        panic!("expected Result variant");
    }
}

#[test]
fn fixture_result_with_slot_identity_tags() {
    let json = r#"{
        "type": "result",
        "player1Choice": "rock",
        "player2Choice": "paper",
        "player1Score": 0,
        "player2Score": 1,
        "winner": "player-b",
        "player1Id": "player-a",
        "player2Id": "player-b"
    }"#;
    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    if let ServerMessage::Result {
        player1_id,
        player2_id,
        ..
    } = msg
    {
        assert_eq!(player1_id, Some(PlayerId::from("player-a")));
        assert_eq!(player2_id, Some(PlayerId::from("player-b")));
    } else {
        panic!("expected Result variant");
    }
}

#[test]
fn fixture_error() {
    let msg: ServerMessage =
        serde_json::from_str(r#"{"type":"error","message":"room full"}"#).unwrap();
    if let ServerMessage::Error { message } = msg {
        assert_eq!(message, "room full");
    } else {
        panic!("expected Error variant");
    }
}

// ════════════════════════════════════════════════════════════════════
// Forward compatibility and malformed frames
// ════════════════════════════════════════════════════════════════════

#[test]
fn unknown_type_decodes_to_unknown() {
    for json in [
        r#"{"type":"matchmaking_hint"}"#,
        r#"{"type":"pong","latencyMs":12}"#,
        r#"{"type":""}"#,
    ] {
        let msg: ServerMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ServerMessage::Unknown), "for {json}");
    }
}

#[test]
fn recognized_type_with_missing_fields_fails_to_decode() {
    // Missing score/choice fields on a known type is a schema violation,
    // not an unknown message.
    let json = r#"{"type":"result","winner":null}"#;
    assert!(serde_json::from_str::<ServerMessage>(json).is_err());

    let json = r#"{"type":"error"}"#;
    assert!(serde_json::from_str::<ServerMessage>(json).is_err());
}

#[test]
fn invalid_choice_spelling_fails_to_decode() {
    let json = r#"{
        "type": "result",
        "player1Choice": "lizard",
        "player2Choice": "rock",
        "player1Score": 0,
        "player2Score": 0,
        "winner": null
    }"#;
    assert!(serde_json::from_str::<ServerMessage>(json).is_err());
}

#[test]
fn extra_fields_on_known_types_are_tolerated() {
    let json = r#"{"type":"ready","roomId":"room1","since":"2026-08-30T00:00:00Z"}"#;
    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    assert!(matches!(msg, ServerMessage::Ready));
}

#[test]
fn server_message_round_trips() {
    let original = ServerMessage::Result {
        player1_choice: Choice::Scissors,
        player2_choice: Choice::Paper,
        player1_score: 3,
        player2_score: 1,
        winner: Some(PlayerId::from("player-a")),
        player1_id: Some(PlayerId::from("player-a")),
        player2_id: Some(PlayerId::from("player-b")),
    };
    let json = serde_json::to_string(&original).unwrap();
    let val: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(val["type"], "result");
    assert_eq!(val["player1Choice"], "scissors");
    assert_eq!(val["player1Score"], 3);

    let back: ServerMessage = serde_json::from_str(&json).unwrap();
    assert!(matches!(back, ServerMessage::Result { .. }));
}

#[test]
fn absent_slot_tags_are_not_serialized() {
    let msg = ServerMessage::Result {
        player1_choice: Choice::Rock,
        player2_choice: Choice::Rock,
        player1_score: 0,
        player2_score: 0,
        winner: None,
        player1_id: None,
        player2_id: None,
    };
    let json = serde_json::to_string(&msg).unwrap();
    assert!(!json.contains("player1Id"));
    assert!(!json.contains("player2Id"));
}

// ════════════════════════════════════════════════════════════════════
// PlayerId
// ════════════════════════════════════════════════════════════════════

#[test]
fn player_id_serializes_transparently() {
    let id = PlayerId::from("player-xyz");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"player-xyz\"");
    let back: PlayerId = serde_json::from_str("\"player-xyz\"").unwrap();
    assert_eq!(back, id);
}

#[test]
fn generated_player_ids_are_distinct() {
    let ids: Vec<PlayerId> = (0..8).map(|_| PlayerId::generate()).collect();
    for (i, a) in ids.iter().enumerate() {
        for b in ids.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}
