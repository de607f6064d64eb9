#![no_main]

use libfuzzer_sys::fuzz_target;
use roshambo_client::protocol::ServerMessage;

fuzz_target!(|data: &[u8]| {
    // Decoding is total: arbitrary bytes either fail cleanly or land in a
    // known variant (unrecognized `type` values map to `Unknown`).
    let Ok(msg) = serde_json::from_slice::<ServerMessage>(data) else {
        return;
    };

    // Every recognized frame must survive re-encoding, and a result frame's
    // authoritative fields must pass through verbatim — the client mirrors
    // scores, it never recomputes them.
    if let ServerMessage::Result {
        player1_score,
        player2_score,
        winner,
        ..
    } = &msg
    {
        let scores = (*player1_score, *player2_score);
        let had_winner = winner.is_some();

        let encoded = serde_json::to_string(&msg).unwrap();
        match serde_json::from_str::<ServerMessage>(&encoded) {
            Ok(ServerMessage::Result {
                player1_score,
                player2_score,
                winner,
                ..
            }) => {
                assert_eq!((player1_score, player2_score), scores);
                assert_eq!(winner.is_some(), had_winner);
            }
            other => panic!("result frame failed to round-trip: {other:?}"),
        }
    }
});
