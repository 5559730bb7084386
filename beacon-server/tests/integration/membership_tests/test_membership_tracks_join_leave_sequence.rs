use beacon_core::ServerMessage;

use crate::utils::{connect, disconnect, join, leave};
use crate::{create_test_relay, init_tracing};

#[tokio::test]
async fn test_membership_tracks_join_leave_sequence() {
    init_tracing();

    let (relay_tx, output) = create_test_relay();

    let a = connect(&relay_tx).await;
    let b = connect(&relay_tx).await;
    let c = connect(&relay_tx).await;
    let d = connect(&relay_tx).await;

    join(&relay_tx, &a, "r1").await;
    join(&relay_tx, &b, "r1").await;
    join(&relay_tx, &c, "r1").await;
    leave(&relay_tx, &b, "r1").await;
    disconnect(&relay_tx, &c).await;

    // After the dust settles only a is left; d's snapshot must say so.
    join(&relay_tx, &d, "r1").await;

    output
        .wait_for_total(11, 1000)
        .await
        .expect("the whole sequence should be processed");

    let snapshot: Vec<ServerMessage> = output
        .messages_for(&d)
        .await
        .into_iter()
        .filter(|message| matches!(message, ServerMessage::PeersInRoom { .. }))
        .collect();
    assert_eq!(
        snapshot,
        vec![ServerMessage::PeersInRoom {
            peers: vec![a.clone()]
        }],
        "membership is exactly the sessions that joined and have not left or disconnected"
    );
}
