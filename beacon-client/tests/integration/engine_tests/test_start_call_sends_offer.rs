use beacon_client::CallPhase;
use beacon_core::{SignalPayload, TrackKind};

use crate::init_tracing;
use crate::utils::TestCall;

#[tokio::test]
async fn test_start_call_sends_offer() {
    init_tracing();

    let call = TestCall::new();

    call.engine
        .start_call()
        .await
        .expect("start_call should succeed");

    assert_eq!(call.engine.phase().await, CallPhase::Offering);
    assert_eq!(call.capture.acquisitions(), 1);
    assert_eq!(call.pc.sender_count(TrackKind::Audio), 1);
    assert_eq!(call.pc.sender_count(TrackKind::Video), 1);

    let sent = call.signals.sent();
    assert_eq!(sent.len(), 1);
    let (to, payload) = &sent[0];
    assert!(to.is_none(), "peer unknown yet, offer goes out as broadcast");
    assert!(matches!(payload, SignalPayload::Offer { .. }));
}

#[tokio::test]
async fn test_start_call_targets_known_peer() {
    init_tracing();

    let call = TestCall::new();
    let peer = beacon_core::SessionId::new();
    call.engine.set_remote_peer(peer.clone()).await;

    call.engine
        .start_call()
        .await
        .expect("start_call should succeed");

    let sent = call.signals.sent();
    assert_eq!(sent[0].0, Some(peer));
}
