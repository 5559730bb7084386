use crate::init_tracing;
use crate::utils::TestCall;

#[tokio::test]
async fn test_release_stops_every_track() {
    init_tracing();

    let call = TestCall::new();
    call.engine
        .start_call()
        .await
        .expect("start_call should succeed");
    assert_eq!(call.capture.live_track_count(), 2);

    call.engine.teardown().await;

    assert_eq!(
        call.capture.live_track_count(),
        0,
        "no device handle may outlive the call"
    );
    assert!(!call.engine.media_active().await);
}
