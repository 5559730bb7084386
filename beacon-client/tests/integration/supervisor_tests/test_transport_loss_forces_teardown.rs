use std::sync::Arc;

use beacon_client::{CallPhase, CallSession, CallStatus};

use crate::init_tracing;
use crate::utils::{TestCall, establish_call};

#[tokio::test]
async fn test_transport_loss_forces_teardown() {
    init_tracing();

    let call = TestCall::new();
    establish_call(&call).await;

    let (supervisor, status_rx) = call.supervisor();
    let session = CallSession::new(Arc::clone(&call.engine), supervisor);

    session.handle_transport_disconnected().await;

    // Transport loss is fatal to the call: full teardown on the spot.
    assert_eq!(call.engine.phase().await, CallPhase::Closed);
    assert!(call.pc.was_closed());
    assert_eq!(call.capture.live_track_count(), 0);
    assert_eq!(*status_rx.borrow(), CallStatus::Failed);
}
