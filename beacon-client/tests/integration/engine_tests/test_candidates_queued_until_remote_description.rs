use beacon_core::{SessionDescription, SessionId};

use crate::init_tracing;
use crate::utils::{TestCall, candidate};

#[tokio::test]
async fn test_candidates_queued_until_remote_description() {
    init_tracing();

    let call = TestCall::new();
    let peer = SessionId::new();
    call.engine.set_remote_peer(peer.clone()).await;
    call.engine
        .start_call()
        .await
        .expect("start_call should succeed");

    // Candidates trickle in before the answer: queued, not applied.
    for n in 1..=3 {
        call.engine
            .add_remote_candidate(candidate(n))
            .await
            .expect("early candidate must be accepted");
    }
    assert!(call.pc.candidates_applied().is_empty());

    // The answer sets the remote description; the queue drains in arrival
    // order.
    call.engine
        .handle_remote_answer(peer, SessionDescription::answer("v=0"))
        .await
        .expect("answer should be accepted");
    assert_eq!(
        call.pc.candidates_applied(),
        vec![candidate(1), candidate(2), candidate(3)]
    );

    // From here on, candidates apply immediately.
    call.engine
        .add_remote_candidate(candidate(4))
        .await
        .expect("late candidate must be applied");
    assert_eq!(call.pc.candidates_applied().len(), 4);
    assert_eq!(call.pc.candidates_applied()[3], candidate(4));
}

#[tokio::test]
async fn test_candidates_before_offer_reach_the_connection() {
    init_tracing();

    // Callee side: candidates can even precede the offer itself.
    let call = TestCall::new();
    let peer = SessionId::new();

    call.engine
        .add_remote_candidate(candidate(1))
        .await
        .expect("pre-offer candidate must be accepted");

    call.engine
        .handle_remote_offer(peer, SessionDescription::offer("v=0"))
        .await
        .expect("offer should be answered");

    assert_eq!(call.pc.candidates_applied(), vec![candidate(1)]);
}
