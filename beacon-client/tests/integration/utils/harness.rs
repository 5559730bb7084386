use std::sync::Arc;
use tokio::sync::watch;

use beacon_client::{
    CallConfig, CallEngine, CallStatus, MediaCapture, PeerConnection, SignalChannel, Supervisor,
    VideoSink,
};
use beacon_core::{IceCandidate, SessionDescription, SessionId};

use super::{MockMediaCapture, MockPeerConnection, MockSignalChannel, MockVideoSink};

/// Everything a test needs to drive one call end to end.
pub struct TestCall {
    pub engine: Arc<CallEngine>,
    pub pc: Arc<MockPeerConnection>,
    pub capture: Arc<MockMediaCapture>,
    pub signals: Arc<MockSignalChannel>,
    pub sink: Arc<MockVideoSink>,
}

impl TestCall {
    pub fn new() -> Self {
        Self::with_config(CallConfig::default())
    }

    pub fn with_config(config: CallConfig) -> Self {
        let pc = Arc::new(MockPeerConnection::new());
        let capture = Arc::new(MockMediaCapture::new());
        let signals = Arc::new(MockSignalChannel::new());
        let sink = Arc::new(MockVideoSink::new());

        let engine = Arc::new(CallEngine::new(
            Arc::clone(&pc) as Arc<dyn PeerConnection>,
            Arc::clone(&capture) as Arc<dyn MediaCapture>,
            Arc::clone(&signals) as Arc<dyn SignalChannel>,
            Arc::clone(&sink) as Arc<dyn VideoSink>,
            config,
        ));

        Self {
            engine,
            pc,
            capture,
            signals,
            sink,
        }
    }

    pub fn supervisor(&self) -> (Arc<Supervisor>, watch::Receiver<CallStatus>) {
        Supervisor::new(
            Arc::clone(&self.engine),
            Arc::clone(&self.signals) as Arc<dyn SignalChannel>,
        )
    }
}

/// Drive a call to Stable: offer out, answer back in. Returns the peer id
/// the call is established with.
pub async fn establish_call(call: &TestCall) -> SessionId {
    let peer = SessionId::new();
    call.engine.set_remote_peer(peer.clone()).await;
    call.engine.start_call().await.expect("start_call should succeed");
    call.engine
        .handle_remote_answer(peer.clone(), SessionDescription::answer("v=0"))
        .await
        .expect("answer should complete the call");
    peer
}

pub fn candidate(n: u16) -> IceCandidate {
    IceCandidate {
        candidate: format!("candidate:{n} 1 UDP {n} 10.0.0.{n} 5000 typ host"),
        sdp_mid: Some("0".to_string()),
        sdp_m_line_index: Some(0),
    }
}
