//! The per-call negotiation state machine. One engine exists per call; all
//! mutations go through a single mutex-guarded entry so no two operations
//! on the same call are ever in flight concurrently.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use beacon_core::{IceCandidate, SessionId, TrackKind};

use crate::capability::{
    MediaCapture, MediaConstraints, PeerConnection, RemoteStream, SignalChannel, VideoSink,
};
use crate::error::CallError;
use crate::media::MediaSession;

mod negotiation_impl;
mod recovery_impl;

/// Lifecycle phase of a call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CallPhase {
    Idle,
    Offering,
    Answering,
    Stable,
    Restarting,
    Failed,
    Closed,
}

#[derive(Debug, Clone)]
pub struct CallConfig {
    /// How many ICE restarts a call may spend before giving up. The budget
    /// is per call, not per failure, so a flapping link cannot loop
    /// forever.
    pub max_ice_restarts: u32,
    pub constraints: MediaConstraints,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            max_ice_restarts: 3,
            constraints: MediaConstraints::default(),
        }
    }
}

pub(crate) struct CallState {
    pub(crate) phase: CallPhase,
    pub(crate) media: MediaSession,
    pub(crate) remote_peer: Option<SessionId>,
    /// Whether the peer connection currently holds a remote description;
    /// candidates arriving before that are queued.
    pub(crate) remote_description_set: bool,
    pub(crate) pending_candidates: VecDeque<IceCandidate>,
    pub(crate) remote_stream: Option<Arc<dyn RemoteStream>>,
    pub(crate) restart_attempts: u32,
}

pub struct CallEngine {
    pub(crate) config: CallConfig,
    pub(crate) pc: Arc<dyn PeerConnection>,
    pub(crate) signals: Arc<dyn SignalChannel>,
    pub(crate) sink: Arc<dyn VideoSink>,
    pub(crate) state: Mutex<CallState>,
}

impl CallEngine {
    pub fn new(
        pc: Arc<dyn PeerConnection>,
        capture: Arc<dyn MediaCapture>,
        signals: Arc<dyn SignalChannel>,
        sink: Arc<dyn VideoSink>,
        config: CallConfig,
    ) -> Self {
        let media = MediaSession::new(capture, config.constraints.clone());
        Self {
            config,
            pc,
            signals,
            sink,
            state: Mutex::new(CallState {
                phase: CallPhase::Idle,
                media,
                remote_peer: None,
                remote_description_set: false,
                pending_candidates: VecDeque::new(),
                remote_stream: None,
                restart_attempts: 0,
            }),
        }
    }

    pub async fn phase(&self) -> CallPhase {
        self.state.lock().await.phase
    }

    pub async fn remote_peer(&self) -> Option<SessionId> {
        self.state.lock().await.remote_peer.clone()
    }

    /// Record the session to address signaling to. Learned from the room's
    /// membership events; a later peer-joined overrides an earlier
    /// snapshot (they name the same peer in a two-party room).
    pub async fn set_remote_peer(&self, peer: SessionId) {
        self.state.lock().await.remote_peer = Some(peer);
    }

    pub async fn has_remote_stream(&self) -> bool {
        self.state.lock().await.remote_stream.is_some()
    }

    pub async fn media_active(&self) -> bool {
        self.state.lock().await.media.is_active()
    }

    /// Attach every local track whose kind has no sender yet. Never creates
    /// a second sender for a kind, whatever renegotiation got us here.
    pub(crate) async fn attach_local_tracks(
        &self,
        state: &mut CallState,
    ) -> Result<(), CallError> {
        let stream = state.media.ensure_stream().await?;
        let mut attached: Vec<TrackKind> = self.pc.sender_kinds();

        for track in stream.tracks() {
            let kind = track.kind();
            if attached.contains(&kind) {
                debug!("Skipping {:?} track, sender already present", kind);
                continue;
            }
            self.pc.add_track(track).await?;
            attached.push(kind);
        }

        Ok(())
    }

    /// Apply every candidate that arrived before the remote description, in
    /// original arrival order.
    pub(crate) async fn flush_pending_candidates(&self, state: &mut CallState) {
        while let Some(candidate) = state.pending_candidates.pop_front() {
            if let Err(e) = self.pc.add_ice_candidate(candidate).await {
                warn!("Failed to apply queued candidate: {}", e);
            }
        }
    }

    /// Shared cleanup behind `teardown` and `peer_left`. Safe to run from
    /// any phase; after it the call is `Closed` and holds no device or
    /// connection handles.
    pub(crate) async fn close_call(&self, state: &mut CallState) {
        if state.phase == CallPhase::Closed {
            return;
        }

        self.pc.close().await;
        state.remote_stream = None;
        self.sink.clear();
        state.media.release();
        state.pending_candidates.clear();
        state.remote_description_set = false;
        state.phase = CallPhase::Closed;
        debug!("Call closed");
    }
}
