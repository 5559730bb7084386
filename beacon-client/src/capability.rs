//! Capability surfaces the call engine consumes. The embedding runtime
//! (a browser binding, a native WebRTC stack, or a test mock) implements
//! these; the engine only ever talks to the traits.

use async_trait::async_trait;
use std::sync::Arc;

use beacon_core::{IceCandidate, SessionDescription, SessionId, SignalPayload, TrackKind};

/// Capture constraints requested from the media capability.
#[derive(Debug, Clone)]
pub struct MediaConstraints {
    pub video_width: u32,
    pub video_height: u32,
    pub audio: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            video_width: 1280,
            video_height: 720,
            audio: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MediaCaptureError {
    /// The user (or platform policy) refused device access.
    #[error("device access denied: {0}")]
    AccessDenied(String),

    #[error("capture failed: {0}")]
    Failed(String),
}

/// A single captured device track.
pub trait LocalTrack: Send + Sync {
    fn kind(&self) -> TrackKind;

    /// Stop the track and release the device behind it.
    fn stop(&self);
}

/// The capture stream handed out by [`MediaCapture::acquire`].
pub trait LocalStream: Send + Sync {
    fn tracks(&self) -> Vec<Arc<dyn LocalTrack>>;
}

/// Camera/microphone acquisition (the `getUserMedia` analogue).
#[async_trait]
pub trait MediaCapture: Send + Sync {
    async fn acquire(
        &self,
        constraints: MediaConstraints,
    ) -> Result<Arc<dyn LocalStream>, MediaCaptureError>;
}

/// Inbound media from the remote peer. The engine replaces this handle
/// wholesale on every new inbound stream, it never merges tracks.
pub trait RemoteStream: Send + Sync {
    fn id(&self) -> String;
}

/// Render target for the remote stream.
pub trait VideoSink: Send + Sync {
    fn attach(&self, stream: Arc<dyn RemoteStream>);
    fn clear(&self);
}

/// Connectivity of the underlying peer connection, as reported by the
/// capability's state-change events.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConnectivityState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

/// Events pushed by the peer-connection capability.
pub enum PeerEvent {
    ConnectivityChanged(ConnectivityState),
    CandidateGathered(IceCandidate),
    RemoteStreamAdded(Arc<dyn RemoteStream>),
}

#[derive(Debug, thiserror::Error)]
#[error("peer connection error: {0}")]
pub struct PeerConnectionError(pub String);

/// Peer-connection primitives the negotiation engine drives.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn create_offer(
        &self,
        ice_restart: bool,
    ) -> Result<SessionDescription, PeerConnectionError>;

    async fn create_answer(&self) -> Result<SessionDescription, PeerConnectionError>;

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), PeerConnectionError>;

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), PeerConnectionError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), PeerConnectionError>;

    async fn add_track(&self, track: Arc<dyn LocalTrack>) -> Result<(), PeerConnectionError>;

    /// Kinds that already have a sender attached (the `getSenders` surface).
    fn sender_kinds(&self) -> Vec<TrackKind>;

    async fn close(&self);
}

/// Outbound signaling leg: payloads addressed to one session, or broadcast
/// to the room when `to` is `None`.
#[async_trait]
pub trait SignalChannel: Send + Sync {
    async fn send(&self, to: Option<SessionId>, payload: SignalPayload);
}
