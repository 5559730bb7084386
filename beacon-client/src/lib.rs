pub mod capability;
pub mod engine;
pub mod error;
pub mod media;
pub mod session;
pub mod supervisor;

pub use capability::{
    ConnectivityState, LocalStream, LocalTrack, MediaCapture, MediaCaptureError, MediaConstraints,
    PeerConnection, PeerConnectionError, PeerEvent, RemoteStream, SignalChannel, VideoSink,
};
pub use engine::{CallConfig, CallEngine, CallPhase};
pub use error::CallError;
pub use media::MediaSession;
pub use session::CallSession;
pub use supervisor::{CallStatus, Supervisor};
