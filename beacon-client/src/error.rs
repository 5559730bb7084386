use thiserror::Error;

use crate::capability::{MediaCaptureError, PeerConnectionError};
use crate::engine::CallPhase;

/// Errors surfaced by the call engine. Media and state-violation errors
/// leave the call retryable; transport loss and exhausted connectivity
/// recovery are fatal to the call.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("media access denied: {0}")]
    MediaAccessDenied(String),

    #[error("media capture failed: {0}")]
    MediaUnavailable(String),

    #[error("invalid signal payload: {0}")]
    InvalidSignalPayload(String),

    #[error("{operation} is not valid while the call is {phase:?}")]
    NegotiationStateViolation {
        phase: CallPhase,
        operation: &'static str,
    },

    #[error("signaling transport disconnected")]
    TransportDisconnected,

    #[error("connectivity failed after {attempts} restart attempts")]
    ConnectivityFailure { attempts: u32 },

    #[error(transparent)]
    PeerConnection(#[from] PeerConnectionError),
}

impl CallError {
    /// Whether the call can continue after this error (as opposed to
    /// requiring a full teardown).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CallError::MediaAccessDenied(_)
                | CallError::MediaUnavailable(_)
                | CallError::InvalidSignalPayload(_)
                | CallError::NegotiationStateViolation { .. }
        )
    }
}

impl From<MediaCaptureError> for CallError {
    fn from(err: MediaCaptureError) -> Self {
        match err {
            MediaCaptureError::AccessDenied(reason) => CallError::MediaAccessDenied(reason),
            MediaCaptureError::Failed(reason) => CallError::MediaUnavailable(reason),
        }
    }
}
