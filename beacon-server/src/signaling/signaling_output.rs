use async_trait::async_trait;
use beacon_core::{ServerMessage, SessionId};

/// Delivery interface the relay actor uses to reach connected sessions.
/// Implemented by the WebSocket layer; tests substitute a capturing mock.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Deliver a message to one session. Fire-and-forget: failures are the
    /// implementation's to log, never the relay's to handle.
    async fn deliver(&self, session_id: SessionId, message: ServerMessage);
}
