use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

use beacon_core::{ServerMessage, SessionId};

use crate::relay::RelayCommand;
use crate::signaling::SignalingOutput;

struct SignalingInner {
    sessions: DashMap<SessionId, mpsc::UnboundedSender<Message>>,
}

/// Registry of connected sessions and their outbound WebSocket channels.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) relay_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                sessions: DashMap::new(),
            }),
            relay_tx,
        }
    }

    pub fn add_session(&self, session_id: SessionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.sessions.insert(session_id, tx);
    }

    pub fn remove_session(&self, session_id: &SessionId) {
        self.inner.sessions.remove(session_id);
    }

    pub(crate) fn send(&self, session_id: &SessionId, message: ServerMessage) {
        if let Some(session) = self.inner.sessions.get(session_id) {
            match serde_json::to_string(&message) {
                Ok(json) => {
                    if let Err(e) = session.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {}: {:?}", session_id, e);
                    }
                }
                Err(e) => error!("Failed to serialize server message: {}", e),
            }
        } else {
            warn!("Attempted to deliver to disconnected session {}", session_id);
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(&self, session_id: SessionId, message: ServerMessage) {
        self.send(&session_id, message);
    }
}
