use std::sync::Arc;
use tracing::{debug, info};

use beacon_core::{ServerMessage, SignalPayload};

use crate::engine::CallEngine;
use crate::error::CallError;
use crate::supervisor::Supervisor;

/// The inbound leg of a call: routes messages relayed by the server into
/// the engine and supervisor. The outbound leg is the `SignalChannel` the
/// embedder wired into both.
pub struct CallSession {
    engine: Arc<CallEngine>,
    supervisor: Arc<Supervisor>,
}

impl CallSession {
    pub fn new(engine: Arc<CallEngine>, supervisor: Arc<Supervisor>) -> Self {
        Self { engine, supervisor }
    }

    pub fn engine(&self) -> &Arc<CallEngine> {
        &self.engine
    }

    /// Dispatch one relayed message. Errors are returned for the embedder
    /// to surface as status; none of them require abandoning the session.
    pub async fn handle_server_message(&self, message: ServerMessage) -> Result<(), CallError> {
        match message {
            ServerMessage::Welcome { socket_id } => {
                debug!("Connected to relay as {}", socket_id);
                Ok(())
            }

            ServerMessage::PeersInRoom { peers } => {
                if let Some(peer) = peers.into_iter().next() {
                    self.engine.set_remote_peer(peer).await;
                }
                Ok(())
            }

            ServerMessage::PeerJoined { socket_id } => {
                info!("Peer joined: {}", socket_id);
                self.engine.set_remote_peer(socket_id).await;
                Ok(())
            }

            ServerMessage::PeerLeft { socket_id } => {
                info!("Peer left: {}", socket_id);
                self.supervisor.peer_left().await;
                Ok(())
            }

            ServerMessage::Signal { from, data } => match data {
                SignalPayload::Offer { offer } => self.engine.handle_remote_offer(from, offer).await,
                SignalPayload::Answer { answer } => {
                    self.engine.handle_remote_answer(from, answer).await
                }
                SignalPayload::Candidate { candidate } => {
                    self.engine.add_remote_candidate(candidate).await
                }
            },
        }
    }

    /// Start a call towards the room's other member.
    pub async fn start_call(&self) -> Result<(), CallError> {
        self.engine.start_call().await
    }

    /// Leave the call: unconditional teardown of the peer connection and
    /// local media.
    pub async fn leave(&self) {
        self.engine.teardown().await;
    }

    /// The signaling transport dropped; the call cannot continue.
    pub async fn handle_transport_disconnected(&self) {
        self.supervisor.transport_lost().await;
    }
}
