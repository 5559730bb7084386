use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use beacon_core::SignalPayload;

use crate::capability::{ConnectivityState, PeerEvent, SignalChannel};
use crate::engine::CallEngine;
use crate::error::CallError;

/// User-facing status derived from connectivity transitions and room
/// events.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CallStatus {
    Idle,
    Connecting,
    Connected,
    ConnectionLost,
    Reconnecting,
    Failed,
    Ended,
}

/// Watches the peer connection's event stream and reacts: status updates,
/// candidate forwarding, remote stream handover, and bounded ICE-restart
/// recovery on failure.
pub struct Supervisor {
    engine: Arc<CallEngine>,
    signals: Arc<dyn SignalChannel>,
    status_tx: watch::Sender<CallStatus>,
}

impl Supervisor {
    pub fn new(
        engine: Arc<CallEngine>,
        signals: Arc<dyn SignalChannel>,
    ) -> (Arc<Self>, watch::Receiver<CallStatus>) {
        let (status_tx, status_rx) = watch::channel(CallStatus::Idle);
        let supervisor = Arc::new(Self {
            engine,
            signals,
            status_tx,
        });
        (supervisor, status_rx)
    }

    /// Pump the peer event stream on a background task.
    pub fn spawn(self: &Arc<Self>, events: mpsc::UnboundedReceiver<PeerEvent>) -> JoinHandle<()> {
        let supervisor = Arc::clone(self);
        tokio::spawn(async move { supervisor.run(events).await })
    }

    /// Consume peer events until the capability drops its sender.
    pub async fn run(&self, mut events: mpsc::UnboundedReceiver<PeerEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        debug!("Peer event stream closed");
    }

    pub async fn handle_event(&self, event: PeerEvent) {
        match event {
            PeerEvent::ConnectivityChanged(connectivity) => {
                self.handle_connectivity(connectivity).await;
            }

            // Candidates go out as they are discovered; in a two-party room
            // the broadcast reaches exactly the peer.
            PeerEvent::CandidateGathered(candidate) => {
                self.signals
                    .send(None, SignalPayload::Candidate { candidate })
                    .await;
            }

            PeerEvent::RemoteStreamAdded(stream) => {
                self.engine.set_remote_stream(stream).await;
            }
        }
    }

    /// The remote peer left the room: explicit cleanup, independent of any
    /// connectivity callback.
    pub async fn peer_left(&self) {
        self.engine.peer_left().await;
        let _ = self.status_tx.send(CallStatus::Ended);
    }

    /// The signaling transport dropped. Fatal for the call.
    pub async fn transport_lost(&self) {
        warn!("Signaling transport disconnected, tearing down call");
        self.engine.teardown().await;
        let _ = self.status_tx.send(CallStatus::Failed);
    }

    async fn handle_connectivity(&self, connectivity: ConnectivityState) {
        debug!("Connectivity changed: {:?}", connectivity);

        let status = match connectivity {
            ConnectivityState::New | ConnectivityState::Connecting => Some(CallStatus::Connecting),
            ConnectivityState::Connected => Some(CallStatus::Connected),
            ConnectivityState::Disconnected => Some(CallStatus::ConnectionLost),
            ConnectivityState::Closed => Some(CallStatus::Ended),
            ConnectivityState::Failed => match self.engine.restart_ice().await {
                Ok(()) => Some(CallStatus::Reconnecting),
                Err(CallError::ConnectivityFailure { attempts }) => {
                    error!("Giving up after {} ICE restarts", attempts);
                    Some(CallStatus::Failed)
                }
                Err(e) => {
                    warn!("ICE restart rejected: {}", e);
                    None
                }
            },
        };

        if let Some(status) = status {
            let _ = self.status_tx.send(status);
        }
    }
}
