use std::sync::Arc;
use tracing::{info, warn};

use beacon_core::SignalPayload;

use crate::capability::RemoteStream;
use crate::engine::{CallEngine, CallPhase};
use crate::error::CallError;

impl CallEngine {
    /// Renegotiate connectivity without discarding the peer connection or
    /// media. Each call spends one unit of the per-call restart budget;
    /// exhausting it fails the call.
    pub async fn restart_ice(&self) -> Result<(), CallError> {
        let mut state = self.state.lock().await;

        // Restarts make sense only while a negotiation is live: from
        // Stable, from a previous restart, or while an offer is already in
        // flight (the link died again before the answer).
        if !matches!(
            state.phase,
            CallPhase::Stable | CallPhase::Restarting | CallPhase::Offering
        ) {
            return Err(CallError::NegotiationStateViolation {
                phase: state.phase,
                operation: "restart_ice",
            });
        }

        if state.restart_attempts >= self.config.max_ice_restarts {
            state.phase = CallPhase::Failed;
            warn!(
                "Connectivity failed for good after {} restarts",
                state.restart_attempts
            );
            return Err(CallError::ConnectivityFailure {
                attempts: state.restart_attempts,
            });
        }

        state.restart_attempts += 1;
        state.phase = CallPhase::Restarting;
        info!(
            "ICE restart {}/{}",
            state.restart_attempts, self.config.max_ice_restarts
        );

        let offer = self.pc.create_offer(true).await?;
        self.pc.set_local_description(offer.clone()).await?;
        state.phase = CallPhase::Offering;

        let to = state.remote_peer.clone();
        self.signals.send(to, SignalPayload::Offer { offer }).await;

        Ok(())
    }

    /// Replace the remote stream reference and point the sink at it. The
    /// previous stream is dropped, never merged into.
    pub async fn set_remote_stream(&self, stream: Arc<dyn RemoteStream>) {
        let mut state = self.state.lock().await;

        if state.phase == CallPhase::Closed {
            return;
        }

        state.remote_stream = Some(Arc::clone(&stream));
        self.sink.attach(stream);
    }

    /// The remote peer left the room. Close down explicitly rather than
    /// waiting for a connectivity callback to notice.
    pub async fn peer_left(&self) {
        let mut state = self.state.lock().await;
        info!("Remote peer left, closing call");
        self.close_call(&mut state).await;
    }

    /// Tear the call down from whatever phase it is in. Idempotent; on
    /// return no device or connection handle remains.
    pub async fn teardown(&self) {
        let mut state = self.state.lock().await;
        self.close_call(&mut state).await;
    }
}
