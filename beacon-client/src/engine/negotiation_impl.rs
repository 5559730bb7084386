use tracing::{debug, info};

use beacon_core::{IceCandidate, SdpKind, SessionDescription, SessionId, SignalPayload};

use crate::engine::{CallEngine, CallPhase};
use crate::error::CallError;

impl CallEngine {
    /// Initiate a call: acquire media, attach tracks, send an offer.
    ///
    /// Valid from `Idle` only; while an offer or answer is outstanding no
    /// second one may be created.
    pub async fn start_call(&self) -> Result<(), CallError> {
        let mut state = self.state.lock().await;

        if state.phase != CallPhase::Idle {
            return Err(CallError::NegotiationStateViolation {
                phase: state.phase,
                operation: "start_call",
            });
        }

        self.attach_local_tracks(&mut state).await?;

        let offer = self.pc.create_offer(false).await?;
        self.pc.set_local_description(offer.clone()).await?;
        state.phase = CallPhase::Offering;

        // Broadcast when the peer is not yet known; the only other member
        // of the room is the callee either way.
        let to = state.remote_peer.clone();
        info!("Offer created, sending to {:?}", to);
        self.signals.send(to, SignalPayload::Offer { offer }).await;

        Ok(())
    }

    /// Answer a remote offer. Valid for a fresh call only; an offer landing
    /// mid-session is rejected rather than silently replacing the session.
    pub async fn handle_remote_offer(
        &self,
        from: SessionId,
        offer: SessionDescription,
    ) -> Result<(), CallError> {
        let mut state = self.state.lock().await;

        if state.phase != CallPhase::Idle {
            return Err(CallError::NegotiationStateViolation {
                phase: state.phase,
                operation: "handle_remote_offer",
            });
        }
        if offer.kind != SdpKind::Offer {
            return Err(CallError::InvalidSignalPayload(format!(
                "offer message carrying a {:?} description",
                offer.kind
            )));
        }

        info!("Handling offer from {}", from);
        state.remote_peer = Some(from.clone());

        // Media first: a denied capture must fail the operation before any
        // description is touched, leaving the call fully retryable.
        state.media.ensure_stream().await?;

        self.pc.set_remote_description(offer).await?;
        state.remote_description_set = true;
        self.flush_pending_candidates(&mut state).await;

        state.phase = CallPhase::Answering;
        self.attach_local_tracks(&mut state).await?;

        let answer = self.pc.create_answer().await?;
        self.pc.set_local_description(answer.clone()).await?;
        state.phase = CallPhase::Stable;

        self.signals
            .send(Some(from), SignalPayload::Answer { answer })
            .await;

        Ok(())
    }

    /// Complete our outstanding offer with the remote answer.
    pub async fn handle_remote_answer(
        &self,
        from: SessionId,
        answer: SessionDescription,
    ) -> Result<(), CallError> {
        let mut state = self.state.lock().await;

        if state.phase != CallPhase::Offering {
            return Err(CallError::NegotiationStateViolation {
                phase: state.phase,
                operation: "handle_remote_answer",
            });
        }
        if answer.kind != SdpKind::Answer {
            return Err(CallError::InvalidSignalPayload(format!(
                "answer message carrying a {:?} description",
                answer.kind
            )));
        }

        info!("Handling answer from {}", from);
        self.pc.set_remote_description(answer).await?;
        state.remote_description_set = true;
        if state.remote_peer.is_none() {
            state.remote_peer = Some(from);
        }
        self.flush_pending_candidates(&mut state).await;
        state.phase = CallPhase::Stable;

        Ok(())
    }

    /// Apply a relayed ICE candidate, or queue it until a remote
    /// description exists. Queued candidates keep their arrival order.
    pub async fn add_remote_candidate(&self, candidate: IceCandidate) -> Result<(), CallError> {
        let mut state = self.state.lock().await;

        if matches!(state.phase, CallPhase::Closed | CallPhase::Failed) {
            debug!("Ignoring candidate for {:?} call", state.phase);
            return Ok(());
        }

        if state.remote_description_set {
            self.pc.add_ice_candidate(candidate).await?;
        } else {
            state.pending_candidates.push_back(candidate);
            debug!(
                "Queued remote candidate ({} pending)",
                state.pending_candidates.len()
            );
        }

        Ok(())
    }
}
