use tokio::sync::mpsc;

use beacon_core::{RoomId, SessionDescription, SessionId, SignalPayload};
use beacon_server::RelayCommand;

/// Register a fresh session with the relay, as the WebSocket layer does on
/// upgrade.
pub async fn connect(relay_tx: &mpsc::Sender<RelayCommand>) -> SessionId {
    let session_id = SessionId::new();
    relay_tx
        .send(RelayCommand::Connect {
            session_id: session_id.clone(),
        })
        .await
        .expect("relay should be running");
    session_id
}

pub async fn join(relay_tx: &mpsc::Sender<RelayCommand>, session_id: &SessionId, room: &str) {
    relay_tx
        .send(RelayCommand::Join {
            session_id: session_id.clone(),
            room_id: RoomId::from(room),
        })
        .await
        .expect("relay should be running");
}

pub async fn leave(relay_tx: &mpsc::Sender<RelayCommand>, session_id: &SessionId, room: &str) {
    relay_tx
        .send(RelayCommand::Leave {
            session_id: session_id.clone(),
            room_id: RoomId::from(room),
        })
        .await
        .expect("relay should be running");
}

pub async fn disconnect(relay_tx: &mpsc::Sender<RelayCommand>, session_id: &SessionId) {
    relay_tx
        .send(RelayCommand::Disconnect {
            session_id: session_id.clone(),
        })
        .await
        .expect("relay should be running");
}

pub async fn signal(
    relay_tx: &mpsc::Sender<RelayCommand>,
    session_id: &SessionId,
    room: &str,
    to: Option<SessionId>,
    data: SignalPayload,
) {
    relay_tx
        .send(RelayCommand::Signal {
            session_id: session_id.clone(),
            room_id: RoomId::from(room),
            to,
            data,
        })
        .await
        .expect("relay should be running");
}

pub fn offer_payload() -> SignalPayload {
    SignalPayload::Offer {
        offer: SessionDescription::offer("v=0"),
    }
}

pub fn answer_payload() -> SignalPayload {
    SignalPayload::Answer {
        answer: SessionDescription::answer("v=0"),
    }
}
