//! The message catalogue spoken over the relay's WebSocket. Field names are
//! a compatibility contract with existing clients; the tests below pin the
//! exact JSON spelling.

use serde::{Deserialize, Serialize};

use crate::model::{IceCandidate, RoomId, SessionDescription, SessionId};

/// Negotiation payload routed verbatim by the relay. The relay inspects
/// nothing beyond the envelope; these shapes belong to the two endpoints.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SignalPayload {
    Offer { offer: SessionDescription },
    Answer { answer: SessionDescription },
    Candidate { candidate: IceCandidate },
}

/// Messages a client sends to the relay.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    Join { room_id: RoomId },

    /// Unicast when `to` is present, otherwise broadcast to the room
    /// excluding the sender.
    #[serde(rename_all = "camelCase")]
    Signal {
        room_id: RoomId,
        to: Option<SessionId>,
        data: SignalPayload,
    },

    #[serde(rename_all = "camelCase")]
    Leave { room_id: RoomId },
}

/// Messages the relay sends to a client.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// First message on every connection, carrying the session id the relay
    /// assigned to it.
    #[serde(rename_all = "camelCase")]
    Welcome { socket_id: SessionId },

    /// Reply to `join`: the other current members of the room.
    PeersInRoom { peers: Vec<SessionId> },

    #[serde(rename_all = "camelCase")]
    PeerJoined { socket_id: SessionId },

    #[serde(rename_all = "camelCase")]
    PeerLeft { socket_id: SessionId },

    Signal {
        from: SessionId,
        data: SignalPayload,
    },
}
