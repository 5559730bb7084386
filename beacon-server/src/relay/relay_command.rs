use beacon_core::{RoomId, SessionId, SignalPayload};

/// Commands fed to the relay actor by the transport layer (WebSocket).
#[derive(Debug)]
pub enum RelayCommand {
    /// A transport connected and was assigned a session id.
    Connect { session_id: SessionId },

    /// The session asks to enter a room.
    Join {
        session_id: SessionId,
        room_id: RoomId,
    },

    /// A negotiation payload to route: unicast when `to` is set, otherwise
    /// broadcast to the room excluding the sender.
    Signal {
        session_id: SessionId,
        room_id: RoomId,
        to: Option<SessionId>,
        data: SignalPayload,
    },

    /// The session leaves a room explicitly.
    Leave {
        session_id: SessionId,
        room_id: RoomId,
    },

    /// The transport closed. Implies a leave for every room the session is
    /// still in.
    Disconnect { session_id: SessionId },
}
