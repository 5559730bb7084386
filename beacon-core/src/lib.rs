pub mod model;
pub mod wire;

pub use model::{IceCandidate, RoomId, SdpKind, SessionDescription, SessionId, TrackKind};
pub use wire::{ClientMessage, ServerMessage, SignalPayload};
