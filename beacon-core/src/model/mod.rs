mod media;
mod room;
mod session;

pub use media::{IceCandidate, SdpKind, SessionDescription, TrackKind};
pub use room::RoomId;
pub use session::SessionId;
