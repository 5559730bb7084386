pub mod config;
pub mod relay;
pub mod signaling;

pub use config::{RelayConfig, router};
pub use relay::{Relay, RelayCommand};
pub use signaling::{SignalingOutput, SignalingService, ws_handler};
