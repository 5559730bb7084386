use std::sync::Arc;
use tracing::debug;

use crate::capability::{LocalStream, MediaCapture, MediaCaptureError, MediaConstraints};

/// Owns the local capture stream for one call. Acquisition happens at most
/// once per call lifetime; the stream is reused across renegotiations and
/// released unconditionally on teardown.
pub struct MediaSession {
    capture: Arc<dyn MediaCapture>,
    constraints: MediaConstraints,
    stream: Option<Arc<dyn LocalStream>>,
}

impl MediaSession {
    pub fn new(capture: Arc<dyn MediaCapture>, constraints: MediaConstraints) -> Self {
        Self {
            capture,
            constraints,
            stream: None,
        }
    }

    /// Return the call's capture stream, acquiring the devices on first
    /// use. A denied acquisition leaves nothing cached, so the next call
    /// re-prompts.
    pub async fn ensure_stream(&mut self) -> Result<Arc<dyn LocalStream>, MediaCaptureError> {
        if let Some(stream) = &self.stream {
            return Ok(Arc::clone(stream));
        }

        let stream = self.capture.acquire(self.constraints.clone()).await?;
        debug!("Local media acquired: {} tracks", stream.tracks().len());
        self.stream = Some(Arc::clone(&stream));
        Ok(stream)
    }

    /// Stop every track and drop the handle. Safe to call repeatedly; no
    /// device handle survives this.
    pub fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            for track in stream.tracks() {
                track.stop();
            }
            debug!("Local media released");
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }
}
