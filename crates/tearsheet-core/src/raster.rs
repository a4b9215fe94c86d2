//! # Rasterization Protocol
//!
//! Vector sources are converted off-thread. The bridge owns the request
//! side of a channel pair and correlates responses by request id, so a
//! slow or dead worker degrades a single item instead of hanging the
//! whole import.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::warn;

use crate::errors::RasterError;

/// A request to convert one vector source into pixels.
#[derive(Debug, Clone)]
pub struct RasterRequest {
    pub request_id: u64,
    pub source: String,
    pub max_width: f32,
    pub max_height: f32,
}

/// A worker's answer to one [`RasterRequest`].
#[derive(Debug, Clone)]
pub struct RasterResponse {
    pub request_id: u64,
    pub outcome: RasterOutcome,
}

#[derive(Debug, Clone)]
pub enum RasterOutcome {
    Converted(ConvertedImage),
    Failed { error: String },
}

/// Encoded PNG pixels plus their dimensions.
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub pixel_data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Client half of the rasterization channel pair.
pub struct RasterBridge {
    req_tx: Sender<RasterRequest>,
    resp_rx: Receiver<RasterResponse>,
    next_id: u64,
    timeout: Duration,
}

impl RasterBridge {
    pub fn new(
        req_tx: Sender<RasterRequest>,
        resp_rx: Receiver<RasterResponse>,
        timeout: Duration,
    ) -> Self {
        Self {
            req_tx,
            resp_rx,
            next_id: 0,
            timeout,
        }
    }

    /// Sends one conversion request and blocks for its response, up to
    /// the configured timeout. Responses for other ids are discarded.
    pub fn convert(
        &mut self,
        source: &str,
        max_width: f32,
        max_height: f32,
    ) -> Result<ConvertedImage, RasterError> {
        self.next_id += 1;
        let request_id = self.next_id;
        self.req_tx
            .send(RasterRequest {
                request_id,
                source: source.to_string(),
                max_width,
                max_height,
            })
            .map_err(|_| RasterError::Disconnected)?;

        let deadline = Instant::now() + self.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(RasterError::Timeout(self.timeout));
            }
            match self.resp_rx.recv_timeout(remaining) {
                Ok(response) if response.request_id == request_id => {
                    return match response.outcome {
                        RasterOutcome::Converted(image) => Ok(image),
                        RasterOutcome::Failed { error } => Err(RasterError::Failed(error)),
                    };
                }
                Ok(stale) => {
                    warn!(
                        got = stale.request_id,
                        want = request_id,
                        "dropping stale rasterization response"
                    );
                }
                Err(RecvTimeoutError::Timeout) => return Err(RasterError::Timeout(self.timeout)),
                Err(RecvTimeoutError::Disconnected) => return Err(RasterError::Disconnected),
            }
        }
    }
}
