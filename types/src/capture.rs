//! Image capture device seam.
//!
//! A device is started to obtain a stream; the stream yields frames until it is
//! stopped. Holding a started stream keeps the hardware busy (and its
//! indicator lit), so owners must stop it on every path.

use thiserror::Error;

use crate::Photo;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture device unavailable: {0}")]
    Unavailable(String),

    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),
}

/// A camera or other source of live face images.
pub trait CaptureDevice {
    type Stream: CaptureStream;

    /// Acquire the device.
    fn start(&self) -> Result<Self::Stream, CaptureError>;
}

/// An acquired device.
pub trait CaptureStream {
    /// Grab one frame as an encoded image.
    fn capture(&mut self) -> Result<Photo, CaptureError>;

    /// Release the device. Must be idempotent.
    fn stop(&mut self);
}
