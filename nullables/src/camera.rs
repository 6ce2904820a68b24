//! Nullable camera: a capture device that records acquire/release.

use soulbound_types::{CaptureDevice, CaptureError, CaptureStream, Photo};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Counters {
    starts: AtomicUsize,
    stops: AtomicUsize,
    active: AtomicBool,
}

/// A camera that yields a fixed frame.
///
/// The device tracks whether a stream is currently held, so tests can assert
/// the camera was released on every path.
pub struct NullCamera {
    frame: Photo,
    fail_start: bool,
    fail_capture: bool,
    counters: Arc<Counters>,
}

impl NullCamera {
    pub fn new(frame: Photo) -> Self {
        Self {
            frame,
            fail_start: false,
            fail_capture: false,
            counters: Arc::default(),
        }
    }

    /// Refuse to start, as if permission was denied.
    pub fn unavailable(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Start fine but fail to grab a frame.
    pub fn failing_capture(mut self) -> Self {
        self.fail_capture = true;
        self
    }

    pub fn is_active(&self) -> bool {
        self.counters.active.load(Ordering::SeqCst)
    }

    pub fn start_count(&self) -> usize {
        self.counters.starts.load(Ordering::SeqCst)
    }

    /// Number of streams released.
    pub fn stop_count(&self) -> usize {
        self.counters.stops.load(Ordering::SeqCst)
    }
}

impl CaptureDevice for NullCamera {
    type Stream = NullCameraStream;

    fn start(&self) -> Result<Self::Stream, CaptureError> {
        if self.fail_start {
            return Err(CaptureError::Unavailable("permission denied".into()));
        }
        self.counters.starts.fetch_add(1, Ordering::SeqCst);
        self.counters.active.store(true, Ordering::SeqCst);
        Ok(NullCameraStream {
            frame: self.frame.clone(),
            fail_capture: self.fail_capture,
            counters: self.counters.clone(),
            stopped: false,
        })
    }
}

/// A started [`NullCamera`].
pub struct NullCameraStream {
    frame: Photo,
    fail_capture: bool,
    counters: Arc<Counters>,
    stopped: bool,
}

impl CaptureStream for NullCameraStream {
    fn capture(&mut self) -> Result<Photo, CaptureError> {
        if self.stopped {
            return Err(CaptureError::CaptureFailed("stream stopped".into()));
        }
        if self.fail_capture {
            return Err(CaptureError::CaptureFailed("no frame available".into()));
        }
        Ok(self.frame.clone())
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.counters.stops.fetch_add(1, Ordering::SeqCst);
        self.counters.active.store(false, Ordering::SeqCst);
    }
}
