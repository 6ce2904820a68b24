//! Scoped camera access.

use soulbound_types::{CaptureDevice, CaptureError, CaptureStream, Photo};

/// A started capture stream that is stopped when the session is dropped.
///
/// Stopping happens on every exit path, including early returns and unwinding.
pub struct CameraSession<S: CaptureStream> {
    stream: S,
}

impl<S: CaptureStream> CameraSession<S> {
    /// Start `device` and take ownership of its stream.
    pub fn open<D>(device: &D) -> Result<Self, CaptureError>
    where
        D: CaptureDevice<Stream = S>,
    {
        let stream = device.start()?;
        tracing::debug!("camera started");
        Ok(Self { stream })
    }

    pub fn capture(&mut self) -> Result<Photo, CaptureError> {
        self.stream.capture()
    }

    /// Release the device now instead of at scope end.
    pub fn close(self) {}
}

impl<S: CaptureStream> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.stream.stop();
        tracing::debug!("camera stopped");
    }
}

/// Grab a single frame, releasing the camera before returning.
pub fn capture_once<D: CaptureDevice>(device: &D) -> Result<Photo, CaptureError> {
    let mut session = CameraSession::open(device)?;
    let frame = session.capture();
    session.close();
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulbound_nullables::NullCamera;

    fn camera() -> NullCamera {
        NullCamera::new(Photo::from_bytes("image/jpeg", b"selfie"))
    }

    #[test]
    fn capture_once_releases_camera() {
        let cam = camera();
        let frame = capture_once(&cam).unwrap();
        assert_eq!(frame, Photo::from_bytes("image/jpeg", b"selfie"));
        assert!(!cam.is_active());
        assert_eq!(cam.stop_count(), 1);
    }

    #[test]
    fn failed_capture_still_releases_camera() {
        let cam = camera().failing_capture();
        assert!(capture_once(&cam).is_err());
        assert!(!cam.is_active());
        assert_eq!(cam.stop_count(), 1);
    }

    #[test]
    fn unwinding_releases_camera() {
        let cam = camera();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _session = CameraSession::open(&cam).unwrap();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert!(!cam.is_active());
    }

    #[test]
    fn session_is_active_until_dropped() {
        let cam = camera();
        {
            let mut session = CameraSession::open(&cam).unwrap();
            assert!(cam.is_active());
            session.capture().unwrap();
        }
        assert!(!cam.is_active());
    }
}
