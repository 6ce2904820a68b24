//! Image files as photos and as a capture device.

use std::path::{Path, PathBuf};

use anyhow::Context;
use soulbound_types::{CaptureDevice, CaptureError, CaptureStream, Photo};

fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// Read an image file into a data-URL photo.
pub fn load_photo(path: &Path) -> anyhow::Result<Photo> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read image {}", path.display()))?;
    Ok(Photo::from_bytes(content_type(path), &bytes))
}

/// A capture device whose single frame is an image file.
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CaptureDevice for FileCamera {
    type Stream = FileStream;

    fn start(&self) -> Result<FileStream, CaptureError> {
        if !self.path.is_file() {
            return Err(CaptureError::Unavailable(format!(
                "{} is not a file",
                self.path.display()
            )));
        }
        Ok(FileStream {
            path: Some(self.path.clone()),
        })
    }
}

pub struct FileStream {
    path: Option<PathBuf>,
}

impl CaptureStream for FileStream {
    fn capture(&mut self) -> Result<Photo, CaptureError> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| CaptureError::CaptureFailed("stream stopped".into()))?;
        let bytes = std::fs::read(path).map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        if bytes.is_empty() {
            return Err(CaptureError::CaptureFailed(format!(
                "{} is empty",
                path.display()
            )));
        }
        Ok(Photo::from_bytes(content_type(path), &bytes))
    }

    fn stop(&mut self) {
        self.path = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_camera_yields_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selfie.PNG");
        std::fs::write(&path, b"png bytes").unwrap();

        let mut stream = FileCamera::new(&path).start().unwrap();
        let photo = stream.capture().unwrap();
        assert_eq!(photo.content_type(), Some("image/png"));
        assert_eq!(photo.decode().unwrap(), b"png bytes");

        stream.stop();
        stream.stop();
        assert!(stream.capture().is_err());
    }

    #[test]
    fn missing_file_is_unavailable() {
        assert!(matches!(
            FileCamera::new("/nonexistent/selfie.jpg").start(),
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[test]
    fn load_photo_defaults_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id");
        std::fs::write(&path, b"raw").unwrap();
        assert_eq!(load_photo(&path).unwrap().content_type(), Some("image/jpeg"));
    }
}
