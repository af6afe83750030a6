//! Camera capture lifecycle.
//!
//! A capture session owns the device stream for as long as the capture
//! dialog is open. Capturing a frame or cancelling consumes the session and
//! stops every track before returning; dropping it does the same.

use crate::types::{Photo, PhotoKind};

/// One live media track (the browser's `MediaStreamTrack`)
pub trait MediaTrack {
    fn stop(&self);
}

/// Result of asking for camera access
#[derive(Debug)]
pub enum CameraAccess<T> {
    Granted(Vec<T>),
    Denied(String),
    Unsupported,
}

impl<T> CameraAccess<T> {
    /// Warning shown when the camera is unavailable; the file picker remains.
    pub fn warning(&self) -> Option<String> {
        match self {
            CameraAccess::Granted(_) => None,
            CameraAccess::Denied(reason) => Some(format!(
                "Camera access denied ({reason}). Please upload a photo instead."
            )),
            CameraAccess::Unsupported => {
                Some("Camera is not supported by this browser. Please upload a photo instead.".to_string())
            }
        }
    }
}

/// Owns the tracks of one stream and stops them exactly once.
#[derive(Debug)]
pub struct StreamGuard<T: MediaTrack> {
    tracks: Vec<T>,
    released: bool,
}

impl<T: MediaTrack> StreamGuard<T> {
    pub fn new(tracks: Vec<T>) -> Self {
        Self {
            tracks,
            released: false,
        }
    }

    pub fn tracks(&self) -> &[T] {
        &self.tracks
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        for track in &self.tracks {
            track.stop();
        }
        self.released = true;
        tracing::debug!(tracks = self.tracks.len(), "camera stream released");
    }
}

impl<T: MediaTrack> Drop for StreamGuard<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// An open capture dialog for one photo slot
#[derive(Debug)]
pub struct CaptureSession<T: MediaTrack> {
    kind: PhotoKind,
    stream: StreamGuard<T>,
}

impl<T: MediaTrack> CaptureSession<T> {
    /// Open a session from the outcome of the permission request. Denial
    /// yields the warning to show instead.
    pub fn open(kind: PhotoKind, access: CameraAccess<T>) -> Result<Self, String> {
        let warning = access.warning();
        match access {
            CameraAccess::Granted(tracks) => Ok(Self {
                kind,
                stream: StreamGuard::new(tracks),
            }),
            _ => Err(warning.unwrap_or_default()),
        }
    }

    pub fn kind(&self) -> PhotoKind {
        self.kind
    }

    pub fn stream(&self) -> &StreamGuard<T> {
        &self.stream
    }

    /// Keep the snapshot and close; tracks are stopped before returning.
    pub fn capture(mut self, frame_data_url: String) -> (PhotoKind, Photo) {
        self.stream.release();
        (self.kind, Photo::captured(frame_data_url))
    }

    /// Close without a photo; tracks are stopped before returning.
    pub fn cancel(mut self) -> PhotoKind {
        self.stream.release();
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct FakeTrack {
        stops: Rc<Cell<u32>>,
    }

    impl MediaTrack for FakeTrack {
        fn stop(&self) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    fn tracks(n: usize) -> (Vec<FakeTrack>, Vec<Rc<Cell<u32>>>) {
        let counters: Vec<_> = (0..n).map(|_| Rc::new(Cell::new(0))).collect();
        let tracks = counters
            .iter()
            .map(|c| FakeTrack { stops: c.clone() })
            .collect();
        (tracks, counters)
    }

    #[test]
    fn test_capture_stops_all_tracks() {
        let (t, counters) = tracks(2);
        let session = CaptureSession::open(PhotoKind::Building, CameraAccess::Granted(t)).unwrap();
        assert!(!session.stream().is_released());
        let (kind, photo) = session.capture("data:image/png;base64,AAAA".to_string());
        assert_eq!(kind, PhotoKind::Building);
        assert_eq!(photo.data_url, "data:image/png;base64,AAAA");
        assert!(counters.iter().all(|c| c.get() == 1));
    }

    #[test]
    fn test_cancel_stops_all_tracks() {
        let (t, counters) = tracks(3);
        let session = CaptureSession::open(PhotoKind::MainGate, CameraAccess::Granted(t)).unwrap();
        assert_eq!(session.cancel(), PhotoKind::MainGate);
        assert!(counters.iter().all(|c| c.get() == 1));
    }

    #[test]
    fn test_drop_releases_once() {
        let (t, counters) = tracks(1);
        {
            let mut guard = StreamGuard::new(t);
            guard.release();
        }
        assert_eq!(counters[0].get(), 1);
    }

    #[test]
    fn test_denied_camera_falls_back() {
        let result = CaptureSession::<FakeTrack>::open(
            PhotoKind::MainGate,
            CameraAccess::Denied("NotAllowedError".to_string()),
        );
        let warning = result.unwrap_err();
        assert!(warning.contains("upload a photo instead"));
    }
}
