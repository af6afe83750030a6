//! In-browser camera capture for the photo step.

use survey_core::capture::{CameraAccess, CaptureSession, MediaTrack};
use survey_core::types::{Photo, PhotoKind};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

use super::MediaError;
use crate::utils::js_error_text;

const SNAPSHOT_MIME: &str = "image/jpeg";
const SNAPSHOT_QUALITY: f64 = 0.85;

/// A live `MediaStreamTrack`
#[derive(Debug)]
pub struct BrowserTrack(MediaStreamTrack);

impl MediaTrack for BrowserTrack {
    fn stop(&self) {
        self.0.stop();
    }
}

/// An open capture dialog bound to a browser stream. Tracks stop when the
/// handle is captured, cancelled or dropped.
#[derive(Debug)]
pub struct CameraHandle {
    session: CaptureSession<BrowserTrack>,
    stream: MediaStream,
}

async fn request_stream() -> Result<MediaStream, CameraAccess<BrowserTrack>> {
    let Some(devices) = web_sys::window().and_then(|w| w.navigator().media_devices().ok()) else {
        return Err(CameraAccess::Unsupported);
    };

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|_| CameraAccess::Unsupported)?;

    match JsFuture::from(promise).await {
        Ok(value) => value
            .dyn_into::<MediaStream>()
            .map_err(|_| CameraAccess::Unsupported),
        Err(e) => Err(CameraAccess::Denied(js_error_text(&e))),
    }
}

/// Ask for the camera and open a capture session for `kind`. Errors carry
/// the warning to show next to the file picker.
pub async fn open_camera(kind: PhotoKind) -> Result<CameraHandle, String> {
    let stream = match request_stream().await {
        Ok(stream) => stream,
        Err(refused) => {
            tracing::warn!("Camera unavailable for {} photo", kind.label());
            return Err(refused.warning().unwrap_or_default());
        }
    };

    let tracks = stream
        .get_tracks()
        .iter()
        .filter_map(|t| t.dyn_into::<MediaStreamTrack>().ok())
        .map(BrowserTrack)
        .collect();
    let session = CaptureSession::open(kind, CameraAccess::Granted(tracks))?;
    Ok(CameraHandle { session, stream })
}

impl CameraHandle {
    pub fn kind(&self) -> PhotoKind {
        self.session.kind()
    }

    /// Show the live preview in `video`.
    pub fn attach(&self, video: &HtmlVideoElement) {
        video.set_src_object(Some(&self.stream));
        if let Err(e) = video.play() {
            tracing::warn!("Camera preview did not start: {}", js_error_text(&e));
        }
    }

    /// Snapshot the current frame and close the camera.
    pub fn capture(self, video: &HtmlVideoElement) -> Result<(PhotoKind, Photo), MediaError> {
        let frame = snapshot(video);
        video.set_src_object(None);
        match frame {
            Ok(data_url) => Ok(self.session.capture(data_url)),
            Err(e) => {
                self.session.cancel();
                Err(e)
            }
        }
    }

    /// Close without a photo.
    pub fn cancel(self, video: Option<&HtmlVideoElement>) -> PhotoKind {
        if let Some(video) = video {
            video.set_src_object(None);
        }
        self.session.cancel()
    }
}

fn snapshot(video: &HtmlVideoElement) -> Result<String, MediaError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MediaError::Unavailable("document"))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| MediaError::Unavailable("canvas"))?;
    canvas.set_width(video.video_width());
    canvas.set_height(video.video_height());

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(MediaError::Unavailable("2d context"))?
        .dyn_into()
        .map_err(|_| MediaError::Unavailable("2d context"))?;
    context.draw_image_with_html_video_element(video, 0.0, 0.0)?;

    Ok(canvas.to_data_url_with_type_and_encoder_options(
        SNAPSHOT_MIME,
        &SNAPSHOT_QUALITY.into(),
    )?)
}
