//! Browser device access: geolocation and camera.

pub mod camera;
pub mod geolocation;

pub use camera::{open_camera, BrowserTrack, CameraHandle};
pub use geolocation::request_location;

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::utils::js_error_text;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Browser API unavailable: {0}")]
    Unavailable(&'static str),

    #[error("Browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for MediaError {
    fn from(value: JsValue) -> Self {
        MediaError::Js(js_error_text(&value))
    }
}
