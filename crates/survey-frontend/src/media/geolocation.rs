//! One-shot position lookup behind an explicit confirmation.

use js_sys::{Promise, Reflect};
use survey_core::geo::{LocationFix, LocationOutcome};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::utils::confirm;

const LOCATION_PROMPT: &str = "Please allow location access to auto-populate address fields.";

fn number_at(target: &JsValue, path: &[&str]) -> Option<f64> {
    let mut value = target.clone();
    for key in path {
        value = Reflect::get(&value, &JsValue::from_str(key)).ok()?;
    }
    value.as_f64()
}

/// Confirm with the user, then ask the browser for the current position.
pub async fn request_location() -> LocationOutcome {
    if !confirm(LOCATION_PROMPT) {
        return LocationOutcome::Declined;
    }

    let Some(geolocation) = web_sys::window()
        .map(|w| w.navigator())
        .and_then(|n| n.geolocation().ok())
    else {
        return LocationOutcome::Unsupported;
    };

    let promise = Promise::new(&mut |resolve, reject| {
        let on_success = Closure::once_into_js(move |position: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &position);
        });
        let on_error = Closure::once_into_js(move |error: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &error);
        });
        if let Err(e) = geolocation.get_current_position_with_error_callback(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
        ) {
            tracing::warn!("Geolocation request could not start: {:?}", e);
        }
    });

    match JsFuture::from(promise).await {
        Ok(position) => {
            let latitude = number_at(&position, &["coords", "latitude"]);
            let longitude = number_at(&position, &["coords", "longitude"]);
            match latitude.zip(longitude) {
                Some((lat, lng)) => LocationOutcome::Located(LocationFix::new(lat, lng)),
                None => LocationOutcome::Unsupported,
            }
        }
        Err(error) => {
            let code = number_at(&error, &["code"]).unwrap_or_default() as u16;
            LocationOutcome::from_error_code(code)
        }
    }
}
