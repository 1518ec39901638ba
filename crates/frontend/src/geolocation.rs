use thiserror::Error;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Give up on a fix after this long.
pub const TIMEOUT_MS: u32 = 5_000;

/// Only a fresh fix is acceptable.
pub const MAXIMUM_AGE_MS: u32 = 0;

/// The detect button stays in its working state at least this long.
pub const DETECT_BUTTON_HOLD_MS: u32 = 1_500;

// W3C GeolocationPositionError codes.
const PERMISSION_DENIED: u16 = 1;
const POSITION_UNAVAILABLE: u16 = 2;
const TIMEOUT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported by this browser")]
    Unsupported,
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out after {} seconds", TIMEOUT_MS / 1000)]
    Timeout,
    #[error("{0}")]
    Other(String),
}

impl GeolocationError {
    pub fn from_code(code: u16, message: String) -> Self {
        match code {
            PERMISSION_DENIED => GeolocationError::PermissionDenied,
            POSITION_UNAVAILABLE => GeolocationError::PositionUnavailable,
            TIMEOUT => GeolocationError::Timeout,
            _ if message.is_empty() => GeolocationError::Other("unknown error".to_string()),
            _ => GeolocationError::Other(message),
        }
    }

    /// Line shown under the detect button.
    pub fn user_message(&self) -> String {
        format!(
            "Could not detect location: {}. Please enter coordinates manually.",
            self
        )
    }

    fn from_js(value: JsValue) -> Self {
        let code = js_sys::Reflect::get(&value, &JsValue::from_str("code"))
            .ok()
            .and_then(|v| v.as_f64())
            .map(|c| c as u16)
            .unwrap_or(0);
        let message = js_sys::Reflect::get(&value, &JsValue::from_str("message"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        GeolocationError::from_code(code, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres, 95% confidence.
    pub accuracy: f64,
}

impl DeviceFix {
    pub fn user_message(&self) -> String {
        format!("Location detected (\u{00b1}{:.0}m).", self.accuracy)
    }
}

fn position_options() -> web_sys::PositionOptions {
    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(TIMEOUT_MS);
    options.set_maximum_age(MAXIMUM_AGE_MS);
    options
}

/// Ask the device for a single fresh position.
pub async fn current_position() -> Result<DeviceFix, GeolocationError> {
    let geolocation = web_sys::window()
        .ok_or(GeolocationError::Unsupported)?
        .navigator()
        .geolocation()
        .map_err(|_| GeolocationError::Unsupported)?;
    let options = position_options();

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let reject_sync = reject.clone();
        let on_success = Closure::once_into_js(move |position: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &position);
        });
        let on_error = Closure::once_into_js(move |error: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &error);
        });
        if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
            &options,
        ) {
            let _ = reject_sync.call1(&JsValue::NULL, &err);
        }
    });

    let position: web_sys::Position = JsFuture::from(promise)
        .await
        .map_err(GeolocationError::from_js)?
        .unchecked_into();
    let coords = position.coords();

    Ok(DeviceFix {
        latitude: coords.latitude(),
        longitude: coords.longitude(),
        accuracy: coords.accuracy(),
    })
}
