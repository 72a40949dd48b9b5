//! Error types for the portfolio front-end.

use thiserror::Error;

/// Errors raised while mounting page components.
///
/// Most of these are not surfaced to the visitor: a missing capability makes
/// the affected component fall back to a no-op and the error is only logged.
#[derive(Debug, Error)]
pub enum Error {
    /// A host capability (observer, 2D context, storage, ...) is unavailable
    #[error("capability unavailable: {0}")]
    MissingCapability(&'static str),

    /// An element the page expects is not in the document
    #[error("element not found: {0}")]
    MissingElement(String),

    /// `data-variant` named an animation that does not exist
    #[error("unknown reveal variant: {0:?}")]
    UnknownVariant(String),

    /// Stored theme value is not light, dark or system
    #[error("unknown theme: {0:?}")]
    UnknownTheme(String),

    /// A numeric attribute did not parse
    #[error("invalid value for {attribute}: {value:?}")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },

    /// Threshold outside [0, 1]
    #[error("visibility threshold {0} outside [0, 1]")]
    ThresholdOutOfRange(f64),

    /// Transition duration must be positive
    #[error("transition duration must be positive")]
    ZeroDuration,

    /// A browser call threw
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
