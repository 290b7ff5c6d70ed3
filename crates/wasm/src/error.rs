use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("mounted frame has no `.{0}` element")]
    MissingSlot(&'static str),
    #[error("call mount() first")]
    NotMounted,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for BridgeError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub(crate) fn window() -> Result<web_sys::Window, BridgeError> {
    web_sys::window().ok_or(BridgeError::NoWindow)
}

pub(crate) fn document() -> Result<web_sys::Document, BridgeError> {
    window()?.document().ok_or(BridgeError::NoDocument)
}
