//! Errors raised while touching the page

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A window, document or element the operation needs is not there
    #[error("missing render target: {0}")]
    MissingTarget(&'static str),
    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<wasm_bindgen::JsValue> for RenderError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        RenderError::Dom(format!("{:?}", value))
    }
}
