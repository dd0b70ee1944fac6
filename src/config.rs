//! Runtime settings lookup
//!
//! A page can override the defaults by defining `window.SCUHA_CONFIG`, either
//! as an object or as a JSON string, before the wasm module starts.

use scuha_core::{CatalogConfig, ConfigError};
use wasm_bindgen::prelude::*;

const CONFIG_GLOBAL: &str = "SCUHA_CONFIG";

/// Settings for this page load. Anything invalid falls back to the defaults.
pub fn load_config() -> CatalogConfig {
    match read_overrides() {
        Ok(Some(config)) => {
            tracing::info!("Using page config: {:?}", config);
            config
        }
        Ok(None) => CatalogConfig::default(),
        Err(e) => {
            tracing::warn!("Ignoring window.{}: {}", CONFIG_GLOBAL, e);
            CatalogConfig::default()
        }
    }
}

fn read_overrides() -> Result<Option<CatalogConfig>, ConfigError> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| ConfigError::Decode(format!("{:?}", e)))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }

    if let Some(json) = value.as_string() {
        return CatalogConfig::from_json(&json).map(Some);
    }
    if !value.is_object() || js_sys::Array::is_array(&value) {
        return Err(ConfigError::Decode("expected an object".to_string()));
    }

    let config: CatalogConfig =
        serde_wasm_bindgen::from_value(value).map_err(|e| ConfigError::Decode(e.to_string()))?;
    config.validate()?;
    Ok(Some(config))
}
