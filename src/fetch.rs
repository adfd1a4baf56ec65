use collect_core::{ConfigError, VersionConfig, VersionId};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_config(version: VersionId) -> Result<VersionConfig, ConfigError> {
    let path = version.config_path();
    log::info!("[config] fetching {}", path);
    let text = fetch_text(&path).await.map_err(|reason| ConfigError::Fetch {
        path: path.clone(),
        reason,
    })?;
    VersionConfig::parse(&path, &text)
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web::window().ok_or_else(|| "window not available".to_string())?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;

    let response: web::Response = response_value
        .dyn_into()
        .map_err(|_| "failed to cast fetch response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let text_promise = response
        .text()
        .map_err(|e| format!("response.text() failed: {:?}", e))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| format!("await response text failed: {:?}", e))?;
    text_value
        .as_string()
        .ok_or_else(|| "response text was not a string".to_string())
}
