//! Reads the snapshot payload once at startup.
//!
//! Web builds fetch `source` relative to the page; native builds read it from disk.
//! There are no retries: a failure is returned to the caller, which logs it and shows it.

use thiserror::Error;
use tracing::{debug, info};

use super::config::DashboardConfig;
use super::platform::Platform;
use super::snapshot::{DriftSnapshot, ShapeError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request for the drift data failed: {0}")]
    Fetch(String),
    #[error("{url} answered with HTTP {status}")]
    Status { status: u16, url: String },
    #[error("couldn't read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("drift data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("drift data has an inconsistent shape: {0}")]
    Shape(#[from] ShapeError),
}

/// Parses and validates a raw payload.
pub fn parse_snapshot(raw: &str) -> Result<DriftSnapshot, LoadError> {
    let snapshot: DriftSnapshot = serde_json::from_str(raw)?;
    snapshot.check_shape()?;
    Ok(snapshot)
}

/// Reads, parses and validates the payload at `source`.
pub async fn load_snapshot(source: &str) -> Result<DriftSnapshot, LoadError> {
    debug!(
        source,
        platform = Platform::current().label(),
        "loading drift snapshot"
    );
    let raw = read_source(source).await?;
    let snapshot = parse_snapshot(&raw)?;
    info!(
        source,
        turns = snapshot.turn_count(),
        "drift snapshot loaded"
    );
    Ok(snapshot)
}

/// Loads the payload a launcher configured: the embedded copy when there is one, otherwise
/// whatever `data_source` points at.
pub async fn load_configured(config: &DashboardConfig) -> Result<DriftSnapshot, LoadError> {
    let Some(raw) = config.embedded else {
        return load_snapshot(&config.data_source).await;
    };
    let snapshot = parse_snapshot(raw)?;
    info!(
        source = %config.data_source,
        turns = snapshot.turn_count(),
        "embedded drift snapshot loaded"
    );
    Ok(snapshot)
}

#[cfg(target_arch = "wasm32")]
async fn read_source(source: &str) -> Result<String, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("window unavailable".into()))?;
    let response = JsFuture::from(window.fetch_with_str(source))
        .await
        .map_err(|err| LoadError::Fetch(js_error_text(&err)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| LoadError::Fetch("unexpected fetch result".into()))?;

    if !response.ok() {
        return Err(LoadError::Status {
            status: response.status(),
            url: source.to_string(),
        });
    }

    let body = response
        .text()
        .map_err(|err| LoadError::Fetch(js_error_text(&err)))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|err| LoadError::Fetch(js_error_text(&err)))?;
    text.as_string()
        .ok_or_else(|| LoadError::Fetch("response body is not text".into()))
}

#[cfg(target_arch = "wasm32")]
fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &wasm_bindgen::JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_source(source: &str) -> Result<String, LoadError> {
    std::fs::read_to_string(source).map_err(|source_err| LoadError::Io {
        path: source.to_string(),
        source: source_err,
    })
}
