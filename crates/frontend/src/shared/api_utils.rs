//! API utilities for frontend-backend communication.
//!
//! Every request carries the X-Session-ID header so the backend can
//! correlate generation tasks with the browser session. The id the backend
//! echoes back is persisted to localStorage.

use contracts::error::ErrorBody;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

const SESSION_HEADER: &str = "X-Session-ID";
const SESSION_STORAGE_KEY: &str = "df_session_id";

/// Get the base URL for API requests.
///
/// The backend listens on port 3000 regardless of where the bundle is
/// served from.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn stored_session_id() -> Option<String> {
    local_storage()?.get_item(SESSION_STORAGE_KEY).ok()?
}

fn remember_session_id(response: &Response) {
    if let Some(id) = response.headers().get(SESSION_HEADER) {
        if !id.is_empty() {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(SESSION_STORAGE_KEY, &id);
            }
        }
    }
}

fn with_session(builder: RequestBuilder) -> RequestBuilder {
    match stored_session_id() {
        Some(id) => builder.header(SESSION_HEADER, &id),
        None => builder,
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    remember_session_id(&response);

    if !response.ok() {
        // Backend errors carry a JSON body with the detail; fall back to
        // the bare status when the body is missing or not ours.
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.error)
            .filter(|message| !message.is_empty());
        return Err(detail.unwrap_or_else(|| format!("Request failed: {}", status)));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET a JSON payload from the backend
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = with_session(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    parse(response).await
}

/// POST a JSON body and read back a JSON payload
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, String> {
    let response = with_session(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    parse(response).await
}

/// GET with a bearer token
pub async fn get_json_auth<T: DeserializeOwned>(path: &str, token: &str) -> Result<T, String> {
    let response = with_session(Request::get(&api_url(path)))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    parse(response).await
}

/// POST with a bearer token
pub async fn post_json_auth<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    token: &str,
) -> Result<T, String> {
    let response = with_session(Request::post(&api_url(path)))
        .header("Authorization", &format!("Bearer {}", token))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    parse(response).await
}
