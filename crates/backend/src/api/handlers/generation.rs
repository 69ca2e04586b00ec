use axum::{
    body::Body,
    extract::{Json, Path, Query},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Extension,
};
use serde::Deserialize;

use contracts::generation::{
    GenerationTask, PreviewRequest, RefineRequest, TaskCreated, TaskListPage,
};

use crate::api::error::ApiError;
use crate::domain::generation::service;
use crate::system::sessions::middleware::SessionId;

/// Start a preview (geometry) generation task
pub async fn create_preview(
    Extension(SessionId(session_id)): Extension<SessionId>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<TaskCreated>, ApiError> {
    if let Err(e) = request.validate() {
        tracing::warn!("Preview request rejected: {}", e);
        return Err(ApiError::bad_request(e));
    }

    let created = service::create_preview(&session_id, &request)
        .await
        .map_err(|e| {
            tracing::error!("Failed to start preview task: {}", e);
            ApiError::bad_gateway(e.to_string())
        })?;

    Ok(Json(created))
}

/// Start a refine (texture) task on a finished preview
pub async fn create_refine(
    Extension(SessionId(session_id)): Extension<SessionId>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<TaskCreated>, ApiError> {
    if let Err(e) = request.validate() {
        tracing::warn!("Refine request rejected: {}", e);
        return Err(ApiError::bad_request(e));
    }

    let created = service::create_refine(&session_id, &request)
        .await
        .map_err(|e| {
            tracing::error!("Failed to start refine task: {}", e);
            ApiError::bad_gateway(e.to_string())
        })?;

    Ok(Json(created))
}

/// Current vendor state of one task
pub async fn get_task(Path(task_id): Path<String>) -> Result<Json<GenerationTask>, ApiError> {
    let task = service::get_task(&task_id).await.map_err(|e| {
        tracing::error!(%task_id, "Failed to fetch task: {}", e);
        ApiError::bad_gateway(e.to_string())
    })?;

    Ok(Json(task))
}

fn default_page_num() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page_num")]
    pub page_num: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Task history for the caller's session
pub async fn list_tasks(
    Extension(SessionId(session_id)): Extension<SessionId>,
    Query(params): Query<ListParams>,
) -> Result<Json<TaskListPage>, ApiError> {
    let page = service::list_tasks(&session_id, params.page_num, params.page_size)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list tasks: {}", e);
            ApiError::internal(e.to_string())
        })?;

    Ok(Json(page))
}

/// Only model assets from the generation vendor's CDN may be proxied.
const ALLOWED_ASSET_PREFIX: &str = "https://assets.meshy.ai/";

/// Reject anything that is not a plain asset URL on the vendor CDN.
pub fn validate_proxy_url(url: &str) -> Result<(), &'static str> {
    if !url.starts_with(ALLOWED_ASSET_PREFIX) {
        return Err("URL is not on the allowed asset host");
    }
    if url.contains('@') {
        return Err("userinfo is not allowed in asset URLs");
    }
    if url.contains("..") {
        return Err("path traversal is not allowed in asset URLs");
    }
    Ok(())
}

/// Pick the content type the viewer expects for a given asset path.
/// The CDN serves .glb files as octet-stream, which the browser viewer
/// refuses to load.
pub fn asset_content_type(url: &str) -> Option<&'static str> {
    let path = url.split('?').next().unwrap_or(url).to_ascii_lowercase();
    if path.ends_with(".glb") {
        Some("model/gltf-binary")
    } else if path.ends_with(".gltf") {
        Some("model/gltf+json")
    } else {
        None
    }
}

#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    pub url: String,
}

/// Stream a model asset from the vendor CDN to the browser, fixing up the
/// content type so in-page viewers accept it.
pub async fn proxy_asset(Query(params): Query<ProxyParams>) -> Result<Response, ApiError> {
    if let Err(reason) = validate_proxy_url(&params.url) {
        tracing::warn!(url = %params.url, "Proxy request refused: {}", reason);
        return Err(ApiError::bad_request(reason));
    }

    let upstream = reqwest::get(&params.url).await.map_err(|e| {
        tracing::error!(url = %params.url, "Asset fetch failed: {}", e);
        ApiError::bad_gateway(format!("Asset fetch failed: {}", e))
    })?;

    if !upstream.status().is_success() {
        let status = upstream.status().as_u16();
        tracing::warn!(url = %params.url, status, "Asset fetch returned error");
        return Err(ApiError::bad_gateway(format!(
            "Asset host returned HTTP {}",
            status
        )));
    }

    let content_type = asset_content_type(&params.url)
        .map(HeaderValue::from_static)
        .or_else(|| upstream.headers().get(header::CONTENT_TYPE).cloned())
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, "inline")
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");

    if let Some(len) = upstream.headers().get(header::CONTENT_LENGTH) {
        builder = builder.header(header::CONTENT_LENGTH, len.clone());
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| {
            tracing::error!("Failed to build proxy response: {}", e);
            ApiError::internal("Failed to build proxy response")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_accepts_cdn_assets_only() {
        assert!(validate_proxy_url("https://assets.meshy.ai/x/model.glb").is_ok());
        assert!(validate_proxy_url("https://evil.example/model.glb").is_err());
        assert!(validate_proxy_url("http://assets.meshy.ai/x/model.glb").is_err());
    }

    #[test]
    fn proxy_rejects_userinfo_and_traversal() {
        assert!(validate_proxy_url("https://assets.meshy.ai/@evil.example/m.glb").is_err());
        assert!(validate_proxy_url("https://assets.meshy.ai/../secret").is_err());
    }

    #[test]
    fn content_type_overrides_by_extension() {
        assert_eq!(
            asset_content_type("https://assets.meshy.ai/x/m.glb"),
            Some("model/gltf-binary")
        );
        assert_eq!(
            asset_content_type("https://assets.meshy.ai/x/m.glb?Expires=123"),
            Some("model/gltf-binary")
        );
        assert_eq!(
            asset_content_type("https://assets.meshy.ai/x/m.gltf"),
            Some("model/gltf+json")
        );
        assert_eq!(asset_content_type("https://assets.meshy.ai/x/tex.png"), None);
    }

    #[test]
    fn content_type_ignores_extension_case() {
        assert_eq!(
            asset_content_type("https://assets.meshy.ai/x/M.GLB"),
            Some("model/gltf-binary")
        );
        assert_eq!(
            asset_content_type("https://assets.meshy.ai/x/M.GLTF?Expires=123"),
            Some("model/gltf+json")
        );
    }
}
