use contracts::generation::{
    GenerationTask, PreviewRequest, RefineRequest, TaskCreated, TaskListPage,
};

use crate::shared::api_utils::{api_url, get_json, post_json};

/// Start a preview (geometry) generation task
pub async fn create_preview(request: &PreviewRequest) -> Result<TaskCreated, String> {
    post_json("/api/meshy/preview", request).await
}

/// Start a refine (texture) task on a finished preview
pub async fn create_refine(request: &RefineRequest) -> Result<TaskCreated, String> {
    post_json("/api/meshy/refine", request).await
}

/// Fetch the current state of a task
pub async fn get_task(task_id: &str) -> Result<GenerationTask, String> {
    get_json(&format!("/api/meshy/task/{}", task_id)).await
}

/// Task history for this browser session
pub async fn list_tasks(page_num: u32, page_size: u32) -> Result<TaskListPage, String> {
    get_json(&format!(
        "/api/meshy/list?page_num={}&page_size={}",
        page_num, page_size
    ))
    .await
}

/// Rewrite a CDN asset URL to go through the backend proxy, which fixes up
/// the content type for the in-browser viewer.
pub fn proxied_asset_url(asset_url: &str) -> String {
    let encoded = String::from(js_sys::encode_uri_component(asset_url));
    api_url(&format!("/api/meshy/proxy?url={}", encoded))
}
