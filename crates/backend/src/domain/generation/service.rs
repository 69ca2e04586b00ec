use anyhow::Result;
use contracts::generation::{
    GenerationTask, PreviewRequest, RefineRequest, TaskCreated, TaskKind, TaskListPage,
};

use super::repository;
use crate::shared::vendors::meshy::MeshyClient;

/// Start a preview (geometry) task and record it against the session
pub async fn create_preview(session_id: &str, req: &PreviewRequest) -> Result<TaskCreated> {
    req.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = MeshyClient::from_config();
    let task_id = client.create_preview(req).await?;

    repository::insert(
        &task_id,
        session_id,
        TaskKind::Preview,
        Some(&req.prompt),
        None,
    )
    .await?;

    tracing::info!(%task_id, %session_id, "Preview task accepted");

    Ok(TaskCreated {
        success: true,
        task_id,
        session_id: session_id.to_string(),
        message: "3D model preview generation started!".to_string(),
    })
}

/// Start a refine (texture) task on top of a finished preview
pub async fn create_refine(session_id: &str, req: &RefineRequest) -> Result<TaskCreated> {
    req.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = MeshyClient::from_config();
    let task_id = client.create_refine(req).await?;

    repository::insert(
        &task_id,
        session_id,
        TaskKind::Refine,
        req.texture_prompt.as_deref(),
        Some(&req.preview_task_id),
    )
    .await?;

    tracing::info!(%task_id, %session_id, "Refine task accepted");

    Ok(TaskCreated {
        success: true,
        task_id,
        session_id: session_id.to_string(),
        message: "Texture refinement started!".to_string(),
    })
}

/// Fetch the current vendor state of a task and mirror it into the local
/// history row.
pub async fn get_task(task_id: &str) -> Result<GenerationTask> {
    let client = MeshyClient::from_config();
    let task = client.get_task(task_id).await?;

    if let Err(e) = repository::update_status(
        task_id,
        task.status,
        task.glb_url(),
        task.base_color_url(),
    )
    .await
    {
        // History sync is best effort, the vendor payload still goes out
        tracing::warn!(%task_id, "Failed to sync task row: {}", e);
    }

    Ok(task)
}

/// Session-scoped task history
pub async fn list_tasks(session_id: &str, page_num: u32, page_size: u32) -> Result<TaskListPage> {
    let page_size = page_size.clamp(1, 50);
    let page_num = page_num.max(1);
    let tasks = repository::list_by_session(session_id, page_num, page_size).await?;

    Ok(TaskListPage {
        success: true,
        tasks,
        page_num,
        page_size,
    })
}
