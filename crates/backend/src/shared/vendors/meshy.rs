//! Client for the Meshy text-to-3D API.

use super::{api_error, VendorError};
use crate::shared::config;
use contracts::generation::{GenerationTask, PreviewRequest, RefineRequest, TaskStatus};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const VENDOR: &str = "Meshy";

/// The vendor rejects prompts longer than this.
pub const MAX_PROMPT_CHARS: usize = 600;

/// Fixed poll cadence: 60 polls 15 seconds apart, 15 minutes total.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const POLL_MAX_ATTEMPTS: u32 = 60;

/// Clamp a prompt to the vendor's limit, cutting on a char boundary.
pub fn clamp_prompt(prompt: &str) -> &str {
    if prompt.chars().count() <= MAX_PROMPT_CHARS {
        return prompt;
    }
    tracing::warn!(
        len = prompt.chars().count(),
        "prompt exceeds {} characters, truncating",
        MAX_PROMPT_CHARS
    );
    match prompt.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((idx, _)) => &prompt[..idx],
        None => prompt,
    }
}

/// Body for a preview task.
pub fn preview_payload(req: &PreviewRequest) -> serde_json::Value {
    let mut payload = json!({
        "mode": "preview",
        "prompt": clamp_prompt(&req.prompt),
        "art_style": req.art_style,
        "ai_model": req.ai_model,
        "topology": req.topology,
        "target_polycount": req.target_polycount,
        "should_remesh": req.should_remesh,
        "symmetry_mode": "auto",
        "is_a_t_pose": false,
        "moderation": false,
    });
    if let Some(seed) = req.seed {
        payload["seed"] = json!(seed);
    }
    payload
}

/// Body for a refine task.
pub fn refine_payload(req: &RefineRequest) -> serde_json::Value {
    let mut payload = json!({
        "mode": "refine",
        "preview_task_id": req.preview_task_id,
        "enable_pbr": req.enable_pbr,
        "ai_model": req.ai_model,
        "moderation": false,
    });
    if let Some(prompt) = req.texture_prompt.as_deref() {
        if !prompt.trim().is_empty() {
            payload["texture_prompt"] = json!(clamp_prompt(prompt));
        }
    }
    if let Some(url) = &req.texture_image_url {
        payload["texture_image_url"] = json!(url);
    }
    payload
}

/// What a single poll observed.
#[derive(Debug)]
pub enum PollStep {
    Done(GenerationTask),
    Failed {
        status: TaskStatus,
        message: Option<String>,
    },
    Continue,
}

/// Classify one polled payload. Pulled out of the loop so the terminal-state
/// handling is testable without a live task.
pub fn poll_step(task: GenerationTask) -> PollStep {
    match task.status {
        TaskStatus::Succeeded => PollStep::Done(task),
        TaskStatus::Failed | TaskStatus::Canceled => PollStep::Failed {
            status: task.status,
            message: task.task_error.and_then(|e| e.message),
        },
        TaskStatus::Pending | TaskStatus::InProgress => PollStep::Continue,
    }
}

#[derive(Deserialize)]
struct TaskCreatedBody {
    result: String,
}

pub struct MeshyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MeshyClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url,
            api_key,
        }
    }

    pub fn from_config() -> Self {
        Self::new(
            config::get().meshy.base_url.clone(),
            config::env::meshy_api_key(),
        )
    }

    async fn create_task(&self, payload: &serde_json::Value) -> Result<String, VendorError> {
        let response = self
            .http
            .post(format!("{}/text-to-3d", self.base_url))
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(api_error(VENDOR, response).await);
        }

        let body: TaskCreatedBody = response
            .json()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))?;
        Ok(body.result)
    }

    /// Create a Text to 3D preview (geometry) task, returning the task id.
    pub async fn create_preview(&self, req: &PreviewRequest) -> Result<String, VendorError> {
        tracing::info!(
            prompt_len = req.prompt.chars().count(),
            art_style = %req.art_style,
            ai_model = %req.ai_model,
            "creating preview task"
        );
        self.create_task(&preview_payload(req)).await
    }

    /// Create a Text to 3D refine (texture) task, returning the task id.
    pub async fn create_refine(&self, req: &RefineRequest) -> Result<String, VendorError> {
        tracing::info!(
            preview_task_id = %req.preview_task_id,
            enable_pbr = req.enable_pbr,
            "creating refine task"
        );
        self.create_task(&refine_payload(req)).await
    }

    /// Retrieve a task by id.
    pub async fn get_task(&self, task_id: &str) -> Result<GenerationTask, VendorError> {
        let response = self
            .http
            .get(format!("{}/text-to-3d/{}", self.base_url, task_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(api_error(VENDOR, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))
    }

    /// List tasks on the vendor account, newest first. Page size caps at 50.
    pub async fn list_tasks(
        &self,
        page_num: u32,
        page_size: u32,
    ) -> Result<serde_json::Value, VendorError> {
        let response = self
            .http
            .get(format!("{}/text-to-3d", self.base_url))
            .bearer_auth(&self.api_key)
            .query(&[
                ("page_num", page_num.to_string()),
                ("page_size", page_size.min(50).to_string()),
                ("sort_by", "-created_at".to_string()),
            ])
            .send()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(api_error(VENDOR, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))
    }

    /// Poll a task every [`POLL_INTERVAL`] until it reaches a terminal
    /// status, up to [`POLL_MAX_ATTEMPTS`] polls. No backoff or cancellation.
    pub async fn poll_task(&self, task_id: &str) -> Result<GenerationTask, VendorError> {
        for attempt in 0..POLL_MAX_ATTEMPTS {
            let task = self.get_task(task_id).await?;
            match poll_step(task) {
                PollStep::Done(task) => return Ok(task),
                PollStep::Failed { status, message } => {
                    return Err(VendorError::TaskFailed {
                        task_id: task_id.to_string(),
                        status: status.as_str().to_string(),
                        message,
                    })
                }
                PollStep::Continue => {
                    tracing::debug!(task_id, attempt, "task not finished yet");
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }

        Err(VendorError::PollTimeout {
            task_id: task_id.to_string(),
            attempts: POLL_MAX_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::generation::TaskError;

    fn task(status: TaskStatus) -> GenerationTask {
        GenerationTask {
            id: "t-1".into(),
            status,
            progress: 0,
            model_urls: None,
            texture_urls: None,
            thumbnail_url: None,
            prompt: None,
            art_style: None,
            started_at: None,
            finished_at: None,
            task_error: None,
        }
    }

    #[test]
    fn clamp_keeps_short_prompts_untouched() {
        assert_eq!(clamp_prompt("a tiny dragon"), "a tiny dragon");
    }

    #[test]
    fn clamp_cuts_long_prompts_on_char_boundaries() {
        let long: String = "é".repeat(700);
        let clamped = clamp_prompt(&long);
        assert_eq!(clamped.chars().count(), MAX_PROMPT_CHARS);
        // Still valid UTF-8 at the cut point
        assert!(long.is_char_boundary(clamped.len()));
    }

    #[test]
    fn preview_payload_omits_absent_seed() {
        let req = PreviewRequest::new("a small dragon");
        let payload = preview_payload(&req);
        assert_eq!(payload["mode"], "preview");
        assert!(payload.get("seed").is_none());

        let mut with_seed = PreviewRequest::new("a small dragon");
        with_seed.seed = Some(42);
        assert_eq!(preview_payload(&with_seed)["seed"], 42);
    }

    #[test]
    fn refine_payload_skips_blank_texture_prompt() {
        let mut req = RefineRequest::new("preview-1");
        req.texture_prompt = Some("   ".into());
        let payload = refine_payload(&req);
        assert!(payload.get("texture_prompt").is_none());
        assert_eq!(payload["mode"], "refine");
        assert_eq!(payload["preview_task_id"], "preview-1");
    }

    #[test]
    fn poll_step_terminal_states() {
        assert!(matches!(
            poll_step(task(TaskStatus::Succeeded)),
            PollStep::Done(_)
        ));
        assert!(matches!(
            poll_step(task(TaskStatus::Pending)),
            PollStep::Continue
        ));
        assert!(matches!(
            poll_step(task(TaskStatus::InProgress)),
            PollStep::Continue
        ));

        let mut failed = task(TaskStatus::Failed);
        failed.task_error = Some(TaskError {
            message: Some("mesh rejected".into()),
        });
        match poll_step(failed) {
            PollStep::Failed { status, message } => {
                assert_eq!(status, TaskStatus::Failed);
                assert_eq!(message.as_deref(), Some("mesh rejected"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }

        assert!(matches!(
            poll_step(task(TaskStatus::Canceled)),
            PollStep::Failed { .. }
        ));
    }
}
