//! Text-to-3D generation task types.
//!
//! Mirrors the Meshy task payload closely enough that the backend can pass
//! vendor responses through to the frontend without re-shaping them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vendor-side task state.
///
/// Serialized using the vendor's SCREAMING_SNAKE spelling so payloads can be
/// round-tripped verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Succeeded,
    Failed,
    Canceled,
}

impl TaskStatus {
    /// A terminal status will never change on subsequent polls.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Succeeded | TaskStatus::Failed | TaskStatus::Canceled
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Succeeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Succeeded => "SUCCEEDED",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Canceled => "CANCELED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "PENDING" => Ok(TaskStatus::Pending),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "SUCCEEDED" => Ok(TaskStatus::Succeeded),
            "FAILED" => Ok(TaskStatus::Failed),
            "CANCELED" => Ok(TaskStatus::Canceled),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Download links for the generated mesh in the formats the vendor exports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelUrls {
    pub glb: Option<String>,
    pub fbx: Option<String>,
    pub obj: Option<String>,
    pub usdz: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureUrls {
    pub base_color: Option<String>,
    pub metallic: Option<String>,
    pub normal: Option<String>,
    pub roughness: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskError {
    pub message: Option<String>,
}

/// Full task payload as returned by the generation vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationTask {
    pub id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub model_urls: Option<ModelUrls>,
    #[serde(default)]
    pub texture_urls: Option<Vec<TextureUrls>>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub art_style: Option<String>,
    #[serde(default)]
    pub started_at: Option<i64>,
    #[serde(default)]
    pub finished_at: Option<i64>,
    #[serde(default)]
    pub task_error: Option<TaskError>,
}

impl GenerationTask {
    /// Preferred mesh URL for the in-browser viewer.
    pub fn glb_url(&self) -> Option<&str> {
        self.model_urls.as_ref()?.glb.as_deref()
    }

    pub fn base_color_url(&self) -> Option<&str> {
        self.texture_urls
            .as_ref()?
            .first()?
            .base_color
            .as_deref()
    }
}

fn default_art_style() -> String {
    "realistic".to_string()
}

fn default_ai_model() -> String {
    "meshy-5".to_string()
}

fn default_topology() -> String {
    "triangle".to_string()
}

fn default_polycount() -> u32 {
    30_000
}

fn default_true() -> bool {
    true
}

/// Request body for a preview (geometry) task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub prompt: String,
    #[serde(default = "default_art_style")]
    pub art_style: String,
    #[serde(default = "default_ai_model")]
    pub ai_model: String,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default = "default_topology")]
    pub topology: String,
    #[serde(default = "default_polycount")]
    pub target_polycount: u32,
    #[serde(default = "default_true")]
    pub should_remesh: bool,
}

impl PreviewRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            art_style: default_art_style(),
            ai_model: default_ai_model(),
            seed: None,
            topology: default_topology(),
            target_polycount: default_polycount(),
            should_remesh: true,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().chars().count() < 3 {
            return Err("Prompt must be at least 3 characters".into());
        }
        if self.prompt.chars().count() > 600 {
            return Err("Prompt must be at most 600 characters".into());
        }
        if !(100..=300_000).contains(&self.target_polycount) {
            return Err("target_polycount must be between 100 and 300000".into());
        }
        Ok(())
    }
}

/// Request body for a refine (texture) task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineRequest {
    pub preview_task_id: String,
    #[serde(default)]
    pub enable_pbr: bool,
    #[serde(default)]
    pub texture_prompt: Option<String>,
    #[serde(default)]
    pub texture_image_url: Option<String>,
    #[serde(default = "default_ai_model")]
    pub ai_model: String,
}

impl RefineRequest {
    pub fn new(preview_task_id: impl Into<String>) -> Self {
        Self {
            preview_task_id: preview_task_id.into(),
            enable_pbr: false,
            texture_prompt: None,
            texture_image_url: None,
            ai_model: default_ai_model(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.preview_task_id.trim().is_empty() {
            return Err("preview_task_id is required".into());
        }
        if let Some(p) = &self.texture_prompt {
            if p.chars().count() > 600 {
                return Err("texture_prompt must be at most 600 characters".into());
            }
        }
        Ok(())
    }
}

/// Response returned when a preview or refine task has been accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreated {
    pub success: bool,
    pub task_id: String,
    pub session_id: String,
    pub message: String,
}

/// A task row from the session's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub kind: TaskKind,
    pub prompt: Option<String>,
    pub status: TaskStatus,
    pub model_url: Option<String>,
    pub texture_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Preview,
    Refine,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Preview => "preview",
            TaskKind::Refine => "refine",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "preview" => Ok(TaskKind::Preview),
            "refine" => Ok(TaskKind::Refine),
            _ => Err(format!("Unknown task kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListPage {
    pub success: bool,
    pub tasks: Vec<TaskRecord>,
    pub page_num: u32,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_vendor_spelling() {
        let s: TaskStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(s, TaskStatus::InProgress);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"IN_PROGRESS\"");
        assert_eq!(TaskStatus::parse("CANCELED").unwrap(), TaskStatus::Canceled);
        assert!(TaskStatus::parse("DONE").is_err());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());
        assert!(TaskStatus::Succeeded.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(TaskStatus::Canceled.is_terminal());
        assert!(TaskStatus::Succeeded.is_success());
        assert!(!TaskStatus::Failed.is_success());
    }

    #[test]
    fn preview_request_fills_defaults() {
        let req: PreviewRequest = serde_json::from_str(r#"{"prompt":"a small dragon"}"#).unwrap();
        assert_eq!(req.art_style, "realistic");
        assert_eq!(req.ai_model, "meshy-5");
        assert_eq!(req.topology, "triangle");
        assert_eq!(req.target_polycount, 30_000);
        assert!(req.should_remesh);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn preview_request_rejects_short_prompt() {
        let req = PreviewRequest::new("ab");
        assert!(req.validate().is_err());
    }

    #[test]
    fn prompt_limits_count_characters_not_bytes() {
        // 350 two-byte characters: 700 bytes but well under the 600-char cap
        let req = PreviewRequest::new("é".repeat(350));
        assert!(req.validate().is_ok());
        assert!(PreviewRequest::new("é".repeat(601)).validate().is_err());

        // One three-byte character still fails the three-char minimum
        assert!(PreviewRequest::new("日").validate().is_err());

        let mut refine = RefineRequest::new("preview-1");
        refine.texture_prompt = Some("ü".repeat(600));
        assert!(refine.validate().is_ok());
        refine.texture_prompt = Some("ü".repeat(601));
        assert!(refine.validate().is_err());
    }

    #[test]
    fn preview_request_rejects_bad_polycount() {
        let mut req = PreviewRequest::new("a small dragon");
        req.target_polycount = 50;
        assert!(req.validate().is_err());
    }

    #[test]
    fn task_payload_deserializes_partial_vendor_response() {
        let json = r#"{
            "id": "018a210d-8ba4-705c-b111-1f1776f7f578",
            "status": "SUCCEEDED",
            "progress": 100,
            "model_urls": {"glb": "https://assets.meshy.ai/x/model.glb"},
            "texture_urls": [{"base_color": "https://assets.meshy.ai/x/tex.png"}]
        }"#;
        let task: GenerationTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.glb_url(), Some("https://assets.meshy.ai/x/model.glb"));
        assert_eq!(
            task.base_color_url(),
            Some("https://assets.meshy.ai/x/tex.png")
        );
    }
}
