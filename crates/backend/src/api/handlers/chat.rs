use axum::extract::Json;
use contracts::chat::{ChatReply, ChatRequest};

use crate::api::error::ApiError;
use crate::domain::chat::service;

/// Proxy one round of the idea-refinement conversation to the LLM
pub async fn chat(Json(request): Json<ChatRequest>) -> Result<Json<ChatReply>, ApiError> {
    if request.messages.is_empty() {
        return Err(ApiError::bad_request("messages must not be empty"));
    }

    let reply = service::chat(&request).await.map_err(|e| {
        tracing::error!("Chat proxy failed: {}", e);
        ApiError::bad_gateway(e.to_string())
    })?;

    Ok(Json(reply))
}
