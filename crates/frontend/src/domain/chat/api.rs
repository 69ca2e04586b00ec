use contracts::chat::{ChatReply, ChatRequest, ChatTurn};

use crate::shared::api_utils::post_json;

/// Send the running conversation to the backend chat proxy
pub async fn send_chat(messages: Vec<ChatTurn>) -> Result<ChatReply, String> {
    post_json("/api/chat", &ChatRequest { messages }).await
}
