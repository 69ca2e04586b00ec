use contracts::chat::ChatTurn;
use leptos::prelude::*;

/// Conversation history with the idea-refinement assistant, kept for the
/// lifetime of the tab so it survives page navigation.
#[derive(Clone, Copy)]
pub struct ConversationContext {
    pub turns: RwSignal<Vec<ChatTurn>>,
    /// Cumulative LLM tokens spent in this conversation
    pub tokens_used: RwSignal<i32>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self {
            turns: RwSignal::new(Vec::new()),
            tokens_used: RwSignal::new(0),
        }
    }

    pub fn push(&self, turn: ChatTurn) {
        self.turns.update(|turns| turns.push(turn));
    }

    pub fn add_tokens(&self, tokens: i32) {
        self.tokens_used.update(|total| *total += tokens);
    }

    pub fn clear(&self) {
        self.turns.set(Vec::new());
        self.tokens_used.set(0);
    }
}

/// Hook to access the conversation store
pub fn use_conversation() -> ConversationContext {
    use_context::<ConversationContext>()
        .expect("ConversationContext not found in component tree")
}
