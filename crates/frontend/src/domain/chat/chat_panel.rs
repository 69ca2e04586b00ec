use contracts::chat::{ChatRole, ChatTurn};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, context::use_conversation};
use crate::shared::toast::use_toasts;

/// Conversation window for refining a model idea with the assistant.
///
/// The latest assistant reply can be adopted as the generation prompt via
/// the `on_use_reply` callback.
#[component]
pub fn ChatPanel(on_use_reply: Callback<String>) -> impl IntoView {
    let conversation = use_conversation();
    let toasts = use_toasts();

    let (draft, set_draft) = create_signal(String::new());
    let (is_sending, set_is_sending) = create_signal(false);

    let send = move || {
        let text = draft.get().trim().to_string();
        if text.is_empty() || is_sending.get() {
            return;
        }

        conversation.push(ChatTurn::user(text));
        set_draft.set(String::new());
        set_is_sending.set(true);

        let history = conversation.turns.get_untracked();
        spawn_local(async move {
            match api::send_chat(history).await {
                Ok(reply) => {
                    conversation.push(ChatTurn::assistant(reply.message));
                    if let Some(tokens) = reply.tokens_used {
                        conversation.add_tokens(tokens);
                    }
                }
                Err(e) => toasts.error(format!("Assistant unavailable: {}", e)),
            }
            set_is_sending.set(false);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        send();
    };

    view! {
        <div class="chat-panel">
            <div class="chat-messages">
                <Show when=move || conversation.turns.get().is_empty()>
                    <p class="chat-hint">
                        "Not sure what to make? Describe a rough idea and the assistant will help you shape it."
                    </p>
                </Show>
                <For
                    each=move || conversation.turns.get().into_iter().enumerate()
                    key=|(i, _)| *i
                    children=move |(_, turn)| {
                        let class = match turn.role {
                            ChatRole::User => "chat-bubble chat-user",
                            _ => "chat-bubble chat-assistant",
                        };
                        let is_assistant = turn.role == ChatRole::Assistant;
                        let content = turn.content.clone();
                        let content_for_click = turn.content.clone();
                        view! {
                            <div class=class>
                                <span>{content}</span>
                                <Show when=move || is_assistant>
                                    <button
                                        class="btn-link"
                                        on:click={
                                            let content = content_for_click.clone();
                                            move |_| on_use_reply.run(content.clone())
                                        }
                                    >
                                        "Use as prompt"
                                    </button>
                                </Show>
                            </div>
                        }
                    }
                />
                <Show when=move || is_sending.get()>
                    <div class="chat-bubble chat-assistant chat-typing">"..."</div>
                </Show>
            </div>

            <form class="chat-input-row" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Tell me about your model idea..."
                    value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    disabled=move || is_sending.get()
                />
                <button type="submit" class="btn-primary" disabled=move || is_sending.get()>
                    "Send"
                </button>
            </form>

            <div class="chat-footer">
                {move || format!("Tokens used: {}", conversation.tokens_used.get())}
            </div>
        </div>
    }
}
