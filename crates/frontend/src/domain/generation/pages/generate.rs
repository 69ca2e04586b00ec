use contracts::generation::PreviewRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::domain::chat::chat_panel::ChatPanel;
use crate::domain::generation::{api, context::use_model};
use crate::shared::toast::use_toasts;

const ART_STYLES: &[(&str, &str)] = &[
    ("realistic", "Realistic"),
    ("sculpture", "Sculpture"),
];

/// Prompt entry page: chat with the assistant on the left, generation form
/// on the right.
#[component]
pub fn GeneratePage() -> impl IntoView {
    let model = use_model();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (is_submitting, set_is_submitting) = create_signal(false);

    let start_generation = move || {
        let prompt = model.prompt.get_untracked();
        let trimmed = prompt.trim();
        if trimmed.chars().count() < 3 {
            toasts.error("Please describe your model in at least 3 characters");
            return;
        }
        if trimmed.chars().count() > 600 {
            toasts.error("Prompt is too long (600 characters max)");
            return;
        }
        if is_submitting.get_untracked() {
            return;
        }

        set_is_submitting.set(true);
        model.reset_for_new_prompt();

        let mut request = PreviewRequest::new(trimmed);
        request.art_style = model.art_style.get_untracked();

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_preview(&request).await {
                Ok(created) => {
                    model.preview_task_id.set(Some(created.task_id));
                    toasts.info(created.message);
                    navigate("/preview", Default::default());
                }
                Err(e) => {
                    toasts.error(format!("Could not start generation: {}", e));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        start_generation();
    };

    let on_use_reply = Callback::new(move |reply: String| {
        model.prompt.set(reply);
    });

    view! {
        <div class="generate-page">
            <div class="generate-chat">
                <h2>"Refine your idea"</h2>
                <ChatPanel on_use_reply=on_use_reply />
            </div>

            <div class="generate-form">
                <h2>"Generate a model"</h2>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="prompt">"Describe your model"</label>
                        <textarea
                            id="prompt"
                            rows="5"
                            maxlength="600"
                            placeholder="A small dragon curled around a crystal..."
                            prop:value=move || model.prompt.get()
                            on:input=move |ev| model.prompt.set(event_target_value(&ev))
                            disabled=move || is_submitting.get()
                        ></textarea>
                        <span class="char-counter">
                            {move || format!("{}/600", model.prompt.get().chars().count())}
                        </span>
                    </div>

                    <div class="form-group">
                        <label for="art-style">"Art style"</label>
                        <select
                            id="art-style"
                            on:change=move |ev| model.art_style.set(event_target_value(&ev))
                            disabled=move || is_submitting.get()
                        >
                            {ART_STYLES
                                .iter()
                                .map(|(value, label)| {
                                    let attr_value = value.to_string();
                                    let cmp_value = value.to_string();
                                    let selected = move || model.art_style.get() == cmp_value;
                                    view! {
                                        <option value=attr_value selected=selected>
                                            {label.to_string()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() { "Starting..." } else { "Generate 3D model" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
