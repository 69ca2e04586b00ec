use contracts::generation::RefineRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::domain::generation::{api, context::use_model};
use crate::shared::toast::use_toasts;

/// Texture refinement form for a finished preview.
#[component]
pub fn RefinePage() -> impl IntoView {
    let model = use_model();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (texture_prompt, set_texture_prompt) = create_signal(String::new());
    let (enable_pbr, set_enable_pbr) = create_signal(false);
    let (is_submitting, set_is_submitting) = create_signal(false);

    let has_preview = move || model.preview_task_id.get().is_some();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let preview_task_id = match model.preview_task_id.get_untracked() {
            Some(id) => id,
            None => {
                toasts.error("Generate a preview model first");
                return;
            }
        };

        let prompt = texture_prompt.get_untracked();
        if prompt.chars().count() > 600 {
            toasts.error("Texture prompt is too long (600 characters max)");
            return;
        }

        set_is_submitting.set(true);

        let mut request = RefineRequest::new(preview_task_id);
        request.enable_pbr = enable_pbr.get_untracked();
        if !prompt.trim().is_empty() {
            request.texture_prompt = Some(prompt);
        }

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_refine(&request).await {
                Ok(created) => {
                    model.refine_task_id.set(Some(created.task_id));
                    toasts.info(created.message);
                    navigate("/preview", Default::default());
                }
                Err(e) => toasts.error(format!("Could not start refinement: {}", e)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="refine-page">
            <h2>"Refine texture"</h2>

            <Show
                when=has_preview
                fallback=|| view! {
                    <div class="error-message">
                        "No preview model yet. "
                        <A href="/generate">"Generate one first."</A>
                    </div>
                }
            >
                <form on:submit=on_submit.clone()>
                    <div class="form-group">
                        <label for="texture-prompt">"Texture description (optional)"</label>
                        <textarea
                            id="texture-prompt"
                            rows="4"
                            maxlength="600"
                            placeholder="Weathered bronze with green patina..."
                            prop:value=move || texture_prompt.get()
                            on:input=move |ev| set_texture_prompt.set(event_target_value(&ev))
                            disabled=move || is_submitting.get()
                        ></textarea>
                        <span class="char-counter">
                            {move || format!("{}/600", texture_prompt.get().chars().count())}
                        </span>
                    </div>

                    <div class="form-group form-checkbox">
                        <label>
                            <input
                                type="checkbox"
                                prop:checked=move || enable_pbr.get()
                                on:change=move |ev| set_enable_pbr.set(event_target_checked(&ev))
                                disabled=move || is_submitting.get()
                            />
                            "Generate PBR maps (metallic, roughness, normal)"
                        </label>
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() { "Starting..." } else { "Refine model" }}
                    </button>
                </form>
            </Show>
        </div>
    }
}
