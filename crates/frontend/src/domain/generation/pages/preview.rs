use contracts::generation::TaskStatus;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::domain::generation::{api, context::use_model};
use crate::domain::printing::api as printing_api;
use crate::shared::toast::use_toasts;

/// Matches the backend poll cadence: 60 polls 15 seconds apart.
const POLL_INTERVAL_MS: u32 = 15_000;
const POLL_MAX_ATTEMPTS: u32 = 60;

/// Poll the active task until it finishes, then show the model in the
/// in-browser viewer.
#[component]
pub fn PreviewPage() -> impl IntoView {
    let model = use_model();
    let toasts = use_toasts();

    let (progress, set_progress) = create_signal(0i32);
    let (status_text, set_status_text) = create_signal("Starting...".to_string());
    let (is_done, set_is_done) = create_signal(false);
    let (is_failed, set_is_failed) = create_signal(false);
    let (estimating, set_estimating) = create_signal(false);

    // Refine takes precedence so this page serves both waits
    let refining = model.refine_task_id.get_untracked().is_some();
    let active_task = model
        .refine_task_id
        .get_untracked()
        .or_else(|| model.preview_task_id.get_untracked());

    create_effect(move |_| {
        let task_id = match active_task.clone() {
            Some(id) => id,
            None => {
                set_status_text.set("No generation in progress.".to_string());
                set_is_failed.set(true);
                return;
            }
        };

        spawn_local(async move {
            for _attempt in 0..POLL_MAX_ATTEMPTS {
                match api::get_task(&task_id).await {
                    Ok(task) => {
                        set_progress.set(task.progress);
                        match task.status {
                            TaskStatus::Succeeded => {
                                let glb = task.glb_url().map(str::to_string);
                                if refining {
                                    model.refined_model_url.set(glb);
                                } else {
                                    model.model_url.set(glb);
                                }
                                set_status_text.set("Your model is ready!".to_string());
                                set_is_done.set(true);
                                return;
                            }
                            TaskStatus::Failed | TaskStatus::Canceled => {
                                let message = task
                                    .task_error
                                    .and_then(|e| e.message)
                                    .unwrap_or_else(|| "Generation failed".to_string());
                                set_status_text.set(message.clone());
                                set_is_failed.set(true);
                                toasts.error(message);
                                return;
                            }
                            TaskStatus::Pending => {
                                set_status_text.set("Waiting in queue...".to_string())
                            }
                            TaskStatus::InProgress => set_status_text
                                .set(format!("Generating... {}%", task.progress)),
                        }
                    }
                    Err(e) => {
                        // Transient poll errors are survivable, keep going
                        log::warn!("Poll failed: {}", e);
                    }
                }
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
            }

            set_status_text.set("Generation timed out. Check My models later.".to_string());
            set_is_failed.set(true);
        });
    });

    let get_estimate = move |_| {
        let file_url = match model.display_url() {
            Some(url) => url,
            None => return,
        };
        set_estimating.set(true);
        spawn_local(async move {
            match printing_api::estimate(file_url).await {
                Ok(response) => model.cost_estimate.set(Some(response.estimate)),
                Err(e) => toasts.error(format!("Could not estimate print cost: {}", e)),
            }
            set_estimating.set(false);
        });
    };

    let viewer = move || {
        model.display_url().map(|url| {
            let proxied = api::proxied_asset_url(&url);
            // model-viewer is a web component loaded in index.html
            let html = format!(
                "<model-viewer src=\"{}\" camera-controls auto-rotate shadow-intensity=\"1\" style=\"width:100%;height:420px;\"></model-viewer>",
                proxied
            );
            view! { <div class="model-viewer-wrap" inner_html=html></div> }
        })
    };

    view! {
        <div class="preview-page">
            <h2>{move || if refining { "Refining texture" } else { "Generating preview" }}</h2>

            <Show when=move || !is_done.get() && !is_failed.get()>
                <div class="progress-block">
                    <div class="progress-bar">
                        <div
                            class="progress-fill"
                            style=move || format!("width: {}%", progress.get().clamp(0, 100))
                        ></div>
                    </div>
                    <p class="status-text">{move || status_text.get()}</p>
                    <p class="status-hint">"This usually takes a few minutes. Feel free to keep chatting meanwhile."</p>
                </div>
            </Show>

            <Show when=move || is_failed.get()>
                <div class="error-message">{move || status_text.get()}</div>
                <A href="/generate" attr:class="btn-secondary">"Back to generator"</A>
            </Show>

            <Show when=move || is_done.get()>
                <div class="preview-result">
                    {viewer}

                    <div class="preview-actions">
                        <A href="/refine" attr:class="btn-secondary">"Refine texture"</A>
                        <button
                            class="btn-secondary"
                            on:click=get_estimate
                            disabled=move || estimating.get()
                        >
                            {move || if estimating.get() { "Estimating..." } else { "Get print price" }}
                        </button>
                        <Show when=move || model.cost_estimate.get().is_some()>
                            <A href="/payment" attr:class="btn-primary">"Order print"</A>
                        </Show>
                    </div>

                    <Show when=move || model.cost_estimate.get().is_some()>
                        <p class="estimate-line">
                            {move || {
                                match model.cost_estimate.get().and_then(|e| e.total_price) {
                                    Some(price) => format!("Estimated print cost: ${:.2}", price),
                                    None => "Estimate received, but no price was quoted.".to_string(),
                                }
                            }}
                        </p>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
