use contracts::generation::{TaskListPage, TaskStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::domain::generation::{api, context::use_model};
use crate::shared::toast::use_toasts;

/// Task history for this browser session.
#[component]
pub fn MyModelsPage() -> impl IntoView {
    let model = use_model();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (page, set_page) = create_signal(Option::<TaskListPage>::None);
    let (is_loading, set_is_loading) = create_signal(true);

    create_effect(move |_| {
        spawn_local(async move {
            match api::list_tasks(1, 50).await {
                Ok(response) => set_page.set(Some(response)),
                Err(e) => toasts.error(format!("Could not load your models: {}", e)),
            }
            set_is_loading.set(false);
        });
    });

    let open_task = move |task_id: String, model_url: Option<String>| {
        model.reset_for_new_prompt();
        model.preview_task_id.set(Some(task_id));
        model.model_url.set(model_url);
        navigate("/preview", Default::default());
    };
    let open_task = StoredValue::new(open_task);

    view! {
        <div class="my-models-page">
            <h2>"My models"</h2>

            <Show when=move || is_loading.get()>
                <p>"Loading..."</p>
            </Show>

            <Show when=move || !is_loading.get()>
                {move || {
                    let tasks = page.get().map(|p| p.tasks).unwrap_or_default();
                    if tasks.is_empty() {
                        view! {
                            <div class="empty-state">
                                <p>"Nothing here yet."</p>
                                <A href="/generate" attr:class="btn-primary">"Create your first model"</A>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <table class="models-table">
                                <thead>
                                    <tr>
                                        <th>"Prompt"</th>
                                        <th>"Kind"</th>
                                        <th>"Status"</th>
                                        <th>"Created"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {tasks
                                        .into_iter()
                                        .map(|task| {
                                            let status_class = match task.status {
                                                TaskStatus::Succeeded => "badge badge-success",
                                                TaskStatus::Failed | TaskStatus::Canceled => {
                                                    "badge badge-failed"
                                                }
                                                _ => "badge badge-pending",
                                            };
                                            let created = task
                                                .created_at
                                                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                                                .unwrap_or_default();
                                            let task_id = task.task_id.clone();
                                            let model_url = task.model_url.clone();
                                            let open = open_task;
                                            view! {
                                                <tr>
                                                    <td class="prompt-cell">
                                                        {task.prompt.clone().unwrap_or_default()}
                                                    </td>
                                                    <td>{task.kind.as_str()}</td>
                                                    <td>
                                                        <span class=status_class>
                                                            {task.status.as_str()}
                                                        </span>
                                                    </td>
                                                    <td>{created}</td>
                                                    <td>
                                                        <button
                                                            class="btn-link"
                                                            on:click=move |_| {
                                                                open.with_value(|open| open(
                                                                    task_id.clone(),
                                                                    model_url.clone(),
                                                                ))
                                                            }
                                                        >
                                                            "Open"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_any()
                    }
                }}
            </Show>
        </div>
    }
}
