//! Lightweight toast notifications for surfacing API errors and progress.

use leptos::prelude::*;
use leptos::task::spawn_local;

const DISMISS_AFTER_MS: u32 = 5_000;

#[derive(Clone, Copy, PartialEq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });

        let toasts = self.toasts;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
            toasts.update(|list| list.retain(|t| t.id != id));
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

/// Hook to access the toast store
pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext not found in component tree")
}

/// Overlay that renders active toasts in the corner of the viewport
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_toasts();
    let toasts = ctx.toasts;

    view! {
        <div class="toaster">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Info => "toast toast-info",
                        ToastKind::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class on:click=move |_| ctx.dismiss(id)>
                            {toast.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
