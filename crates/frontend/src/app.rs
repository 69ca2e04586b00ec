use leptos::prelude::*;

use crate::domain::generation::context::ModelContext;
use crate::domain::chat::context::ConversationContext;
use crate::routes::AppRoutes;
use crate::shared::toast::{Toaster, ToastContext};
use crate::system::auth::context::AuthProvider;

#[component]
pub fn App() -> impl IntoView {
    // App-wide stores. Everything below the router reads these via context.
    provide_context(ToastContext::new());
    provide_context(ConversationContext::new());
    provide_context(ModelContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
            <Toaster />
        </AuthProvider>
    }
}
