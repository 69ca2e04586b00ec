use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"DreamForge"</h1>
            <p class="hero-subtitle">
                "Describe anything you can imagine and hold it in your hands. "
                "We turn your words into a 3D model and ship it to you as a real print."
            </p>
            <div class="hero-actions">
                <A href="/generate" attr:class="btn-primary btn-large">
                    "Start creating"
                </A>
                <A href="/my-models" attr:class="btn-secondary btn-large">
                    "My models"
                </A>
            </div>
            <div class="hero-steps">
                <div class="hero-step">
                    <h3>"1. Describe"</h3>
                    <p>"Chat with the assistant to shape your idea into a prompt."</p>
                </div>
                <div class="hero-step">
                    <h3>"2. Preview"</h3>
                    <p>"Watch the model appear and spin it around in your browser."</p>
                </div>
                <div class="hero-step">
                    <h3>"3. Print"</h3>
                    <p>"Get an instant price and order a physical print."</p>
                </div>
            </div>
        </div>
    }
}
