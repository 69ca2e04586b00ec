use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::domain::generation::pages::{
    generate::GeneratePage, home::HomePage, my_models::MyModelsPage, preview::PreviewPage,
    refine::RefinePage,
};
use crate::domain::payment::pages::{payment::PaymentPage, success::SuccessPage};
use crate::layout::NavBar;
use crate::system::pages::login::LoginPage;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <NavBar />
            <main class="page-content">
                <Routes fallback=|| view! { <p>"Page not found."</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/generate") view=GeneratePage />
                    <Route path=path!("/preview") view=PreviewPage />
                    <Route path=path!("/refine") view=RefinePage />
                    <Route path=path!("/payment") view=PaymentPage />
                    <Route path=path!("/success") view=SuccessPage />
                    <Route path=path!("/my-models") view=MyModelsPage />
                    <Route path=path!("/login") view=LoginPage />
                </Routes>
            </main>
        </Router>
    }
}
