use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::system::handlers::auth as auth_handlers;
use crate::system::{auth, rate_limit, sessions};

/// All /api routes. Every request passes the per-IP rate limiter first,
/// then the session tracker.
pub fn configure_api_routes() -> Router {
    Router::new()
        // ========================================
        // TEXT TO 3D GENERATION
        // ========================================
        .route("/api/meshy/preview", post(handlers::generation::create_preview))
        .route("/api/meshy/refine", post(handlers::generation::create_refine))
        .route(
            "/api/meshy/task/:task_id",
            get(handlers::generation::get_task),
        )
        .route("/api/meshy/list", get(handlers::generation::list_tasks))
        .route("/api/meshy/proxy", get(handlers::generation::proxy_asset))
        // ========================================
        // CHAT PROXY
        // ========================================
        .route("/api/chat", post(handlers::chat::chat))
        // ========================================
        // PRINT COST AND ORDERS
        // ========================================
        .route("/api/slant3d/estimate", post(handlers::printing::estimate))
        .route("/api/slant3d/order", post(handlers::printing::create_order))
        // ========================================
        // PAYMENTS
        // ========================================
        .route(
            "/api/stripe/create-checkout-session",
            post(handlers::payment::create_checkout_session),
        )
        .route(
            "/api/stripe/create-payment-intent",
            post(handlers::payment::create_payment_intent),
        )
        // ========================================
        // ACCOUNTS AND CREDITS
        // ========================================
        .route("/api/auth/signup", post(auth_handlers::signup))
        .route("/api/auth/login", post(auth_handlers::login))
        .route(
            "/api/auth/me",
            get(auth_handlers::current_user)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
        .route(
            "/api/auth/credits/spend",
            post(auth_handlers::spend_credits)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
        .route(
            "/api/auth/credits/add",
            post(auth_handlers::add_credits)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
        .layer(middleware::from_fn(
            sessions::middleware::session_tracker,
        ))
        .layer(middleware::from_fn(rate_limit::rate_limit))
}
