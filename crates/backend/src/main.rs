pub mod api;
pub mod domain;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::HeaderName;
    use axum::middleware;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    system::tracing::initialize()?;

    shared::config::init()?;
    let config = shared::config::get();

    let db_path = shared::config::get_database_path(config)?;
    shared::data::db::initialize_database(db_path.to_str()).await?;
    tracing::info!("Database ready at {}", db_path.display());

    // Issue the secret eagerly so the first login does not race to create it
    let _ = system::auth::jwt::get_jwt_secret().await?;

    // The session header must be exposed so the browser can read it back
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static("x-session-id")]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(api::routes::configure_api_routes())
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(
            system::middleware::security_headers::security_headers,
        ))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
