pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod sessions;
pub mod tracing;
pub mod users;
