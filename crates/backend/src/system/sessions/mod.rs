pub mod middleware;
pub mod repository;
