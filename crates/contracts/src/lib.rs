//! Shared DTOs for the DreamForge frontend and backend.

pub mod auth;
pub mod chat;
pub mod error;
pub mod generation;
pub mod payment;
pub mod printing;
