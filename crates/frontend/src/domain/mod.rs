pub mod chat;
pub mod generation;
pub mod payment;
pub mod printing;
