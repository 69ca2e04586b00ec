pub mod api;
pub mod chat_panel;
pub mod context;
