pub mod openai_provider;
pub mod types;
