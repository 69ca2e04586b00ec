pub mod request_logger;
pub mod security_headers;
