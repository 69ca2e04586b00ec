pub mod meshy;
pub mod slant3d;
pub mod stripe;

use thiserror::Error;

/// Errors from outbound vendor calls.
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("{vendor} returned HTTP {status}: {body}")]
    Api {
        vendor: &'static str,
        status: u16,
        body: String,
    },

    #[error("{vendor} request failed: {source}")]
    Network {
        vendor: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("task {task_id} ended with status {status}: {}", message.as_deref().unwrap_or("no detail"))]
    TaskFailed {
        task_id: String,
        status: String,
        message: Option<String>,
    },

    #[error("task {task_id} did not finish within {attempts} polls")]
    PollTimeout { task_id: String, attempts: u32 },
}

impl VendorError {
    pub fn network(vendor: &'static str, source: reqwest::Error) -> Self {
        VendorError::Network { vendor, source }
    }
}

/// Read a non-2xx response into an `Api` error, keeping the body so the
/// caller can surface the vendor's own message.
pub(crate) async fn api_error(vendor: &'static str, response: reqwest::Response) -> VendorError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    VendorError::Api {
        vendor,
        status,
        body,
    }
}
