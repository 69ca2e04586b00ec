//! Wire shape of API error responses.

use serde::{Deserialize, Serialize};

/// JSON body sent with every non-2xx API response. The frontend surfaces
/// `error` in a toast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
