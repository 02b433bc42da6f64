//! Error response body shared by all endpoints.

use serde::{Deserialize, Serialize};

/// JSON error payload.
///
/// Every non-2xx response carries this single-field body, so clients can
/// always read `detail` without branching on the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
