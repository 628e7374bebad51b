//! API Response types
//!
//! Envelope used by every backend route:
//! ```json
//! {
//!     "status": "success",
//!     "data": [ ... ],
//!     "count": 3
//! }
//! ```
//! Errors carry `"status": "error"` and a human-readable `message`.

use serde::{Deserialize, Serialize};

/// Envelope status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Unified API response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of items in `data` (list routes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            count: None,
            message: None,
        }
    }

    /// Create a successful list response with `count`
    pub fn list(items: Vec<T>) -> ApiResponse<Vec<T>> {
        ApiResponse {
            status: ResponseStatus::Success,
            count: Some(items.len()),
            data: Some(items),
            message: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            count: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

/// Response of a mutating route (`PUT` / `DELETE`), which carries no `data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreated {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: Option<String>,
    pub category_id: i64,
}

/// Response of `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreated {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: Option<String>,
    pub product_id: i64,
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
