//! Shared types for the staff panel
//!
//! Wire models and the response envelope used by both the API client
//! and the view layer.

pub mod models;
pub mod response;

// Re-exports
pub use response::{ApiResponse, ResponseStatus};
pub use serde::{Deserialize, Serialize};
