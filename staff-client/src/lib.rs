//! Staff Client - HTTP client for the ordering backend
//!
//! Provides typed access to the order, category and product REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{StaffApi, StaffClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};

// Re-export shared types for convenience
pub use shared::models::{
    Category, CategoryPayload, CategoryRef, Order, OrderStatus, PriceValue, Product,
    ProductPayload,
};
pub use shared::response::HealthStatus;
