//! Data models
//!
//! Wire types exchanged with the ordering backend.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY / MySQL INT AUTO_INCREMENT).

pub mod category;
pub mod category_ref;
pub mod order;
pub mod price;
pub mod product;

// Re-exports
pub use category::*;
pub use category_ref::*;
pub use order::*;
pub use price::*;
pub use product::*;
