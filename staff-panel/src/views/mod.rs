//! View models: state plus the operations each screen performs

pub mod dashboard;
pub mod menu;
pub mod orders;

pub use dashboard::{BoardState, BoardStats, LoadPhase, OrderBoard, RefreshOutcome, Revenue};
pub use menu::{CategoryDraft, CategoryFilter, Confirm, MenuManager, ProductDraft};
pub use orders::{OrderQueue, next_status, status_label};
