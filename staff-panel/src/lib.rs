//! Staff Panel - order board, order queue and menu management
//!
//! View models over [`staff_client::StaffApi`]. Views own their state and
//! replace whole collections after every fetch.

pub mod config;
pub mod error;
pub mod logger;
pub mod poller;
pub mod routes;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use config::PanelConfig;
pub use error::{ViewError, ViewResult};
pub use poller::{PollHandle, spawn_periodic};
pub use routes::Route;
pub use views::{MenuManager, OrderBoard, OrderQueue};
