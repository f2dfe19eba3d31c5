//! Pitstock Casino Equipment Inventory
//!
//! A Rust server for tracking casino floor computing equipment: registering
//! items, listing them and moving each through a fixed lifecycle of custody
//! states. Records live either in a hosted database or, when none is
//! configured or reachable, in a local file-backed record store the
//! repository falls back to transparently.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
