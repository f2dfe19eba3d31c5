//! API handlers for Pitstock REST endpoints

pub mod equipment;
pub mod health;
pub mod openapi;
pub mod settings;
pub mod stats;
