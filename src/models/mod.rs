//! Domain models

pub mod enums;
pub mod equipment;

pub use enums::EquipmentStatus;
pub use equipment::{Equipment, EquipmentPatch, NewEquipment, StatusChange};
