//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O or lifecycle logic, just sides, feature metadata and settings.

pub mod config;
pub mod constants;
pub mod feature;
pub mod side;
