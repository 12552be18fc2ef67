// Rust guideline compliant 2026-10-16

//! Command implementations for `rkit`.

pub mod config;
pub mod render;
