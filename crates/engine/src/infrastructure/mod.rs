//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod json_store;
pub mod ports;
pub mod reference_data;
