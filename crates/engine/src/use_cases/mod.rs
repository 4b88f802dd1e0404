//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod guided_creation;

pub use guided_creation::{GuidedCreation, GuidedCreationError, GuidedIntent};
