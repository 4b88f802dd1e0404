//! Charforge Engine library.
//!
//! Guided character creation on top of `charforge-domain`.
//!
//! ## Structure
//!
//! - `use_cases/` - The guided creation rules and session
//! - `infrastructure/` - Ports, JSON adapters and configuration

pub mod infrastructure;
pub mod use_cases;

/// Shared reference data and selections for unit tests.
#[cfg(test)]
pub mod test_fixtures;
