//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Reference data (could swap a JSON file -> a bundled SRD or a remote API)
//! - Character record persistence (could swap JSON files -> a database)

mod error;
mod repos;

pub use error::RepoError;
pub use repos::{CharacterRecordRepo, ReferenceDataProvider};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCharacterRecordRepo, MockReferenceDataProvider};
