//! Guided creation errors.

use charforge_domain::ValidationReport;

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while finishing guided character creation.
///
/// Incomplete selections are not errors while the wizard runs; they only
/// become one when the player tries to create the character.
#[derive(Debug, thiserror::Error)]
pub enum GuidedCreationError {
    #[error("Character is incomplete: {}", .0.first_error().unwrap_or("validation failed"))]
    Incomplete(ValidationReport),

    #[error("Cannot build character: {0}")]
    MissingPrecondition(&'static str),

    #[error("Repository error: {0}")]
    Persistence(#[from] RepoError),
}
