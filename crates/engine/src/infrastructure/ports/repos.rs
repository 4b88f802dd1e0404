//! Port traits for everything outside the rules engine.

use async_trait::async_trait;
use charforge_domain::{CharacterId, CharacterRecord, ReferenceCatalogs};

use super::error::RepoError;

// =============================================================================
// Reference Data
// =============================================================================

/// Supplies the immutable reference catalogs. The engine never writes back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    async fn load(&self) -> Result<ReferenceCatalogs, RepoError>;
}

// =============================================================================
// Character Records
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRecordRepo: Send + Sync {
    async fn save(&self, record: &CharacterRecord) -> Result<(), RepoError>;
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError>;
}
