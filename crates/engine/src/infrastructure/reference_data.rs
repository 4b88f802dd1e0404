//! JSON reference data provider.
//!
//! Reads every catalog from one JSON document shaped like
//! [`ReferenceCatalogs`]: `{"classes": [...], "races": [...], ...}`.
//! Missing catalogs load as empty.

use std::path::PathBuf;

use async_trait::async_trait;
use charforge_domain::ReferenceCatalogs;
use tokio::fs;

use crate::infrastructure::ports::{ReferenceDataProvider, RepoError};

/// Reference data stored in a single JSON file.
pub struct JsonReferenceData {
    path: PathBuf,
}

impl JsonReferenceData {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReferenceDataProvider for JsonReferenceData {
    async fn load(&self) -> Result<ReferenceCatalogs, RepoError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RepoError::not_found(
                    "Reference data",
                    self.path.display(),
                ));
            }
            Err(e) => return Err(RepoError::io("load_reference_data", e)),
        };

        let catalogs: ReferenceCatalogs =
            serde_json::from_str(&content).map_err(RepoError::serialization)?;

        tracing::debug!(
            path = %self.path.display(),
            classes = catalogs.classes.len(),
            races = catalogs.races.len(),
            backgrounds = catalogs.backgrounds.len(),
            spells = catalogs.spells.len(),
            "Loaded reference data"
        );

        Ok(catalogs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use charforge_domain::EntityRef;

    #[tokio::test]
    async fn loads_catalogs_from_a_json_document() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "classes": [{{"id": "wizard", "name": "Wizard", "hitDie": 6}}],
                "languages": [
                    {{"id": "common", "name": "Common"}},
                    {{"id": "elvish", "name": "Elvish"}}
                ]
            }}"#
        )
        .expect("write reference data");

        let catalogs = JsonReferenceData::new(file.path())
            .load()
            .await
            .expect("reference data should load");

        assert_eq!(
            catalogs.classes.name_of(&EntityRef::from("wizard")),
            Some("Wizard")
        );
        assert_eq!(catalogs.languages.len(), 2);
        assert!(catalogs.races.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = JsonReferenceData::new(dir.path().join("absent.json"))
            .load()
            .await
            .expect_err("missing file must fail");

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn malformed_json_is_a_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"classes": [{{"id": "wizard"}}]}}"#).expect("write reference data");

        let err = JsonReferenceData::new(file.path())
            .load()
            .await
            .expect_err("class without name and hit die must fail");

        assert!(matches!(err, RepoError::Serialization(_)));
    }
}
