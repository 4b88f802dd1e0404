//! JSON file store for finished character records.
//!
//! Each record lands in `<dir>/<character id>.json`.

use std::path::PathBuf;

use async_trait::async_trait;
use charforge_domain::{CharacterId, CharacterRecord};
use tokio::fs;

use crate::infrastructure::ports::{CharacterRecordRepo, RepoError};

pub struct JsonFileRecordStore {
    dir: PathBuf,
}

impl JsonFileRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, id: CharacterId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl CharacterRecordRepo for JsonFileRecordStore {
    async fn save(&self, record: &CharacterRecord) -> Result<(), RepoError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| RepoError::io("create_records_dir", e))?;

        let json = serde_json::to_vec_pretty(record).map_err(RepoError::serialization)?;
        let path = self.record_path(record.id);
        fs::write(&path, json)
            .await
            .map_err(|e| RepoError::io("save_character_record", e))?;

        tracing::debug!(
            character_id = %record.id,
            path = %path.display(),
            "Wrote character record"
        );
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        let content = match fs::read(self.record_path(id)).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::io("get_character_record", e)),
        };
        let record = serde_json::from_slice(&content).map_err(RepoError::serialization)?;
        Ok(Some(record))
    }
}
