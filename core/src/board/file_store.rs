//! File-based board storage implementation
//!
//! Stores the whole board collection as one pretty-printed JSON document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::model::Board;
use super::repository::BoardRepository;
use crate::config::{CorruptPolicy, StoreConfig};
use crate::{Error, Result};

/// File-based board store using JSON
pub struct FileBoardStore {
    /// Path to the JSON file
    path: PathBuf,
    corrupt_policy: CorruptPolicy,
}

impl FileBoardStore {
    /// Create a new FileBoardStore
    ///
    /// Nothing is touched on disk until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            corrupt_policy: CorruptPolicy::default(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.file_path()).with_corrupt_policy(config.corrupt_policy)
    }

    pub fn with_corrupt_policy(mut self, policy: CorruptPolicy) -> Self {
        self.corrupt_policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("boards.json")
            .to_string()
    }

    /// Write an empty collection for a store that has never been saved
    async fn initialize(&self) -> Result<Vec<Board>> {
        info!("Initializing empty board store at {}", self.path.display());
        self.save(&[]).await?;
        Ok(Vec::new())
    }

    fn quarantine_path(&self, at: DateTime<Utc>) -> PathBuf {
        self.parent_dir().join(format!(
            "{}.corrupt-{}",
            self.file_name(),
            at.format("%Y%m%dT%H%M%S%.3fZ")
        ))
    }

    fn corrupt(&self, reason: String) -> Error {
        Error::CorruptStore {
            path: self.path.display().to_string(),
            reason,
        }
    }

    /// Handle a board file that exists but cannot be used
    async fn recover(&self, reason: String) -> Result<Vec<Board>> {
        self.recover_at(reason, Utc::now()).await
    }

    /// The unusable file is only replaced once it has been moved aside
    async fn recover_at(&self, reason: String, at: DateTime<Utc>) -> Result<Vec<Board>> {
        if self.corrupt_policy == CorruptPolicy::Fail {
            return Err(self.corrupt(reason));
        }

        let quarantine = self.quarantine_path(at);
        warn!(
            "Board store {} is unusable ({}); moving it to {} and starting empty",
            self.path.display(),
            reason,
            quarantine.display()
        );
        if let Err(err) = tokio::fs::rename(&self.path, &quarantine).await {
            error!("Failed to set aside corrupt board store: {}", err);
            return Err(self.corrupt(format!(
                "{}; could not move it to {}: {}",
                reason,
                quarantine.display(),
                err
            )));
        }
        self.initialize().await
    }
}

#[async_trait]
impl BoardRepository for FileBoardStore {
    async fn load(&self) -> Result<Vec<Board>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<Vec<Board>>(&content) {
                Ok(boards) => {
                    debug!("Loaded {} boards from {}", boards.len(), self.path.display());
                    Ok(boards)
                }
                Err(err) => self.recover(format!("Failed to parse boards file: {}", err)).await,
            },
            Err(err) if err.kind() == ErrorKind::NotFound => self.initialize().await,
            Err(err) => self.recover(format!("Failed to read boards file: {}", err)).await,
        }
    }

    async fn save(&self, boards: &[Board]) -> Result<()> {
        let content = serde_json::to_string_pretty(boards)
            .map_err(|e| Error::Storage(format!("Failed to serialize boards: {}", e)))?;

        let parent = self.parent_dir();
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Storage(format!("Failed to create directory: {}", e)))?;

        let temp_path = parent.join(format!(
            ".{}.{}.tmp",
            self.file_name(),
            Uuid::new_v4().simple()
        ));

        if let Err(err) = tokio::fs::write(&temp_path, content).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::Storage(format!(
                "Failed to write temp boards file: {}",
                err
            )));
        }

        if let Err(err) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::Storage(format!(
                "Failed to finalize boards file: {}",
                err
            )));
        }

        debug!("Saved {} boards to {}", boards.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ColumnKey, Task};
    use tempfile::{tempdir, TempDir};

    fn create_test_store() -> (FileBoardStore, TempDir) {
        let temp_dir = tempdir().unwrap();
        let store = FileBoardStore::new(temp_dir.path().join("boards.json"));
        (store, temp_dir)
    }

    fn sample_boards() -> Vec<Board> {
        let mut personal = Board::new("Personal");
        personal.columns.today.push(Task::new("Buy milk"));
        personal.columns.today.push(Task::new("Call mom"));
        let mut done = Task::new("Book flights");
        done.completed = true;
        personal.columns.completed.push(done);

        let mut work = Board::new("Work");
        work.columns
            .get_mut(ColumnKey::ThisWeek)
            .push(Task::new("Quarterly report"));

        vec![personal, work, Board::new("Empty")]
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_load_missing_file_initializes_empty() {
        let (store, _temp) = create_test_store();

        let boards = store.load().await.unwrap();
        assert!(boards.is_empty());

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(content, "[]");
    }

    #[tokio::test]
    async fn test_load_creates_missing_parent_directory() {
        let temp_dir = tempdir().unwrap();
        let store = FileBoardStore::new(temp_dir.path().join("nested").join("boards.json"));

        assert!(store.load().await.unwrap().is_empty());
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order_and_content() {
        let (store, _temp) = create_test_store();
        let boards = sample_boards();

        store.save(&boards).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, boards);
        let names: Vec<_> = loaded.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Personal", "Work", "Empty"]);
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let (store, temp) = create_test_store();
        let boards = sample_boards();
        store.save(&boards).await.unwrap();

        let reopened = FileBoardStore::new(temp.path().join("boards.json"));
        assert_eq!(reopened.load().await.unwrap(), boards);
    }

    #[tokio::test]
    async fn test_save_is_pretty_printed_with_two_spaces() {
        let (store, _temp) = create_test_store();
        store.save(&[Board::new("Personal")]).await.unwrap();

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(content.starts_with("[\n  {\n    \"id\""));
        assert!(content.contains("\"thisWeek\": []"));
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_files() {
        let (store, temp) = create_test_store();
        store.save(&sample_boards()).await.unwrap();
        store.save(&[]).await.unwrap();

        assert_eq!(entries(temp.path()), vec!["boards.json".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_set_aside_and_reinitialized() {
        let (store, temp) = create_test_store();
        tokio::fs::write(store.path(), "{ not json").await.unwrap();

        let boards = store.load().await.unwrap();
        assert!(boards.is_empty());

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(content, "[]");

        let names = entries(temp.path());
        assert_eq!(names.len(), 2);
        let quarantined = names
            .iter()
            .find(|name| name.starts_with("boards.json.corrupt-"))
            .expect("corrupt file should be kept");
        let kept = tokio::fs::read_to_string(temp.path().join(quarantined))
            .await
            .unwrap();
        assert_eq!(kept, "{ not json");
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_under_strict_policy() {
        let (store, _temp) = create_test_store();
        let store = store.with_corrupt_policy(CorruptPolicy::Fail);
        tokio::fs::write(store.path(), "[{\"id\": 1}]").await.unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(Error::CorruptStore { .. })));

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(content, "[{\"id\": 1}]");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_kept_when_it_cannot_be_set_aside() {
        let (store, _temp) = create_test_store();
        tokio::fs::write(store.path(), "{ not json").await.unwrap();

        let at = Utc::now();
        let blocked = store.quarantine_path(at);
        tokio::fs::create_dir_all(blocked.join("occupied")).await.unwrap();

        let result = store
            .recover_at("Failed to parse boards file".to_string(), at)
            .await;
        assert!(matches!(result, Err(Error::CorruptStore { .. })));

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(content, "{ not json");
    }

    #[tokio::test]
    async fn test_invalid_utf8_file_is_set_aside_and_reinitialized() {
        let (store, temp) = create_test_store();
        tokio::fs::write(store.path(), b"\xff\xfe\x00").await.unwrap();

        assert!(store.load().await.unwrap().is_empty());

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(content, "[]");
        let quarantined = entries(temp.path())
            .into_iter()
            .find(|name| name.starts_with("boards.json.corrupt-"))
            .expect("unreadable file should be kept");
        let kept = tokio::fs::read(temp.path().join(quarantined)).await.unwrap();
        assert_eq!(kept, vec![0xff, 0xfe, 0x00]);
    }

    #[tokio::test]
    async fn test_directory_at_store_path_is_set_aside_and_reinitialized() {
        let (store, temp) = create_test_store();
        tokio::fs::create_dir_all(store.path().join("inner")).await.unwrap();

        assert!(store.load().await.unwrap().is_empty());

        assert!(store.path().is_file());
        let quarantined = entries(temp.path())
            .into_iter()
            .find(|name| name.starts_with("boards.json.corrupt-"))
            .expect("directory should be moved aside");
        assert!(temp.path().join(quarantined).join("inner").is_dir());
    }

    #[tokio::test]
    async fn test_unreadable_file_fails_under_strict_policy() {
        let (store, _temp) = create_test_store();
        let store = store.with_corrupt_policy(CorruptPolicy::Fail);
        tokio::fs::write(store.path(), b"\xff\xfe\x00").await.unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(Error::CorruptStore { .. })));

        let content = tokio::fs::read(store.path()).await.unwrap();
        assert_eq!(content, vec![0xff, 0xfe, 0x00]);
    }

    #[tokio::test]
    async fn test_directory_at_store_path_fails_under_strict_policy() {
        let (store, temp) = create_test_store();
        let store = store.with_corrupt_policy(CorruptPolicy::Fail);
        tokio::fs::create_dir_all(store.path()).await.unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(Error::CorruptStore { .. })));
        assert!(store.path().is_dir());
        assert_eq!(entries(temp.path()), vec!["boards.json".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_file_still_initializes_under_strict_policy() {
        let (store, _temp) = create_test_store();
        let store = store.with_corrupt_policy(CorruptPolicy::Fail);

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_fails_when_parent_is_not_a_directory() {
        let temp_dir = tempdir().unwrap();
        tokio::fs::write(temp_dir.path().join("state"), "not a directory")
            .await
            .unwrap();
        let store = FileBoardStore::new(temp_dir.path().join("state").join("boards.json"));

        let result = store.save(&sample_boards()).await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn test_from_config() {
        let temp_dir = tempdir().unwrap();
        let config = StoreConfig::default()
            .with_data_dir(temp_dir.path())
            .with_corrupt_policy(CorruptPolicy::Fail);

        let store = FileBoardStore::from_config(&config);
        assert_eq!(store.path(), temp_dir.path().join("boards.json"));
        assert_eq!(store.corrupt_policy, CorruptPolicy::Fail);
    }
}
