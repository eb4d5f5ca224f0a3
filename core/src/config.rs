//! Storage configuration
//!
//! The board file location is the only thing that can be configured, either
//! programmatically or through `TASKBOARD_DATA_DIR`.

use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_FILE_NAME: &str = "boards.json";

/// What `load` does when the board file exists but cannot be read or parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptPolicy {
    /// Move the bad file aside and start over with an empty collection
    #[default]
    Reinitialize,
    /// Surface `Error::CorruptStore` and leave the file untouched
    Fail,
}

/// Location and load policy of the board file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    pub corrupt_policy: CorruptPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
            corrupt_policy: CorruptPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Build a config from `TASKBOARD_DATA_DIR` and `TASKBOARD_STRICT_LOAD`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("TASKBOARD_DATA_DIR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            config.data_dir = PathBuf::from(dir);
        }

        let strict = lookup("TASKBOARD_STRICT_LOAD")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);
        if strict {
            config.corrupt_policy = CorruptPolicy::Fail;
        }

        config
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_corrupt_policy(mut self, policy: CorruptPolicy) -> Self {
        self.corrupt_policy = policy;
        self
    }

    /// Full path of the board file
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}
