use crate::domain::ports::PreferenceStore;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Preferences kept as one JSON object on disk.
///
/// A missing file reads as "nothing stored". Every `set` rewrites the file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_all().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(&entries)?;
        tokio::fs::write(&self.path, data).await?;
        tracing::debug!("Stored preference '{}' in {}", key, self.path.display());
        Ok(())
    }
}
