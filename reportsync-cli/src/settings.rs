use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("configuration directory is unavailable")]
    NoConfigDir,
}

/// String key/value persistence scoped to an application + section pair,
/// one JSON file per section. A missing key reads as an empty string.
pub struct SettingsStore {
    file: PathBuf,
    values: BTreeMap<String, String>,
}

impl SettingsStore {
    pub fn open(application: &str, section: &str) -> Result<Self, SettingsError> {
        let dir = dirs::config_dir()
            .ok_or(SettingsError::NoConfigDir)?
            .join(application);
        Self::open_at(dir.join(format!("{section}.json")))
    }

    pub fn open_at(file: PathBuf) -> Result<Self, SettingsError> {
        let values = match std::fs::read_to_string(&file) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { file, values })
    }

    pub fn get(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SettingsError> {
        self.values.insert(key.into(), value.into());
        self.persist()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), SettingsError> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.file, content)?;
        Ok(())
    }
}
