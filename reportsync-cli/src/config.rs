use reportsync_core::Credentials;

use crate::settings::{SettingsError, SettingsStore};

pub const APPLICATION_NAME: &str = "reportsync";

const SECTION_CREDENTIALS: &str = "Credentials";
const SECTION_DOWNLOAD: &str = "Download";
const SECTION_UPLOAD: &str = "Upload";

/// Everything the tool needs for one run, resolved once and handed down.
/// Environment variables (`REPORTSYNC_*`) take precedence over values
/// remembered in the settings store; nothing below this layer reads either
/// ambiently.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server_url: String,
    pub login: String,
    pub password: String,
    pub domain: String,
    pub target_folder: String,
    pub folder_base: String,
    pub replace_source: String,
    pub replace_target: String,
}

impl Config {
    pub fn load() -> Result<Self, SettingsError> {
        let credentials = SettingsStore::open(APPLICATION_NAME, SECTION_CREDENTIALS)?;
        let download = SettingsStore::open(APPLICATION_NAME, SECTION_DOWNLOAD)?;
        let upload = SettingsStore::open(APPLICATION_NAME, SECTION_UPLOAD)?;
        Ok(Self::from_stores(&credentials, &download, &upload))
    }

    pub fn from_stores(
        credentials: &SettingsStore,
        download: &SettingsStore,
        upload: &SettingsStore,
    ) -> Self {
        Self {
            server_url: env_or("REPORTSYNC_SERVER_URL", || credentials.get("ServerUrl")),
            login: env_or("REPORTSYNC_LOGIN", || credentials.get("Login")),
            password: env_or("REPORTSYNC_PASSWORD", || credentials.get("Password")),
            domain: env_or("REPORTSYNC_DOMAIN", || credentials.get("Domain")),
            target_folder: env_or("REPORTSYNC_TARGET_FOLDER", || download.get("TargetFolder")),
            replace_source: env_or("REPORTSYNC_REPLACE_SOURCE", || download.get("ReplaceSource")),
            replace_target: env_or("REPORTSYNC_REPLACE_TARGET", || download.get("ReplaceTarget")),
            folder_base: env_or("REPORTSYNC_FOLDER_BASE", || upload.get("FolderBase")),
        }
    }

    /// Writes the current values back so the next run starts from them, as
    /// the original tool did after every successful dialog.
    pub fn save(&self) -> Result<(), SettingsError> {
        let mut credentials = SettingsStore::open(APPLICATION_NAME, SECTION_CREDENTIALS)?;
        credentials.set("ServerUrl", self.server_url.clone())?;
        credentials.set("Login", self.login.clone())?;
        credentials.set("Password", self.password.clone())?;
        credentials.set("Domain", self.domain.clone())?;

        let mut download = SettingsStore::open(APPLICATION_NAME, SECTION_DOWNLOAD)?;
        download.set("TargetFolder", self.target_folder.clone())?;
        download.set("ReplaceSource", self.replace_source.clone())?;
        download.set("ReplaceTarget", self.replace_target.clone())?;

        let mut upload = SettingsStore::open(APPLICATION_NAME, SECTION_UPLOAD)?;
        upload.set("FolderBase", self.folder_base.clone())?;
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.login.clone(), self.password.clone())
            .with_domain(self.domain.clone())
    }
}

fn env_or(name: &str, stored: impl FnOnce() -> String) -> String {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(stored)
}
