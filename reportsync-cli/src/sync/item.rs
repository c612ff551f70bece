use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};

use reportsync_core::{CatalogClient, CatalogEntry, CatalogError, ResourceKind};
use thiserror::Error;

use super::files::file_kind;
use super::materialize::materialize;
use super::paths::{PathError, split_relative};

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("path error: {0}")]
    Path(#[from] PathError),
    #[error("definition for {path} is not valid text")]
    NotTextual { path: String },
}

/// One remote catalog node bound to a client, exposing the single-item
/// transfer operations.
pub struct CatalogItem {
    client: CatalogClient,
    entry: CatalogEntry,
}

impl CatalogItem {
    pub fn new(client: CatalogClient, entry: CatalogEntry) -> Self {
        Self { client, entry }
    }

    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    /// Downloads this item to `target`, creating missing parent directories.
    /// Returns `None` without touching the network if the item is not
    /// downloadable. Report-like kinds are written as their textual
    /// definition document; everything else as the fetched bytes verbatim.
    pub async fn download_to_file(&self, target: &Path) -> Result<Option<PathBuf>, ItemError> {
        let kind = self.entry.kind();
        if !kind.is_downloadable() {
            return Ok(None);
        }

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = self.client.get_item_content(&self.entry.path).await?;
        if kind.is_report_like() {
            let text = String::from_utf8(data).map_err(|_| ItemError::NotTextual {
                path: self.entry.path.clone(),
            })?;
            tokio::fs::write(target, text).await?;
        } else {
            tokio::fs::write(target, data).await?;
        }

        Ok(Some(target.to_path_buf()))
    }

    /// Downloads this item under `target_folder`, mirroring the remote path
    /// and appending the kind's extension. The extension is appended
    /// unconditionally, even when the remote name already carries one; this
    /// reproduces the server-side naming convention.
    pub async fn download_to_folder(
        &self,
        target_folder: &Path,
    ) -> Result<Option<PathBuf>, ItemError> {
        if !self.entry.is_downloadable() {
            return Ok(None);
        }
        let target = folder_target(target_folder, &self.entry.path, self.entry.kind());
        self.download_to_file(&target).await
    }

    /// Uploads `source` into this folder item, mirroring the directory chain
    /// of `source` under `relative_to` as remote folders. The remote item is
    /// named after the file without its extension and overwrites any existing
    /// item of the same name.
    pub async fn upload_file(
        &self,
        source: &Path,
        relative_to: &Path,
        kind_override: Option<ResourceKind>,
    ) -> Result<(), ItemError> {
        let data = tokio::fs::read(source).await?;
        let kind = kind_override.unwrap_or_else(|| file_kind(source));

        let folders = split_relative(source, relative_to, true)?;
        let parent = materialize(&self.client, &self.entry.path, &folders).await?;

        let name = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(source).first_raw();

        self.client
            .create_item(kind.display_name(), &name, &parent, true, data, mime_type)
            .await?;
        Ok(())
    }
}

fn folder_target(target_folder: &Path, remote_path: &str, kind: ResourceKind) -> PathBuf {
    let mut filename = target_folder
        .to_string_lossy()
        .trim_end_matches(MAIN_SEPARATOR)
        .to_string();
    filename.push_str(&remote_path.replace('/', MAIN_SEPARATOR_STR));
    filename.push_str(kind.extension());
    PathBuf::from(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_target_strips_trailing_separator_and_appends_extension() {
        let target = folder_target(
            &PathBuf::from(format!("{0}out{1}", MAIN_SEPARATOR, MAIN_SEPARATOR)),
            "/Sales/Q1",
            ResourceKind::Report,
        );
        let expected: PathBuf = [
            MAIN_SEPARATOR_STR,
            "out",
            "Sales",
            "Q1.rdl",
        ]
        .iter()
        .collect();
        assert_eq!(target, expected);
    }

    #[test]
    fn folder_target_appends_extension_even_when_already_present() {
        let target = folder_target(
            Path::new("/out"),
            "/Sales/Q1.rdl",
            ResourceKind::Report,
        );
        assert!(target.to_string_lossy().ends_with("Q1.rdl.rdl"));
    }

    #[test]
    fn folder_target_uses_the_kind_extension_for_resources() {
        let target = folder_target(Path::new("/out"), "/Sales/Logo", ResourceKind::Resource);
        assert!(target.to_string_lossy().ends_with("Logo.rdx"));
    }
}
