use std::path::Path;

use regex::{NoExpand, RegexBuilder};
use reportsync_core::{CatalogClient, CatalogEntry};
use thiserror::Error;

use super::files::LocalFileRef;
use super::item::{CatalogItem, ItemError};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("item transfer failed: {0}")]
    Item(#[from] ItemError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("substitution pattern error: {0}")]
    Pattern(#[from] regex::Error),
    #[error("upload destination {0} is not a folder")]
    DestinationNotFolder(String),
}

/// Textual replacement applied to every downloaded file: a case-insensitive
/// literal search, replaced literally. Inert while `search` is empty.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    pub search: String,
    pub replace: String,
}

impl Substitution {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
    }

    fn apply(&self, content: &str) -> Result<String, regex::Error> {
        let pattern = RegexBuilder::new(&regex::escape(&self.search))
            .case_insensitive(true)
            .build()?;
        Ok(pattern
            .replace_all(content, NoExpand(&self.replace))
            .into_owned())
    }
}

/// Downloads `entries` under `target_folder` in order, one at a time. The
/// progress callback fires after every item, skipped ones included, so the
/// denominator stays stable. The first error aborts the remainder; files
/// already written stay on disk.
pub async fn download_batch<F>(
    client: &CatalogClient,
    entries: &[CatalogEntry],
    target_folder: &Path,
    substitution: Option<&Substitution>,
    mut progress: F,
) -> Result<(), BatchError>
where
    F: FnMut(usize, usize),
{
    let total = entries.len();
    for (index, entry) in entries.iter().enumerate() {
        let item = CatalogItem::new(client.clone(), entry.clone());
        let written = item.download_to_folder(target_folder).await?;

        if let (Some(path), Some(substitution)) =
            (written, substitution.filter(|s| s.is_active()))
        {
            let content = tokio::fs::read_to_string(&path).await?;
            let rewritten = substitution.apply(&content)?;
            tokio::fs::write(&path, rewritten).await?;
        }

        progress(index + 1, total);
    }
    Ok(())
}

/// Uploads `files` into the remote folder `destination` in order. The
/// destination must be a folder; that is checked before any remote call.
/// The first error aborts the remainder; items already uploaded stay on the
/// server.
pub async fn upload_batch<F>(
    client: &CatalogClient,
    destination: &CatalogEntry,
    files: &[LocalFileRef],
    mut progress: F,
) -> Result<(), BatchError>
where
    F: FnMut(usize, usize),
{
    if !destination.is_folder() {
        return Err(BatchError::DestinationNotFolder(destination.path.clone()));
    }

    let total = files.len();
    let item = CatalogItem::new(client.clone(), destination.clone());
    for (index, file) in files.iter().enumerate() {
        item.upload_file(&file.path, &file.base, None).await?;
        progress(index + 1, total);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_replaces_case_insensitively() {
        let substitution = Substitution {
            search: "oldserver".into(),
            replace: "newserver".into(),
        };
        let rewritten = substitution
            .apply("Data Source=OLDSERVER;Catalog=OldServer_DB")
            .unwrap();
        assert_eq!(rewritten, "Data Source=newserver;Catalog=newserver_DB");
    }

    #[test]
    fn substitution_search_is_literal_not_a_pattern() {
        let substitution = Substitution {
            search: "a.b".into(),
            replace: "c".into(),
        };
        assert_eq!(substitution.apply("a.b axb").unwrap(), "c axb");
    }

    #[test]
    fn substitution_replacement_is_literal() {
        let substitution = Substitution {
            search: "host".into(),
            replace: "$srv".into(),
        };
        assert_eq!(substitution.apply("db-host").unwrap(), "db-$srv");
    }

    #[test]
    fn empty_search_is_inactive() {
        assert!(!Substitution::default().is_active());
        assert!(
            Substitution {
                search: "x".into(),
                replace: String::new(),
            }
            .is_active()
        );
    }
}
