use std::path::{Path, PathBuf};
use std::time::SystemTime;

use reportsync_core::ResourceKind;
use walkdir::WalkDir;

use super::paths::{PathError, relative_path};

/// Classifies a local file by its extension. Files without an extension, or
/// with one outside the known set, are `Unknown`.
pub fn file_kind(path: &Path) -> ResourceKind {
    match path.extension() {
        Some(extension) => {
            ResourceKind::from_extension(&format!(".{}", extension.to_string_lossy()))
        }
        None => ResourceKind::Unknown,
    }
}

/// A local file together with the base directory it is considered relative
/// to. Transient: built per selection, never persisted.
#[derive(Debug, Clone)]
pub struct LocalFileRef {
    pub path: PathBuf,
    pub base: PathBuf,
}

impl LocalFileRef {
    pub fn new(path: impl Into<PathBuf>, base: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base: base.into(),
        }
    }

    pub fn relative_name(&self) -> Result<PathBuf, PathError> {
        relative_path(&self.path, &self.base)
    }

    pub fn kind(&self) -> ResourceKind {
        file_kind(&self.path)
    }

    pub fn modified(&self) -> Result<SystemTime, std::io::Error> {
        self.path.metadata()?.modified()
    }
}

/// Every regular file under `base`, anchored at `base`, in a stable
/// name-sorted order.
pub fn find_files_under(base: &Path) -> Result<Vec<LocalFileRef>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(base).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(LocalFileRef::new(entry.into_path(), base));
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_kind_reads_the_extension() {
        assert_eq!(file_kind(Path::new("/x/report.rdl")), ResourceKind::Report);
        assert_eq!(file_kind(Path::new("/x/SOURCE.RDS")), ResourceKind::DataSource);
        assert_eq!(file_kind(Path::new("/x/readme.txt")), ResourceKind::Unknown);
        assert_eq!(file_kind(Path::new("/x/no_extension")), ResourceKind::Unknown);
    }

    #[test]
    fn find_files_under_walks_nested_directories_in_order() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("b/inner.rdl"), b"x").unwrap();
        std::fs::write(dir.path().join("a.rds"), b"x").unwrap();

        let files = find_files_under(dir.path()).unwrap();
        let names: Vec<PathBuf> = files
            .iter()
            .map(|file| file.relative_name().unwrap())
            .collect();

        assert_eq!(names, vec![PathBuf::from("a.rds"), PathBuf::from("b/inner.rdl")]);
        assert_eq!(files[0].kind(), ResourceKind::DataSource);
        assert_eq!(files[1].base, dir.path());
    }
}
