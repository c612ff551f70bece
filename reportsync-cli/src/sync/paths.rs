use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{file} is not under {base}")]
    NotUnderBase { file: PathBuf, base: PathBuf },
}

/// Path of `file` relative to the directory `base`, in platform-separator
/// form. Both sides are resolved to absolute form first; "." handling is the
/// platform's. `file == base` yields the empty path.
pub fn relative_path(file: &Path, base: &Path) -> Result<PathBuf, PathError> {
    let file = std::path::absolute(file)?;
    let base = std::path::absolute(base)?;
    match file.strip_prefix(&base) {
        Ok(relative) => Ok(relative.to_path_buf()),
        Err(_) => Err(PathError::NotUnderBase { file, base }),
    }
}

/// Segments of the relative path of `file` under `base`, in order. With
/// `drop_leaf` the final segment (the file name) is excluded, leaving only
/// the folder chain.
pub fn split_relative(
    file: &Path,
    base: &Path,
    drop_leaf: bool,
) -> Result<Vec<String>, PathError> {
    let relative = relative_path(file, base)?;
    let mut segments: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if drop_leaf {
        segments.pop();
    }
    Ok(segments)
}

/// '/'-joins a remote parent and a child segment without doubling the slash
/// under the root folder "/".
pub fn remote_join(parent: &str, segment: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{segment}")
    } else {
        format!("{parent}/{segment}")
    }
}
