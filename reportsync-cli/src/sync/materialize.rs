use reportsync_core::{CatalogClient, CatalogError};

use super::paths::remote_join;

/// Ensures the folder chain `segments` exists under `parent`, creating each
/// missing level in order. A folder the service already has counts as
/// success; any other failure aborts and propagates unmodified. Returns the
/// deepest parent path.
///
/// Each step's remote path depends on the previous step, so the loop is
/// strictly sequential.
pub async fn materialize(
    client: &CatalogClient,
    parent: &str,
    segments: &[String],
) -> Result<String, CatalogError> {
    let mut parent = parent.to_string();
    for segment in segments {
        client.create_folder(segment, &parent).await?;
        parent = remote_join(&parent, segment);
    }
    Ok(parent)
}
