use std::path::{Path, PathBuf};

use anyhow::Context;
use reportsync_core::{CatalogClient, CatalogEntry};

use crate::config::Config;
use crate::sync::batch::{Substitution, download_batch, upload_batch};
use crate::sync::files::{LocalFileRef, find_files_under};

pub async fn run_list(config: Config, path: &str) -> anyhow::Result<()> {
    let client = connect(&config)?;
    let items = client.list_children(path, true).await?;

    for entry in &items {
        println!(
            "{:<14} {:>17}  {}",
            entry.kind().display_name(),
            format_modified(entry.modified.as_deref()),
            entry.path
        );
    }
    eprintln!("[reportsync] {} items under {path}", items.len());
    Ok(())
}

pub async fn run_download(
    mut config: Config,
    remote_paths: &[String],
    target_override: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(target) = target_override {
        config.target_folder = target.to_string_lossy().into_owned();
    }
    anyhow::ensure!(
        !config.target_folder.is_empty(),
        "no target folder configured; pass --target or set REPORTSYNC_TARGET_FOLDER"
    );

    let client = connect(&config)?;
    let listing = client.list_children("/", true).await?;
    let entries = resolve_entries(&listing, remote_paths)?;

    let substitution = Substitution {
        search: config.replace_source.clone(),
        replace: config.replace_target.clone(),
    };
    let target_folder = PathBuf::from(&config.target_folder);

    download_batch(
        &client,
        &entries,
        &target_folder,
        substitution.is_active().then_some(&substitution),
        print_progress("downloaded"),
    )
    .await?;

    eprintln!("[reportsync] download completed");
    config.save().context("failed to save settings")?;
    Ok(())
}

pub async fn run_upload(
    mut config: Config,
    destination: &str,
    files: &[PathBuf],
    base_override: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(base) = base_override {
        config.folder_base = base.to_string_lossy().into_owned();
    }
    let base = if config.folder_base.is_empty() {
        std::env::current_dir().context("current directory is unavailable")?
    } else {
        PathBuf::from(&config.folder_base)
    };

    let selection: Vec<LocalFileRef> = if files.is_empty() {
        find_files_under(&base).context("failed to enumerate files")?
    } else {
        files
            .iter()
            .map(|file| LocalFileRef::new(file.clone(), base.clone()))
            .collect()
    };
    anyhow::ensure!(!selection.is_empty(), "nothing to upload under {}", base.display());

    let client = connect(&config)?;
    let listing = client.list_children("/", true).await?;
    let folder = listing
        .iter()
        .find(|entry| entry.path == destination)
        .with_context(|| format!("remote folder not found: {destination}"))?;

    upload_batch(&client, folder, &selection, print_progress("uploaded")).await?;

    eprintln!("[reportsync] upload completed");
    config.save().context("failed to save settings")?;
    Ok(())
}

fn connect(config: &Config) -> anyhow::Result<CatalogClient> {
    anyhow::ensure!(
        !config.server_url.is_empty(),
        "no server url configured; set REPORTSYNC_SERVER_URL or store it in settings"
    );
    let client = CatalogClient::new(&config.server_url, config.credentials())
        .context("failed to build catalog client")?;
    Ok(client)
}

fn resolve_entries(
    listing: &[CatalogEntry],
    remote_paths: &[String],
) -> anyhow::Result<Vec<CatalogEntry>> {
    remote_paths
        .iter()
        .map(|requested| {
            listing
                .iter()
                .find(|entry| entry.path == *requested)
                .cloned()
                .with_context(|| format!("remote item not found: {requested}"))
        })
        .collect()
}

fn print_progress(verb: &'static str) -> impl FnMut(usize, usize) {
    move |completed, total| {
        let percent = completed as f64 / total as f64 * 100.0;
        eprintln!("[reportsync] {verb} {completed}/{total} ({percent:.0}%)");
    }
}

fn format_modified(modified: Option<&str>) -> String {
    let Some(value) = modified else {
        return String::new();
    };
    match time::OffsetDateTime::parse(value, &time::format_description::well_known::Rfc3339) {
        Ok(parsed) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            parsed.year(),
            parsed.month() as u8,
            parsed.day(),
            parsed.hour(),
            parsed.minute()
        ),
        Err(_) => value.to_string(),
    }
}
