use super::reference::{RepoRef, GITHUB_BASE_URL};
use super::SourceError;
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tar::Archive;

const ARCHIVE_NAME: &str = "source.tar.gz";
/// Used when the repository name cannot name a directory
const FALLBACK_EXTRACT_DIR: &str = "repo";

/// Download a repository tarball from GitHub and extract it
///
/// Tries `main` then `master` when the reference uses the default branch.
/// The extracted directory is left behind for the OS to clean up; only the
/// archive file is removed. Returns the extracted root (joined with the
/// reference's subpath, if any).
pub async fn fetch_repository(reference: &RepoRef) -> Result<PathBuf> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("agentkit/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    fetch_from(&client, GITHUB_BASE_URL, reference).await
}

/// Same as [`fetch_repository`], against any host serving GitHub's archive layout
pub async fn fetch_from(
    client: &reqwest::Client,
    base_url: &str,
    reference: &RepoRef,
) -> Result<PathBuf> {
    let spinner = download_spinner();
    let mut last_failure = String::new();

    for branch in reference.branch_candidates() {
        spinner.set_message(format!(
            "Fetching {}/{}@{}...",
            reference.owner, reference.repo, branch
        ));

        match download(client, &reference.tarball_url(base_url, branch)).await {
            Ok(bytes) => {
                spinner.finish_and_clear();
                let root = unpack(&bytes, &reference.repo)?;
                println!(
                    "   {} {}/{}@{}",
                    "✓ Fetched".green(),
                    reference.owner,
                    reference.repo,
                    branch
                );
                return Ok(match &reference.subpath {
                    Some(subpath) => root.join(subpath),
                    None => root,
                });
            }
            Err(failure) => last_failure = failure,
        }
    }

    spinner.finish_and_clear();
    Err(SourceError::Fetch {
        repository: format!("{}/{}", reference.owner, reference.repo),
        reason: last_failure,
    }
    .into())
}

/// GET the archive; the error string describes the network or HTTP failure
async fn download(client: &reqwest::Client, url: &str) -> std::result::Result<Vec<u8>, String> {
    let response = client.get(url).send().await.map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {} for {}", status, url));
    }

    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

fn download_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Extracted trees are named after the repository, so a `SKILL.md` at the
/// repository root takes the repository name as its id
fn extract_dir_name(repo: &str) -> &str {
    match repo {
        "" | "." | ".." | ARCHIVE_NAME => FALLBACK_EXTRACT_DIR,
        name => name,
    }
}

/// Write the archive to a temp dir, extract it, then drop the archive file
fn unpack(bytes: &[u8], repo: &str) -> Result<PathBuf> {
    let temp_dir = tempfile::Builder::new()
        .prefix("agentkit-")
        .tempdir()
        .context("Failed to create temporary directory")?
        .keep();

    let archive_path = temp_dir.join(ARCHIVE_NAME);
    fs::write(&archive_path, bytes)
        .with_context(|| format!("Failed to write {}", archive_path.display()))?;

    let extract_dir = temp_dir.join(extract_dir_name(repo));
    let file = File::open(&archive_path)
        .with_context(|| format!("Failed to open {}", archive_path.display()))?;
    extract_tar_gz(file, &extract_dir, 1)?;

    fs::remove_file(&archive_path)
        .with_context(|| format!("Failed to remove {}", archive_path.display()))?;

    Ok(extract_dir)
}

/// Extract a gzipped tarball, dropping `strip_components` leading path parts
///
/// Entries left empty by stripping are skipped, as are entries whose path
/// would escape `target_dir`.
fn extract_tar_gz<R: Read>(reader: R, target_dir: &Path, strip_components: usize) -> Result<()> {
    fs::create_dir_all(target_dir)
        .with_context(|| format!("Failed to create {}", target_dir.display()))?;

    let mut archive = Archive::new(GzDecoder::new(reader));

    for entry in archive.entries().context("Failed to read archive")? {
        let mut entry = entry.context("Failed to read archive entry")?;
        let original = entry
            .path()
            .context("Invalid path in archive entry")?
            .into_owned();

        let Some(relative) = stripped_path(&original, strip_components) else {
            continue;
        };

        let destination = target_dir.join(&relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        entry
            .unpack(&destination)
            .with_context(|| format!("Failed to extract {}", original.display()))?;
    }

    Ok(())
}

fn stripped_path(original: &Path, strip_components: usize) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in original.components().skip(strip_components) {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                eprintln!(
                    "{}",
                    format!("⚠️  Skipping unsafe archive path: {}", original.display()).yellow()
                );
                return None;
            }
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}
