//! Source resolution: local directories or GitHub repositories

pub mod fetch;
pub mod reference;

pub use fetch::{fetch_from, fetch_repository};
pub use reference::{parse_reference, RepoRef};

use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Errors that abort source resolution
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Invalid repository reference: '{0}' (expected owner/repo, owner/repo/branch or a GitHub URL)")]
    InvalidReference(String),

    #[error("Failed to fetch {repository}: {reason}")]
    Fetch { repository: String, reason: String },
}

/// Where the artifacts are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    Local(PathBuf),
    Remote { reference: RepoRef, path: PathBuf },
}

impl ResolvedSource {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedSource::Local(path) => path,
            ResolvedSource::Remote { path, .. } => path,
        }
    }
}

/// What a source argument refers to, decided without touching the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Local(PathBuf),
    Remote(RepoRef),
}

/// Classify a source argument
///
/// No argument means the current directory; an existing path wins over any
/// repository interpretation.
pub fn classify_source(input: Option<&str>) -> Result<SourceSpec> {
    let Some(input) = input else {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        return Ok(SourceSpec::Local(cwd));
    };

    let candidate = Path::new(input);
    if !input.is_empty() && candidate.exists() {
        let absolute = std::path::absolute(candidate)
            .with_context(|| format!("Failed to resolve path: {}", input))?;
        return Ok(SourceSpec::Local(absolute));
    }

    Ok(SourceSpec::Remote(parse_reference(input)?))
}

/// Resolve a source argument to a local directory, fetching if needed
pub async fn resolve_source(input: Option<&str>) -> Result<ResolvedSource> {
    match classify_source(input)? {
        SourceSpec::Local(path) => Ok(ResolvedSource::Local(path)),
        SourceSpec::Remote(reference) => {
            let path = fetch_repository(&reference).await?;
            Ok(ResolvedSource::Remote { reference, path })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_source_is_cwd() {
        let spec = classify_source(None).unwrap();
        assert_eq!(spec, SourceSpec::Local(std::env::current_dir().unwrap()));
    }

    #[test]
    fn test_existing_path_is_local() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().to_string_lossy().to_string();
        let spec = classify_source(Some(&input)).unwrap();
        assert_eq!(spec, SourceSpec::Local(temp_dir.path().to_path_buf()));
    }

    #[test]
    fn test_missing_path_is_reference() {
        let spec = classify_source(Some("acme/definitely-not-a-local-dir")).unwrap();
        assert!(matches!(spec, SourceSpec::Remote(r) if r.repo == "definitely-not-a-local-dir"));
    }

    #[test]
    fn test_empty_source_is_invalid_reference() {
        let err = classify_source(Some("")).unwrap_err();
        let source_err = err.downcast_ref::<SourceError>().unwrap();
        assert!(matches!(source_err, SourceError::InvalidReference(s) if s.is_empty()));
    }
}
