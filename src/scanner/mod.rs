//! Artifact discovery
//!
//! Each scanner globs a few fixed patterns under a base directory and turns
//! every matching markdown file into an artifact record. Results keep pattern
//! order, then glob order; nothing is de-duplicated.

pub mod definitions;
pub mod rules;
pub mod skills;

pub use definitions::{scan_agents, scan_commands};
pub use rules::scan_rules;
pub use skills::scan_skills;

use crate::models::{Artifact, ArtifactKind};
use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Scan `base` for artifacts of one kind
pub fn scan(kind: ArtifactKind, base: &Path) -> Result<Vec<Artifact>> {
    let artifacts = match kind {
        ArtifactKind::Skill => scan_skills(base)?.into_iter().map(Artifact::Skill).collect(),
        ArtifactKind::Rule => scan_rules(base)?.into_iter().map(Artifact::Rule).collect(),
        ArtifactKind::Command => scan_commands(base)?
            .into_iter()
            .map(Artifact::Command)
            .collect(),
        ArtifactKind::Agent => scan_agents(base)?.into_iter().map(Artifact::Agent).collect(),
    };
    Ok(artifacts)
}

/// Files under `base` matching any of `patterns`, in pattern order
pub(crate) fn glob_files(base: &Path, patterns: &[&str]) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&base.to_string_lossy());
    let mut files = Vec::new();

    for pattern in patterns {
        let full = format!("{}/{}", escaped.trim_end_matches('/'), pattern);
        for entry in glob::glob(&full).with_context(|| format!("Invalid glob pattern: {}", full))? {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// File stem as an artifact id
pub(crate) fn file_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::Path;

    pub fn write(base: &Path, relative: &str, content: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}
