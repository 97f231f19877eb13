use crate::models::Artifact;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Target directory → whether the item's entry is present there
pub type ExistenceMap = BTreeMap<PathBuf, bool>;

/// Per-item, per-target presence, captured before anything is written
///
/// Built once per run and read-only afterwards, so it always reflects the
/// filesystem as it was before the install or update started.
#[derive(Debug, Clone, Default)]
pub struct ExistenceMatrix {
    targets: Vec<PathBuf>,
    entries: HashMap<String, ExistenceMap>,
}

impl ExistenceMatrix {
    /// Probe `<targetDir>/<entry>` for every (item, target) pair
    ///
    /// Items sharing an id count as present when any of their entries is.
    pub fn build(items: &[Artifact], target_dirs: &[PathBuf]) -> Self {
        let mut entries: HashMap<String, ExistenceMap> = HashMap::new();

        for item in items {
            let entry_name = item.entry_name();
            let map = entries.entry(item.id().to_string()).or_default();
            for dir in target_dirs {
                let present = entry_exists(&dir.join(&entry_name));
                *map.entry(dir.clone()).or_insert(false) |= present;
            }
        }

        Self {
            targets: target_dirs.to_vec(),
            entries,
        }
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    pub fn get(&self, id: &str) -> Option<&ExistenceMap> {
        self.entries.get(id)
    }

    pub fn exists(&self, id: &str, target_dir: &Path) -> bool {
        self.entries
            .get(id)
            .and_then(|m| m.get(target_dir))
            .copied()
            .unwrap_or(false)
    }

    /// Number of targets already holding the item
    pub fn present_count(&self, id: &str) -> usize {
        self.entries
            .get(id)
            .map(|m| m.values().filter(|present| **present).count())
            .unwrap_or(0)
    }

    pub fn exists_anywhere(&self, id: &str) -> bool {
        self.present_count(id) > 0
    }

    pub fn exists_everywhere(&self, id: &str) -> bool {
        !self.targets.is_empty() && self.present_count(id) == self.targets.len()
    }
}

/// Any filesystem entry counts, including a dangling symlink
pub fn entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Skill;
    use std::fs;
    use tempfile::TempDir;

    fn skill(id: &str, source_root: &Path) -> Artifact {
        Artifact::Skill(Skill {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            path: source_root.join(id).join("SKILL.md"),
            lines: 0,
            has_references: false,
        })
    }

    #[test]
    fn test_item_present_in_exactly_one_target() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source");
        let targets: Vec<PathBuf> = (0..3)
            .map(|i| temp_dir.path().join(format!("target-{i}")))
            .collect();
        for t in &targets {
            fs::create_dir_all(t).unwrap();
        }

        let items = vec![skill("alpha", &source), skill("beta", &source)];
        fs::create_dir_all(targets[1].join("alpha")).unwrap();

        let matrix = ExistenceMatrix::build(&items, &targets);

        let alpha = matrix.get("alpha").unwrap();
        assert_eq!(alpha.len(), 3);
        assert!(alpha[&targets[1]]);
        assert!(!alpha[&targets[0]]);
        assert!(!alpha[&targets[2]]);

        assert_eq!(matrix.present_count("alpha"), 1);
        assert!(matrix.exists_anywhere("alpha"));
        assert!(!matrix.exists_everywhere("alpha"));
        assert!(!matrix.exists_anywhere("beta"));
    }

    #[test]
    fn test_files_and_missing_target_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("present");
        let missing = temp_dir.path().join("missing");
        fs::create_dir_all(&present).unwrap();
        fs::write(present.join("alpha"), "not a directory").unwrap();

        let items = vec![skill("alpha", temp_dir.path())];
        let matrix = ExistenceMatrix::build(&items, &[present.clone(), missing.clone()]);

        assert!(matrix.exists("alpha", &present));
        assert!(!matrix.exists("alpha", &missing));
        assert!(!matrix.exists("unknown", &present));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counts_as_present() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        fs::create_dir_all(&target).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), target.join("alpha")).unwrap();

        let items = vec![skill("alpha", temp_dir.path())];
        let matrix = ExistenceMatrix::build(&items, &[target.clone()]);
        assert!(matrix.exists_everywhere("alpha"));
    }
}
