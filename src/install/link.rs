//! Link-or-copy placement of a single artifact into a single target path

use super::existence::entry_exists;
use crate::models::LinkMethod;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Creates symbolic links; swapped out in tests to simulate failures
pub trait Symlinker {
    fn symlink(&self, source: &Path, target: &Path) -> io::Result<()>;
}

/// The host platform's symlink call
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSymlinker;

impl Symlinker for OsSymlinker {
    #[cfg(unix)]
    fn symlink(&self, source: &Path, target: &Path) -> io::Result<()> {
        std::os::unix::fs::symlink(source, target)
    }

    #[cfg(not(unix))]
    fn symlink(&self, _source: &Path, _target: &Path) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symlinks are not used on this platform",
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkOptions {
    pub method: LinkMethod,
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The entry was placed; carries the method actually used
    Placed(LinkMethod),
    /// The target already existed and `force` was not set; nothing changed
    AlreadyExists,
    /// The target is the source itself, or one contains the other; nothing changed
    SourceIsTarget,
}

/// Places artifacts by symlink, falling back to a recursive copy
pub struct Linker<S = OsSymlinker> {
    symlinker: S,
    symlinks_supported: bool,
}

impl Linker<OsSymlinker> {
    /// Linker for the host; Windows always copies
    pub fn new() -> Self {
        Self {
            symlinker: OsSymlinker,
            symlinks_supported: !cfg!(windows),
        }
    }
}

impl Default for Linker<OsSymlinker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symlinker> Linker<S> {
    pub fn with_symlinker(symlinker: S, symlinks_supported: bool) -> Self {
        Self {
            symlinker,
            symlinks_supported,
        }
    }

    /// Place `source` (file or directory) at `target`
    ///
    /// With `force`, an existing target is removed first. Without it, an
    /// existing target yields `AlreadyExists` and nothing is touched. A
    /// failed symlink falls through to a copy. A target that resolves onto
    /// the source (or contains it, or lies inside it) is never touched.
    pub fn link_or_copy(
        &self,
        source: &Path,
        target: &Path,
        options: LinkOptions,
    ) -> Result<LinkOutcome> {
        if overlaps(source, target) {
            return Ok(LinkOutcome::SourceIsTarget);
        }

        if options.force && entry_exists(target) {
            remove_entry(target)?;
        }

        if entry_exists(target) {
            return Ok(LinkOutcome::AlreadyExists);
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        if options.method == LinkMethod::Symlink
            && self.symlinks_supported
            && self.symlinker.symlink(source, target).is_ok()
        {
            return Ok(LinkOutcome::Placed(LinkMethod::Symlink));
        }

        copy_tree(source, target)?;
        Ok(LinkOutcome::Placed(LinkMethod::Copy))
    }
}

/// Link or copy with the host linker
pub fn link_or_copy(source: &Path, target: &Path, options: LinkOptions) -> Result<LinkOutcome> {
    Linker::new().link_or_copy(source, target, options)
}

/// Remove a file, directory tree or symlink (links are never followed)
fn remove_entry(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?;

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        // A directory symlink on Windows needs remove_dir
        fs::remove_file(path).or_else(|e| {
            if metadata.file_type().is_symlink() {
                fs::remove_dir(path)
            } else {
                Err(e)
            }
        })
    };

    result.with_context(|| format!("Failed to remove {}", path.display()))
}

/// Where `path` lives on disk, with every existing ancestor resolved
///
/// The final component is not followed, so a symlink at `path` resolves to
/// its own location rather than to what it points at.
fn entry_location(path: &Path) -> Option<PathBuf> {
    let path = std::path::absolute(path).ok()?;
    let mut missing = vec![path.file_name()?.to_os_string()];
    let mut ancestor = path.parent()?;

    loop {
        if let Ok(mut resolved) = fs::canonicalize(ancestor) {
            resolved.extend(missing.iter().rev());
            return Some(resolved);
        }
        missing.push(ancestor.file_name()?.to_os_string());
        ancestor = ancestor.parent()?;
    }
}

/// True when writing `target` would remove or recurse into `source`
fn overlaps(source: &Path, target: &Path) -> bool {
    let Some(target) = entry_location(target) else {
        return false;
    };

    let candidates = [entry_location(source), fs::canonicalize(source).ok()];
    candidates
        .iter()
        .flatten()
        .any(|source| source.starts_with(&target) || target.starts_with(source))
}

/// Recursively copy `src` to `dst`, following symlinks inside the source
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to read {}", src.display()))?;
        let relative = entry.path().strip_prefix(src)?;
        let destination = if relative.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(relative)
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)
                .with_context(|| format!("Failed to create {}", destination.display()))?;
        } else {
            fs::copy(entry.path(), &destination).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    destination.display()
                )
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct FailingSymlinker;

    impl Symlinker for FailingSymlinker {
        fn symlink(&self, _source: &Path, _target: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no symlinks here"))
        }
    }

    #[derive(Default)]
    struct CountingSymlinker {
        calls: Cell<usize>,
    }

    impl Symlinker for CountingSymlinker {
        fn symlink(&self, _source: &Path, _target: &Path) -> io::Result<()> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    fn source_skill(dir: &TempDir) -> std::path::PathBuf {
        let source = dir.path().join("source/foo");
        fs::create_dir_all(source.join("references")).unwrap();
        fs::write(source.join("SKILL.md"), "---\nname: Foo\n---\nbody\n").unwrap();
        fs::write(source.join("references/api.md"), "# API\n").unwrap();
        source
    }

    fn copy_options(force: bool) -> LinkOptions {
        LinkOptions {
            method: LinkMethod::Copy,
            force,
        }
    }

    #[test]
    fn test_second_call_without_force_reports_exists() {
        let temp_dir = TempDir::new().unwrap();
        let source = source_skill(&temp_dir);
        let target = temp_dir.path().join("target/foo");

        let first = link_or_copy(&source, &target, copy_options(false)).unwrap();
        assert_eq!(first, LinkOutcome::Placed(LinkMethod::Copy));

        fs::write(target.join("local-note.md"), "keep me").unwrap();
        let second = link_or_copy(&source, &target, copy_options(false)).unwrap();
        assert_eq!(second, LinkOutcome::AlreadyExists);
        assert!(target.join("local-note.md").exists());
    }

    #[test]
    fn test_force_replaces_existing_target() {
        let temp_dir = TempDir::new().unwrap();
        let source = source_skill(&temp_dir);
        let target = temp_dir.path().join("target/foo");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("stale.md"), "old").unwrap();

        let outcome = link_or_copy(&source, &target, copy_options(true)).unwrap();
        assert_eq!(outcome, LinkOutcome::Placed(LinkMethod::Copy));
        assert!(!target.join("stale.md").exists());
        assert_eq!(
            fs::read_to_string(target.join("SKILL.md")).unwrap(),
            fs::read_to_string(source.join("SKILL.md")).unwrap()
        );
        assert!(target.join("references/api.md").is_file());
    }

    #[test]
    fn test_symlink_failure_falls_back_to_copy() {
        let temp_dir = TempDir::new().unwrap();
        let source = source_skill(&temp_dir);
        let target = temp_dir.path().join("target/foo");

        let linker = Linker::with_symlinker(FailingSymlinker, true);
        let outcome = linker
            .link_or_copy(
                &source,
                &target,
                LinkOptions {
                    method: LinkMethod::Symlink,
                    force: false,
                },
            )
            .unwrap();

        assert_eq!(outcome, LinkOutcome::Placed(LinkMethod::Copy));
        let metadata = fs::symlink_metadata(&target).unwrap();
        assert!(!metadata.file_type().is_symlink());
        assert!(metadata.is_dir());
        assert!(target.join("SKILL.md").is_file());
    }

    #[test]
    fn test_unsupported_platform_never_calls_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let source = source_skill(&temp_dir);
        let target = temp_dir.path().join("target/foo");

        let linker = Linker::with_symlinker(CountingSymlinker::default(), false);
        let outcome = linker
            .link_or_copy(
                &source,
                &target,
                LinkOptions {
                    method: LinkMethod::Symlink,
                    force: false,
                },
            )
            .unwrap();

        assert_eq!(outcome, LinkOutcome::Placed(LinkMethod::Copy));
        assert_eq!(linker.symlinker.calls.get(), 0);
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_host_always_copies() {
        let temp_dir = TempDir::new().unwrap();
        let source = source_skill(&temp_dir);
        let target = temp_dir.path().join("target/foo");

        let outcome = link_or_copy(
            &source,
            &target,
            LinkOptions {
                method: LinkMethod::Symlink,
                force: false,
            },
        )
        .unwrap();
        assert_eq!(outcome, LinkOutcome::Placed(LinkMethod::Copy));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_points_at_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = source_skill(&temp_dir);
        let target = temp_dir.path().join("deep/nested/target/foo");

        let outcome = link_or_copy(
            &source,
            &target,
            LinkOptions {
                method: LinkMethod::Symlink,
                force: false,
            },
        )
        .unwrap();

        assert_eq!(outcome, LinkOutcome::Placed(LinkMethod::Symlink));
        assert_eq!(fs::read_link(&target).unwrap(), source);
        assert!(target.join("SKILL.md").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_force_unlinks_symlink_without_touching_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = source_skill(&temp_dir);
        let target = temp_dir.path().join("target/foo");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&source, &target).unwrap();

        let outcome = link_or_copy(&source, &target, copy_options(true)).unwrap();
        assert_eq!(outcome, LinkOutcome::Placed(LinkMethod::Copy));
        assert!(source.join("SKILL.md").is_file());
        assert!(!fs::symlink_metadata(&target).unwrap().file_type().is_symlink());
    }

    #[test]
    fn test_target_equal_to_source_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("project/.claude/skills/foo");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("SKILL.md"), "mine").unwrap();

        for method in [LinkMethod::Copy, LinkMethod::Symlink] {
            let options = LinkOptions {
                method,
                force: true,
            };
            let outcome = link_or_copy(&source, &source, options).unwrap();
            assert_eq!(outcome, LinkOutcome::SourceIsTarget);
            assert_eq!(fs::read_to_string(source.join("SKILL.md")).unwrap(), "mine");
        }
    }

    #[test]
    fn test_target_inside_source_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("my-skill");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("SKILL.md"), "root skill").unwrap();
        let target = source.join(".claude/skills/my-skill");

        let outcome = link_or_copy(&source, &target, copy_options(false)).unwrap();
        assert_eq!(outcome, LinkOutcome::SourceIsTarget);
        assert!(!source.join(".claude").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_source_reached_through_symlink_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("project/.claude/skills/foo");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("SKILL.md"), "mine").unwrap();
        let alias = temp_dir.path().join("project/skills/foo");
        fs::create_dir_all(alias.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&real, &alias).unwrap();

        let outcome = link_or_copy(&alias, &real, copy_options(true)).unwrap();
        assert_eq!(outcome, LinkOutcome::SourceIsTarget);
        assert!(real.join("SKILL.md").is_file());
    }

    #[test]
    fn test_single_file_copy() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("rules/style.md");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "Use rustfmt.").unwrap();
        let target = temp_dir.path().join("project/.claude/rules/style.md");

        let outcome = link_or_copy(&source, &target, copy_options(false)).unwrap();
        assert_eq!(outcome, LinkOutcome::Placed(LinkMethod::Copy));
        assert_eq!(fs::read_to_string(&target).unwrap(), "Use rustfmt.");
    }
}
