use super::existence::ExistenceMatrix;
use super::link::{LinkOptions, LinkOutcome, Linker, Symlinker};
use super::Mode;
use crate::models::{Artifact, InstallSummary, LinkMethod};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub mode: Mode,
    pub method: LinkMethod,
    /// Overwrite in install mode too; update always overwrites
    pub force: bool,
}

impl ExecuteOptions {
    fn force(&self) -> bool {
        self.force || self.mode == Mode::Update
    }
}

/// What happened to one (item, target) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Installed {
        target_dir: PathBuf,
        id: String,
        method: LinkMethod,
    },
    Skipped {
        target_dir: PathBuf,
        id: String,
    },
    Failed {
        target_dir: PathBuf,
        id: String,
        reason: String,
    },
}

/// Results of one run over a set of items and target directories
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// One summary per target directory, in target order
    pub summaries: Vec<(PathBuf, InstallSummary)>,
    pub events: Vec<ItemEvent>,
}

impl ExecutionReport {
    pub fn summary_for(&self, target_dir: &std::path::Path) -> Option<&InstallSummary> {
        self.summaries
            .iter()
            .find(|(dir, _)| dir == target_dir)
            .map(|(_, summary)| summary)
    }
}

/// Place every selected item into every target directory
///
/// Targets are processed one after another, items in order within each.
/// In install mode (without force) an item the matrix shows as present in
/// a target is skipped there. A failure is recorded and the run moves on.
pub fn execute<S: Symlinker>(
    items: &[Artifact],
    target_dirs: &[PathBuf],
    matrix: &ExistenceMatrix,
    options: ExecuteOptions,
    linker: &Linker<S>,
) -> ExecutionReport {
    let mut report = ExecutionReport::default();
    let link_options = LinkOptions {
        method: options.method,
        force: options.force(),
    };

    for target_dir in target_dirs {
        let mut summary = InstallSummary::default();

        for item in items {
            let id = item.id().to_string();

            if !link_options.force && matrix.exists(&id, target_dir) {
                summary.record_skipped();
                report.events.push(ItemEvent::Skipped {
                    target_dir: target_dir.clone(),
                    id,
                });
                continue;
            }

            let target_path = target_dir.join(item.entry_name());
            let event = match linker.link_or_copy(item.source_path(), &target_path, link_options) {
                Ok(LinkOutcome::Placed(method)) => {
                    summary.record_installed();
                    ItemEvent::Installed {
                        target_dir: target_dir.clone(),
                        id,
                        method,
                    }
                }
                Ok(LinkOutcome::SourceIsTarget) => {
                    summary.record_skipped();
                    ItemEvent::Skipped {
                        target_dir: target_dir.clone(),
                        id,
                    }
                }
                Ok(LinkOutcome::AlreadyExists) => {
                    summary.record_failed();
                    ItemEvent::Failed {
                        target_dir: target_dir.clone(),
                        id,
                        reason: "already exists".to_string(),
                    }
                }
                Err(e) => {
                    summary.record_failed();
                    ItemEvent::Failed {
                        target_dir: target_dir.clone(),
                        id,
                        reason: format!("{:#}", e),
                    }
                }
            };
            report.events.push(event);
        }

        report.summaries.push((target_dir.clone(), summary));
    }

    report
}
