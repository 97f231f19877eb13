pub mod config;
pub mod install;
pub mod list;
pub mod prompt;

use crate::models::ArtifactKind;
use clap::Args;

/// Artifact type filters; none set means "not narrowed"
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct KindFlags {
    /// Only skills
    #[arg(long)]
    pub skills: bool,

    /// Only rules
    #[arg(long)]
    pub rules: bool,

    /// Only commands
    #[arg(long)]
    pub commands: bool,

    /// Only agents
    #[arg(long)]
    pub agents: bool,
}

impl KindFlags {
    /// Kinds whose flag is set, in canonical order
    pub fn selected(&self) -> Vec<ArtifactKind> {
        ArtifactKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ArtifactKind::Skill => self.skills,
                ArtifactKind::Rule => self.rules,
                ArtifactKind::Command => self.commands,
                ArtifactKind::Agent => self.agents,
            })
            .collect()
    }
}
