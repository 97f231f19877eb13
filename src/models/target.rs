use crate::models::ArtifactKind;
use std::path::{Path, PathBuf};

/// Where each artifact kind lives inside a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    pub name: String,
    pub skills: String,
    pub rules: String,
    pub commands: String,
    pub agents: String,
}

impl TargetConfig {
    /// Layout synthesized for keys that are not built in
    pub fn for_custom(key: &str) -> Self {
        let key = key.trim_end_matches('/');
        Self {
            name: key.to_string(),
            skills: format!("{key}/skills"),
            rules: format!("{key}/rules"),
            commands: format!("{key}/commands"),
            agents: format!("{key}/agents"),
        }
    }

    pub fn subdir(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Skill => &self.skills,
            ArtifactKind::Rule => &self.rules,
            ArtifactKind::Command => &self.commands,
            ArtifactKind::Agent => &self.agents,
        }
    }
}

/// (key, name, skills, rules, commands, agents)
const BUILTIN_TARGETS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        ".claude",
        "Claude Code",
        ".claude/skills",
        ".claude/rules",
        ".claude/commands",
        ".claude/agents",
    ),
    (
        ".cursor",
        "Cursor",
        ".cursor/skills",
        ".cursor/rules",
        ".cursor/commands",
        ".cursor/agents",
    ),
    (
        ".codex",
        "Codex",
        ".codex/skills",
        ".codex/rules",
        ".codex/prompts",
        ".codex/agents",
    ),
    (
        ".gemini",
        "Gemini CLI",
        ".gemini/skills",
        ".gemini/rules",
        ".gemini/commands",
        ".gemini/agents",
    ),
    (
        ".github",
        "GitHub Copilot",
        ".github/skills",
        ".github/instructions",
        ".github/prompts",
        ".github/agents",
    ),
];

/// Target used when nothing is configured and prompting is disabled
pub const DEFAULT_TARGET: &str = ".claude";

/// A named installation destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub key: String,
    pub config: TargetConfig,
}

impl Target {
    /// Resolve a key to a built-in target, or synthesize a custom one
    pub fn from_key(key: &str) -> Self {
        let config = BUILTIN_TARGETS
            .iter()
            .find(|(k, ..)| *k == key)
            .map(|(_, name, skills, rules, commands, agents)| TargetConfig {
                name: name.to_string(),
                skills: skills.to_string(),
                rules: rules.to_string(),
                commands: commands.to_string(),
                agents: agents.to_string(),
            })
            .unwrap_or_else(|| TargetConfig::for_custom(key));

        Self {
            key: key.to_string(),
            config,
        }
    }

    pub fn builtins() -> Vec<Target> {
        BUILTIN_TARGETS
            .iter()
            .map(|(key, ..)| Target::from_key(key))
            .collect()
    }

    pub fn is_builtin(&self) -> bool {
        BUILTIN_TARGETS.iter().any(|(k, ..)| *k == self.key)
    }

    /// Absolute directory for `kind` under `project_root`
    ///
    /// An absolute custom key stays absolute.
    pub fn dir_for(&self, kind: ArtifactKind, project_root: &Path) -> PathBuf {
        project_root.join(self.config.subdir(kind))
    }
}
