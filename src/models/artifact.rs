use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Loosely typed frontmatter fields, in document order
pub type Metadata = serde_yaml::Mapping;

/// The four kinds of installable artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Skill,
    Rule,
    Command,
    Agent,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Skill,
        ArtifactKind::Rule,
        ArtifactKind::Command,
        ArtifactKind::Agent,
    ];

    /// Plural label, also the default subdirectory name inside a target
    pub fn plural(&self) -> &'static str {
        match self {
            ArtifactKind::Skill => "skills",
            ArtifactKind::Rule => "rules",
            ArtifactKind::Command => "commands",
            ArtifactKind::Agent => "agents",
        }
    }

    /// Human label used in prompts and headings
    pub fn title(&self) -> &'static str {
        match self {
            ArtifactKind::Skill => "Skills",
            ArtifactKind::Rule => "Rules",
            ArtifactKind::Command => "Commands",
            ArtifactKind::Agent => "Agents",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// A skill: a directory holding `SKILL.md` plus optional supporting files
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    /// Body lines after the frontmatter block
    pub lines: usize,
    pub has_references: bool,
}

/// A rule file (Claude or Cursor style)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub path: PathBuf,
    pub always_apply: bool,
    pub globs: Vec<String>,
    pub tags: Vec<String>,
}

/// A slash-command definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    pub metadata: Metadata,
}

/// A sub-agent definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    pub metadata: Metadata,
}

/// Any discovered artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Artifact {
    Skill(Skill),
    Rule(Rule),
    Command(Command),
    Agent(Agent),
}

impl Artifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Skill(_) => ArtifactKind::Skill,
            Artifact::Rule(_) => ArtifactKind::Rule,
            Artifact::Command(_) => ArtifactKind::Command,
            Artifact::Agent(_) => ArtifactKind::Agent,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Artifact::Skill(s) => &s.id,
            Artifact::Rule(r) => &r.id,
            Artifact::Command(c) => &c.id,
            Artifact::Agent(a) => &a.id,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Artifact::Skill(s) => &s.description,
            Artifact::Rule(r) => &r.description,
            Artifact::Command(c) => &c.description,
            Artifact::Agent(a) => &a.description,
        }
    }

    /// Absolute path of the defining markdown file
    pub fn path(&self) -> &Path {
        match self {
            Artifact::Skill(s) => &s.path,
            Artifact::Rule(r) => &r.path,
            Artifact::Command(c) => &c.path,
            Artifact::Agent(a) => &a.path,
        }
    }

    /// What gets linked or copied: the skill directory, or the file itself
    pub fn source_path(&self) -> &Path {
        match self {
            Artifact::Skill(s) => s.path.parent().unwrap_or(&s.path),
            _ => self.path(),
        }
    }

    /// Name of the entry this artifact occupies inside a target directory
    pub fn entry_name(&self) -> String {
        match self {
            Artifact::Skill(s) => s.id.clone(),
            _ => self
                .path()
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| self.id().to_string()),
        }
    }
}
