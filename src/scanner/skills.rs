use super::{glob_files, read_file};
use crate::models::Skill;
use crate::parser::parse_document;
use crate::Result;
use serde::Deserialize;
use std::path::Path;

const SKILL_PATTERNS: &[&str] = &["skills/**/SKILL.md", ".claude/skills/**/SKILL.md", "SKILL.md"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SkillFrontmatter {
    name: Option<String>,
    description: Option<String>,
}

/// Find every `SKILL.md` under `base`
///
/// The skill id is the name of the directory holding `SKILL.md`.
pub fn scan_skills(base: &Path) -> Result<Vec<Skill>> {
    let mut skills = Vec::new();

    for path in glob_files(base, SKILL_PATTERNS)? {
        let Some(dir) = path.parent() else {
            continue;
        };
        let id = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let content = read_file(&path)?;
        let doc = parse_document::<SkillFrontmatter>(&content)?;

        skills.push(Skill {
            name: doc.frontmatter.name.unwrap_or_else(|| id.clone()),
            description: doc.frontmatter.description.unwrap_or_default(),
            lines: doc.body.lines().count(),
            has_references: dir.join("references").is_dir(),
            path,
            id,
        });
    }

    Ok(skills)
}
