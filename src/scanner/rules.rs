use super::{file_id, glob_files, read_file};
use crate::models::Rule;
use crate::parser::parse_document;
use crate::Result;
use serde::Deserialize;
use std::path::Path;

const RULE_PATTERNS: &[&str] = &[
    "rules/**/*.md",
    ".claude/rules/**/*.md",
    ".cursor/rules/**/*.md",
    ".cursor/rules/**/*.mdc",
];

/// `globs` and `tags` accept either a YAML list or a comma separated string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringList {
    One(String),
    Many(Vec<String>),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringList::One(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            StringList::Many(items) => items,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RuleFrontmatter {
    description: Option<String>,
    always_apply: Option<bool>,
    globs: Option<StringList>,
    tags: Option<StringList>,
}

pub fn scan_rules(base: &Path) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();

    for path in glob_files(base, RULE_PATTERNS)? {
        let content = read_file(&path)?;
        let fm = parse_document::<RuleFrontmatter>(&content)?.frontmatter;

        rules.push(Rule {
            id: file_id(&path),
            description: fm.description.unwrap_or_default(),
            always_apply: fm.always_apply.unwrap_or(false),
            globs: fm.globs.map(StringList::into_vec).unwrap_or_default(),
            tags: fm.tags.map(StringList::into_vec).unwrap_or_default(),
            path,
        });
    }

    Ok(rules)
}
