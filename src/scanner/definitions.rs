//! Command and agent scanners
//!
//! Both kinds carry a name, a description and whatever else the author put in
//! the frontmatter, so they share one parsing path.

use super::{file_id, glob_files, read_file};
use crate::models::{Agent, Command, Metadata};
use crate::parser::parse_frontmatter_value;
use crate::Result;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

const COMMAND_PATTERNS: &[&str] = &[
    "commands/**/*.md",
    ".claude/commands/**/*.md",
    ".cursor/commands/**/*.md",
];

const AGENT_PATTERNS: &[&str] = &[
    "agents/**/*.md",
    ".claude/agents/**/*.md",
    ".cursor/agents/**/*.md",
];

struct Definition {
    id: String,
    name: String,
    description: String,
    path: PathBuf,
    metadata: Metadata,
}

pub fn scan_commands(base: &Path) -> Result<Vec<Command>> {
    let commands = scan_definitions(base, COMMAND_PATTERNS)?
        .into_iter()
        .map(|d| Command {
            id: d.id,
            name: d.name,
            description: d.description,
            path: d.path,
            metadata: d.metadata,
        })
        .collect();
    Ok(commands)
}

pub fn scan_agents(base: &Path) -> Result<Vec<Agent>> {
    let agents = scan_definitions(base, AGENT_PATTERNS)?
        .into_iter()
        .map(|d| Agent {
            id: d.id,
            name: d.name,
            description: d.description,
            path: d.path,
            metadata: d.metadata,
        })
        .collect();
    Ok(agents)
}

fn scan_definitions(base: &Path, patterns: &[&str]) -> Result<Vec<Definition>> {
    let mut definitions = Vec::new();

    for path in glob_files(base, patterns)? {
        let content = read_file(&path)?;
        let id = file_id(&path);

        let (name, description, metadata) = match parse_frontmatter_value(&content)? {
            Value::Mapping(mapping) => split_fields(mapping),
            _ => (None, None, Metadata::new()),
        };

        definitions.push(Definition {
            name: name.unwrap_or_else(|| id.clone()),
            description: description.unwrap_or_default(),
            id,
            path,
            metadata,
        });
    }

    Ok(definitions)
}

/// Pull out `name` and `description`; keep the other string-keyed fields in order
fn split_fields(mapping: Metadata) -> (Option<String>, Option<String>, Metadata) {
    let mut name = None;
    let mut description = None;
    let mut metadata = Metadata::new();

    for (key, value) in mapping {
        let Value::String(key) = key else {
            continue;
        };
        match key.as_str() {
            "name" => name = scalar_to_string(&value),
            "description" => description = scalar_to_string(&value),
            _ => {
                metadata.insert(Value::String(key), value);
            }
        }
    }

    (name, description, metadata)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::write;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_metadata_keeps_extra_fields_in_order() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".claude/commands/review.md",
            "---\nname: review\ndescription: Review a PR\nallowed-tools: [Bash, Read]\nmodel: opus\n---\nReview $ARGUMENTS\n",
        );

        let commands = scan_commands(temp_dir.path()).unwrap();
        assert_eq!(commands.len(), 1);

        let command = &commands[0];
        assert_eq!(command.id, "review");
        assert_eq!(command.name, "review");
        assert_eq!(command.description, "Review a PR");

        let keys: Vec<&str> = command
            .metadata
            .iter()
            .filter_map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["allowed-tools", "model"]);
        assert_eq!(
            command.metadata.get("model").and_then(Value::as_str),
            Some("opus")
        );
    }

    #[test]
    fn test_agent_name_defaults_to_file_stem() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "agents/planner.md", "You plan things.\n");

        let agents = scan_agents(temp_dir.path()).unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].id, "planner");
        assert_eq!(agents[0].name, "planner");
        assert_eq!(agents[0].description, "");
        assert!(agents[0].metadata.is_empty());
    }

    #[test]
    fn test_agents_and_commands_do_not_cross() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "agents/a.md", "---\nname: A\n---\n");
        write(temp_dir.path(), "commands/c.md", "---\nname: C\n---\n");

        assert_eq!(scan_agents(temp_dir.path()).unwrap()[0].name, "A");
        assert_eq!(scan_commands(temp_dir.path()).unwrap()[0].name, "C");
    }
}
