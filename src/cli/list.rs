use super::KindFlags;
use crate::models::{Artifact, ArtifactKind};
use crate::scanner;
use crate::source::{resolve_source, ResolvedSource};
use crate::Result;
use colored::Colorize;

/// List what a source provides without installing anything
pub async fn run(source: Option<&str>, kinds: KindFlags, json: bool) -> Result<()> {
    let resolved = resolve_source(source).await?;

    let mut kinds = kinds.selected();
    if kinds.is_empty() {
        kinds = ArtifactKind::ALL.to_vec();
    }

    let mut found = Vec::new();
    for kind in &kinds {
        found.push((*kind, scanner::scan(*kind, resolved.path())?));
    }

    if json {
        let all: Vec<&Artifact> = found.iter().flat_map(|(_, items)| items).collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    match &resolved {
        ResolvedSource::Local(path) => {
            println!("{}", format!("📋 Listing {}", path.display()).cyan())
        }
        ResolvedSource::Remote { reference, .. } => {
            println!("{}", format!("📋 Listing {}", reference).cyan())
        }
    }

    for (kind, items) in &found {
        println!();
        println!(
            "{} {}",
            kind.title().green().bold(),
            format!("({})", items.len()).bright_black()
        );
        if items.is_empty() {
            println!("   {}", "none".bright_black());
            continue;
        }
        for item in items {
            print_item(item);
        }
    }

    Ok(())
}

fn print_item(item: &Artifact) {
    let extra = match item {
        Artifact::Skill(skill) => {
            let mut notes = vec![format!("{} lines", skill.lines)];
            if skill.has_references {
                notes.push("references".to_string());
            }
            format!(" [{}]", notes.join(", "))
        }
        Artifact::Rule(rule) if rule.always_apply => " [always]".to_string(),
        Artifact::Rule(rule) if !rule.globs.is_empty() => format!(" [{}]", rule.globs.join(", ")),
        _ => String::new(),
    };

    println!("   • {}{}", item.id(), extra.bright_black());
    if !item.description().is_empty() {
        println!("     {}", item.description().bright_black());
    }
}
