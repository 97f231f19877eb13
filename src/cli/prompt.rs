//! Interactive prompts
//!
//! Every prompt returns `Ok(None)` when the user aborts (Esc / q), which the
//! commands treat as a clean cancellation.

use crate::install::{selectable, status_label, ExistenceMatrix, Mode};
use crate::models::{Artifact, ArtifactKind, Target, DEFAULT_TARGET};
use crate::Result;
use colored::Colorize;
use dialoguer::{Confirm, MultiSelect};

/// Pick which artifact kinds to work on
pub fn select_kinds() -> Result<Option<Vec<ArtifactKind>>> {
    let labels: Vec<&str> = ArtifactKind::ALL.iter().map(|k| k.title()).collect();
    let defaults = vec![true; labels.len()];

    let selection = MultiSelect::new()
        .with_prompt("Which artifact types? (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact_opt()?;

    Ok(selection.map(|indices| indices.into_iter().map(|i| ArtifactKind::ALL[i]).collect()))
}

/// Pick one or more built-in targets
pub fn select_targets() -> Result<Option<Vec<Target>>> {
    let targets = Target::builtins();
    let labels: Vec<String> = targets
        .iter()
        .map(|t| format!("{} {}", t.config.name, format!("({})", t.key).bright_black()))
        .collect();
    let defaults: Vec<bool> = targets.iter().map(|t| t.key == DEFAULT_TARGET).collect();

    let selection = MultiSelect::new()
        .with_prompt("Install into which targets?")
        .items(&labels)
        .defaults(&defaults)
        .interact_opt()?;

    Ok(selection.map(|indices| indices.into_iter().map(|i| targets[i].clone()).collect()))
}

/// Pick items of one kind, annotated with their per-target status
///
/// Returns `Some(vec![])` when nothing is offered or nothing is picked.
pub fn select_items(
    kind: ArtifactKind,
    items: &[Artifact],
    mode: Mode,
    matrix: &ExistenceMatrix,
) -> Result<Option<Vec<Artifact>>> {
    let offered = selectable(items, mode, matrix);
    if offered.is_empty() {
        println!(
            "   {}",
            format!("All {} are already installed in every target", kind).bright_black()
        );
        return Ok(Some(Vec::new()));
    }

    let labels: Vec<String> = offered.iter().map(|item| item_label(item, matrix)).collect();
    let defaults: Vec<bool> = offered
        .iter()
        .map(|item| mode == Mode::Update && matrix.exists_anywhere(item.id()))
        .collect();

    let selection = MultiSelect::new()
        .with_prompt(format!("Select {} to {}", kind, mode))
        .items(&labels)
        .defaults(&defaults)
        .max_length(15)
        .interact_opt()?;

    Ok(selection.map(|indices| indices.into_iter().map(|i| offered[i].clone()).collect()))
}

pub fn confirm(prompt: &str) -> Result<Option<bool>> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact_opt()?;
    Ok(answer)
}

fn item_label(item: &Artifact, matrix: &ExistenceMatrix) -> String {
    let status = status_label(item, matrix);
    let status = if status == "new" {
        status.green()
    } else {
        status.yellow()
    };

    if item.description().is_empty() {
        format!("{} [{}]", item.id(), status)
    } else {
        format!(
            "{} [{}] {}",
            item.id(),
            status,
            truncate(item.description(), 60).bright_black()
        )
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
