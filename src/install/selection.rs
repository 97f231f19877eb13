//! Selection rules shared by the interactive and `--all` paths

use super::existence::ExistenceMatrix;
use super::Mode;
use crate::models::Artifact;

/// Items picked by "select all"
///
/// Install takes only items absent from every target: an item present in
/// any target is left out for all of them. Update takes everything.
pub fn select_all(items: &[Artifact], mode: Mode, matrix: &ExistenceMatrix) -> Vec<Artifact> {
    match mode {
        Mode::Install => items
            .iter()
            .filter(|item| !matrix.exists_anywhere(item.id()))
            .cloned()
            .collect(),
        Mode::Update => items.to_vec(),
    }
}

/// Items offered in the interactive list
///
/// Install hides items that every target already has.
pub fn selectable<'a>(
    items: &'a [Artifact],
    mode: Mode,
    matrix: &ExistenceMatrix,
) -> Vec<&'a Artifact> {
    items
        .iter()
        .filter(|item| mode == Mode::Update || !matrix.exists_everywhere(item.id()))
        .collect()
}

/// `new` or `exists in k/n targets`
pub fn status_label(item: &Artifact, matrix: &ExistenceMatrix) -> String {
    let present = matrix.present_count(item.id());
    if present == 0 {
        "new".to_string()
    } else {
        format!("exists in {}/{} targets", present, matrix.targets().len())
    }
}
