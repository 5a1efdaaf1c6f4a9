//! Three-way file classification
//!
//! Flattens the target, current, and base snapshots into name-keyed blob
//! mappings and partitions every file into one of:
//!
//! - **changed**: present on only one side, or moved on exactly one side
//!   since the base (fast-forward: the unchanged side accepts the other
//!   side's version)
//! - **unchanged**: identical ids on both sides; the current version is
//!   kept through copy-forward
//! - **conflict**: both sides diverged from the base, including the case
//!   where both branches independently created a same-named file after
//!   the fork point

use crate::artifacts::merge::MergeConflict;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::tree::Tree;

/// Classify every file of the two branch heads against the merge base
///
/// # Returns
///
/// The blobs to stage for the merge commit, and the conflicts requiring
/// an explicit resolution. Conflicts carry both candidate versions.
pub(crate) fn classify_changes(
    target: &Tree,
    current: &Tree,
    base: &Tree,
) -> (Vec<Blob>, Vec<MergeConflict>) {
    let base_files = base.flatten_files();
    let current_files = current.flatten_files();
    let target_files = target.flatten_files();

    let mut changed_files = Vec::new();
    let mut conflict_files = Vec::new();

    // one-sided files are additions; no conflict is possible
    for (name, file) in &current_files {
        if !target_files.contains_key(name) {
            changed_files.push(file.clone());
        }
    }
    for (name, file) in &target_files {
        if !current_files.contains_key(name) {
            changed_files.push(file.clone());
        }
    }

    for (name, current_file) in &current_files {
        let Some(target_file) = target_files.get(name) else {
            continue;
        };
        if target_file.id() == current_file.id() {
            // unchanged between the heads; copy-forward keeps it
            continue;
        }

        match base_files.get(name) {
            Some(base_file) if target_file.id() == base_file.id() => {
                changed_files.push(current_file.clone());
            }
            Some(base_file) if current_file.id() == base_file.id() => {
                changed_files.push(target_file.clone());
            }
            // both sides diverged from the base, or both sides created
            // the file independently after the fork point
            _ => conflict_files.push(MergeConflict::new(
                name.clone(),
                target_file.clone(),
                current_file.clone(),
            )),
        }
    }

    (changed_files, conflict_files)
}
