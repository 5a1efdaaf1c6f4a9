//! Three-way merge engine
//!
//! Merging folds another branch's head into the current one through a
//! two-phase protocol. Phase one ([`Repository::merge`]) locates the
//! common ancestor, classifies every file against it, and either commits
//! directly (no conflicts) or parks the classification and pauses. Phase
//! two ([`Repository::continue_merge`]) consumes the caller's per-file
//! resolutions and finalizes the merge commit; conflicts the caller
//! declined to resolve keep their current-branch content and are reported
//! back by name instead of being silently dropped.
//!
//! The merge commit always lands on the current branch, with the merged-in
//! branch head recorded as its second parent.

pub mod base_finder;
mod change_set;

use crate::areas::repository::Repository;
use crate::areas::workspace::Folder;
use crate::artifacts::merge::base_finder::{BaseFinder, CommitAncestry};
use crate::artifacts::merge::change_set::classify_changes;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;

/// A file both branches modified since the common ancestor
///
/// Carries both candidate versions so the caller can present a real
/// choice; neither side is pre-selected.
#[derive(Debug, Clone, PartialEq, new)]
pub struct MergeConflict {
    pub name: String,
    pub target: Blob,
    pub current: Blob,
}

/// Result of the first merge phase
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// No conflicts; the merge commit was created immediately
    Merged(ObjectId),
    /// The merge is paused until [`Repository::continue_merge`] is called
    Conflicted(Vec<MergeConflict>),
}

/// Which side of a conflict the caller picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Target,
    Current,
}

/// Result of the second merge phase
#[derive(Debug, Clone, PartialEq, new)]
pub struct MergeCommit {
    /// The finalized merge commit
    pub oid: ObjectId,
    /// Conflicted files the caller left unresolved; they kept their
    /// current-branch content
    pub unresolved: Vec<String>,
}

/// Classification parked between the two merge phases
#[derive(Debug, new)]
pub(crate) struct PendingMerge {
    target_branch: String,
    target_oid: ObjectId,
    changed_files: Vec<Blob>,
    conflicts: Vec<MergeConflict>,
}

impl Repository {
    /// Merge a branch into the current one (phase one)
    ///
    /// # Returns
    ///
    /// `None` when the branch is unknown, nothing has been committed yet,
    /// or the two heads share no common ancestor. Otherwise either the
    /// finished merge commit or the conflict list the caller must resolve
    /// through [`Repository::continue_merge`].
    pub fn merge(
        &mut self,
        branch_name: &str,
        worktree: &Folder,
    ) -> anyhow::Result<Option<MergeOutcome>> {
        let Some(target_oid) = self.branch_list().get(branch_name).cloned() else {
            return Ok(None);
        };
        let Some(current_oid) = self.head().cloned() else {
            return Ok(None);
        };

        let base_oid = {
            let finder = BaseFinder::new(|oid: &ObjectId| {
                self.commit_list()
                    .get_key_value(oid)
                    .map(|(oid, commit)| CommitAncestry::new(oid, commit.parent()))
            });
            finder.find_base_commit(&target_oid, &current_oid)
        };
        let Some(base_oid) = base_oid else {
            return Ok(None);
        };

        let (changed_files, conflict_files) = {
            let target_tree = self.commit_tree(&target_oid)?;
            let current_tree = self.commit_tree(&current_oid)?;
            let base_tree = self.commit_tree(&base_oid)?;
            classify_changes(target_tree, current_tree, base_tree)
        };

        if conflict_files.is_empty() {
            self.stage(changed_files);
            let merge_oid = self.commit_merge(branch_name, target_oid, worktree)?;
            return Ok(Some(MergeOutcome::Merged(merge_oid)));
        }

        let outcome = MergeOutcome::Conflicted(conflict_files.clone());
        self.set_pending_merge(PendingMerge::new(
            branch_name.to_string(),
            target_oid,
            changed_files,
            conflict_files,
        ));
        Ok(Some(outcome))
    }

    /// Finalize a conflicted merge with per-file resolutions (phase two)
    ///
    /// Every non-conflicting change is staged, each resolved conflict
    /// stages the picked side, and conflicts absent from `resolutions`
    /// keep their current-branch content and come back in
    /// [`MergeCommit::unresolved`].
    ///
    /// # Errors
    ///
    /// Fails when no merge is paused.
    pub fn continue_merge(
        &mut self,
        resolutions: &BTreeMap<String, Resolution>,
        worktree: &Folder,
    ) -> anyhow::Result<MergeCommit> {
        let pending = self
            .take_pending_merge()
            .context("no merge in progress")?;

        self.stage(pending.changed_files);

        let mut unresolved = Vec::new();
        for conflict in pending.conflicts {
            match resolutions.get(&conflict.name).copied() {
                Some(Resolution::Target) => self.stage([conflict.target]),
                Some(Resolution::Current) => self.stage([conflict.current]),
                None => unresolved.push(conflict.name),
            }
        }

        let merge_oid = self.commit_merge(&pending.target_branch, pending.target_oid, worktree)?;
        Ok(MergeCommit::new(merge_oid, unresolved))
    }

    fn commit_merge(
        &mut self,
        branch_name: &str,
        target_oid: ObjectId,
        worktree: &Folder,
    ) -> anyhow::Result<ObjectId> {
        let message = format!("merge {branch_name} into {}", self.current_branch());
        let parent = self.head().cloned();
        self.commit_with_parents(&message, worktree, parent, Some(target_oid))
    }
}
