//! Repository and commit graph
//!
//! The repository owns the staging index, the arenas of every commit,
//! tree, and blob ever created, the branch-name table, and the current
//! checkout pointer (HEAD). All structural references between objects are
//! hash-keyed lookups into those arenas; objects are never mutated once
//! registered, so they can be aliased freely across branches.
//!
//! State machine: EMPTY (head unset) becomes COMMITTED on the first
//! commit, which also creates the "master" branch; COMMITTED becomes
//! BRANCHED once a second branch exists. Checkouts and further commits
//! move HEAD but never leave a coarse state, and there is no terminal
//! state.

use crate::areas::index::Index;
use crate::areas::workspace::Folder;
use crate::artifacts::merge::PendingMerge;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::snapshot::generate_tree;
use anyhow::Context;
use std::collections::BTreeMap;

/// Branch created implicitly by the first commit
pub const DEFAULT_BRANCH: &str = "master";

/// In-memory repository: staging index, object arenas, branches, and HEAD
#[derive(Debug, Default)]
pub struct Repository {
    index: Index,
    head: Option<ObjectId>,
    commit_list: BTreeMap<ObjectId, Commit>,
    tree_list: BTreeMap<ObjectId, Tree>,
    file_list: BTreeMap<ObjectId, Blob>,
    branch_list: BTreeMap<String, ObjectId>,
    current_branch: String,
    pending_merge: Option<PendingMerge>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Current checkout pointer; `None` until the first commit
    pub fn head(&self) -> Option<&ObjectId> {
        self.head.as_ref()
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    pub fn commit_list(&self) -> &BTreeMap<ObjectId, Commit> {
        &self.commit_list
    }

    pub fn tree_list(&self) -> &BTreeMap<ObjectId, Tree> {
        &self.tree_list
    }

    /// Every blob ever staged, keyed by content id
    pub fn file_list(&self) -> &BTreeMap<ObjectId, Blob> {
        &self.file_list
    }

    pub fn branch_list(&self) -> &BTreeMap<String, ObjectId> {
        &self.branch_list
    }

    /// Resolve a commit id to the tree it snapshots
    ///
    /// A registered commit whose tree is absent from the tree arena is a
    /// broken repository invariant, reported as an error rather than a
    /// not-found outcome.
    pub fn commit_tree(&self, commit_oid: &ObjectId) -> anyhow::Result<&Tree> {
        let commit = self
            .commit_list
            .get(commit_oid)
            .with_context(|| format!("commit {} not found", commit_oid.to_short_oid()))?;

        self.tree_list.get(commit.tree_oid()).with_context(|| {
            format!(
                "commit {} references tree {} missing from the tree list",
                commit_oid.to_short_oid(),
                commit.tree_oid().to_short_oid()
            )
        })
    }

    /// Mark blobs for inclusion in the next commit
    ///
    /// Any already-staged blob with the same file name is evicted first,
    /// so re-staging an edited file never leaves two staged versions.
    /// Every staged blob is also recorded in the file arena.
    pub fn stage(&mut self, blobs: impl IntoIterator<Item = Blob>) {
        for blob in blobs {
            self.index.remove_named(blob.name());
            self.file_list.insert(blob.id().clone(), blob.clone());
            self.index.add_stage(blob);
        }
    }

    pub fn unstage(&mut self, blob: &Blob) {
        self.index.remove_stage(blob);
    }

    pub fn reset_stage(&mut self) {
        self.index.clear_stage();
    }

    /// Snapshot the working tree and append a commit to the current branch
    ///
    /// The first commit of a repository creates the "master" branch. On
    /// success HEAD advances to the new commit and the staging index is
    /// cleared.
    pub fn commit(&mut self, message: &str, worktree: &Folder) -> anyhow::Result<ObjectId> {
        let parent = self.head.clone();
        self.commit_with_parents(message, worktree, parent, None)
    }

    /// Commit with explicit parent links
    ///
    /// Shared by regular commits (parent = HEAD), branch creation (parent
    /// = the fork-point commit), and merges (second parent = the merged-in
    /// branch head). Nothing is registered in the arenas until the tree
    /// and commit are fully constructed, so a failure never leaves a
    /// partial commit behind.
    pub(crate) fn commit_with_parents(
        &mut self,
        message: &str,
        worktree: &Folder,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let tree = {
            let head_tree = match &self.head {
                Some(head_oid) => Some(self.commit_tree(head_oid)?),
                None => None,
            };
            generate_tree(worktree, &self.index, head_tree)
        };

        let branch = if self.branch_list.contains_key(DEFAULT_BRANCH) {
            self.current_branch.clone()
        } else {
            DEFAULT_BRANCH.to_string()
        };

        let commit = Commit::new(
            message.to_string(),
            tree.id().clone(),
            branch.clone(),
            parent,
            second_parent,
            chrono::Local::now().fixed_offset(),
        );
        let commit_oid = commit.id().clone();

        self.tree_list.insert(tree.id().clone(), tree);
        self.commit_list.insert(commit_oid.clone(), commit);
        self.branch_list.insert(branch.clone(), commit_oid.clone());
        self.current_branch = branch;
        self.head = Some(commit_oid.clone());
        self.index.clear_stage();

        Ok(commit_oid)
    }

    /// Fork a new branch from any historical commit
    ///
    /// Stages every blob of the fork-point tree so the branch starts as an
    /// exact copy, then records a synthetic "branch created" commit whose
    /// parent is explicitly the fork point rather than the current HEAD.
    ///
    /// # Returns
    ///
    /// The synthetic commit's id, or `None` when the branch name is taken
    /// or the fork-point commit is unknown.
    pub fn create_branch(
        &mut self,
        name: &str,
        from: &ObjectId,
        worktree: &Folder,
    ) -> anyhow::Result<Option<ObjectId>> {
        if self.branch_list.contains_key(name) || !self.commit_list.contains_key(from) {
            return Ok(None);
        }

        let files: Vec<Blob> = self.commit_tree(from)?.flatten_files().into_values().collect();
        self.current_branch = name.to_string();
        self.stage(files);

        let commit_oid =
            self.commit_with_parents(&format!("{name} branch created"), worktree, Some(from.clone()), None)?;
        Ok(Some(commit_oid))
    }

    /// Move HEAD to a commit
    ///
    /// Commit-granular rather than branch-granular: checking out an older
    /// commit is legal and leaves the current branch set to whatever
    /// branch that commit was created on.
    ///
    /// # Returns
    ///
    /// The checked-out commit's branch name, or `None` for an unknown id
    pub fn check_out(&mut self, commit_oid: &ObjectId) -> Option<String> {
        let commit = self.commit_list.get(commit_oid)?;
        let branch = commit.branch().to_string();

        self.current_branch = branch.clone();
        self.head = Some(commit_oid.clone());
        Some(branch)
    }

    pub(crate) fn set_pending_merge(&mut self, pending: PendingMerge) {
        self.pending_merge = Some(pending);
    }

    pub(crate) fn take_pending_merge(&mut self) -> Option<PendingMerge> {
        self.pending_merge.take()
    }

    /// Whether a conflicted merge is waiting for resolutions
    pub fn has_pending_merge(&self) -> bool {
        self.pending_merge.is_some()
    }
}
