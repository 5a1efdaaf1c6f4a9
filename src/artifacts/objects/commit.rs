//! Commit object
//!
//! Commits record a point-in-time snapshot of the working tree together
//! with the metadata needed to reconstruct history:
//!
//! - the id of the tree capturing the snapshot (a hash-keyed reference
//!   into the repository's tree arena)
//! - the branch the commit was created on
//! - one parent link, plus a second parent for merge commits
//! - message and creation time
//!
//! The commit id is hashed over the timestamp and message, intentionally
//! not over the snapshot content: re-committing identical content still
//! yields a new, distinct commit.

use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset, SecondsFormat};

/// Compute a commit id from its creation time and message
///
/// The timestamp is rendered with nanosecond precision, so two commits
/// carrying the same message still receive distinct ids.
pub fn compute_commit_id(time: &DateTime<FixedOffset>, message: &str) -> ObjectId {
    let payload = format!(
        "{}{}",
        time.to_rfc3339_opts(SecondsFormat::Nanos, false),
        message
    );
    ObjectId::digest(payload.as_bytes())
}

/// Commit object
///
/// Immutable once registered in the commit graph; never destroyed, so the
/// full history of a session is always retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    id: ObjectId,
    message: String,
    tree_oid: ObjectId,
    branch: String,
    parent: Option<ObjectId>,
    second_parent: Option<ObjectId>,
    time: DateTime<FixedOffset>,
}

impl Commit {
    /// Create a new commit
    ///
    /// The first commit of a repository has no parent; a merge commit
    /// carries the merged-in branch head as its second parent.
    pub fn new(
        message: String,
        tree_oid: ObjectId,
        branch: String,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        time: DateTime<FixedOffset>,
    ) -> Self {
        let id = compute_commit_id(&time, &message);

        Commit {
            id,
            message,
            tree_oid,
            branch,
            parent,
            second_parent,
            time,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    /// Name of the branch this commit was created on
    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    /// Second parent link, set only on merge commits
    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    pub fn time(&self) -> DateTime<FixedOffset> {
        self.time
    }

    /// Whether this commit joins two branches
    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_time(seconds: i64) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .timestamp_opt(1_700_000_000 + seconds, 0)
            .unwrap()
    }

    #[test]
    fn commit_id_is_deterministic_for_fixed_inputs() {
        let time = fixed_time(0);
        assert_eq!(
            compute_commit_id(&time, "initial commit"),
            compute_commit_id(&time, "initial commit"),
        );
    }

    #[test]
    fn commit_id_changes_with_time_and_message() {
        let time = fixed_time(0);
        let later = fixed_time(1);

        assert_ne!(
            compute_commit_id(&time, "initial commit"),
            compute_commit_id(&later, "initial commit"),
        );
        assert_ne!(
            compute_commit_id(&time, "initial commit"),
            compute_commit_id(&time, "second commit"),
        );
    }

    #[test]
    fn identical_snapshots_at_different_times_are_distinct_commits() {
        let tree_oid = ObjectId::digest(b"tree");
        let first = Commit::new(
            "same message".to_string(),
            tree_oid.clone(),
            "master".to_string(),
            None,
            None,
            fixed_time(0),
        );
        let second = Commit::new(
            "same message".to_string(),
            tree_oid,
            "master".to_string(),
            Some(first.id().clone()),
            None,
            fixed_time(1),
        );

        assert_ne!(first.id(), second.id());
        assert_eq!(first.tree_oid(), second.tree_oid());
    }

    #[test]
    fn merge_commits_carry_two_parents() {
        let plain = Commit::new(
            "plain".to_string(),
            ObjectId::digest(b"tree"),
            "master".to_string(),
            None,
            None,
            fixed_time(0),
        );
        assert!(!plain.is_merge());

        let merge = Commit::new(
            "merge feature into master".to_string(),
            ObjectId::digest(b"tree"),
            "master".to_string(),
            Some(plain.id().clone()),
            Some(ObjectId::digest(b"feature head")),
            fixed_time(1),
        );
        assert!(merge.is_merge());
        assert_eq!(merge.parent(), Some(plain.id()));
    }
}
