//! Staging area (index)
//!
//! The index tracks which blobs should be included in the next commit,
//! keyed by content hash. It holds at most one entry per distinct hash;
//! re-staging the same logical file with new content is handled one level
//! up by [`crate::areas::repository::Repository::stage`], which evicts the
//! stale entry by name before inserting the new one.
//!
//! The index is cleared on every successful commit.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Staging area mapping blob ids to staged blobs
#[derive(Debug, Clone, Default)]
pub struct Index {
    staged_files: BTreeMap<ObjectId, Blob>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a blob, keyed by its id
    pub fn add_stage(&mut self, blob: Blob) {
        self.staged_files.insert(blob.id().clone(), blob);
    }

    /// Remove a blob by id; no-op if it is not staged
    pub fn remove_stage(&mut self, blob: &Blob) {
        self.staged_files.remove(blob.id());
    }

    /// Empty the staging area
    pub fn clear_stage(&mut self) {
        self.staged_files.clear();
    }

    /// Look up a staged blob by id
    pub fn staged_file(&self, oid: &ObjectId) -> Option<&Blob> {
        self.staged_files.get(oid)
    }

    /// Enumerate all staged blobs
    pub fn staged_files(&self) -> impl Iterator<Item = &Blob> {
        self.staged_files.values()
    }

    pub fn is_empty(&self) -> bool {
        self.staged_files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.staged_files.len()
    }

    /// Evict any staged blob carrying the given file name
    ///
    /// Matching is by name, not id: an edited file hashes to a new id, and
    /// the stale entry would otherwise linger next to the fresh one.
    pub(crate) fn remove_named(&mut self, name: &str) {
        self.staged_files.retain(|_, staged| staged.name() != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_and_remove_round_trip() {
        let mut index = Index::new();
        let blob = Blob::new("a.txt", "alpha", "root");

        index.add_stage(blob.clone());
        assert_eq!(index.staged_file(blob.id()), Some(&blob));

        index.remove_stage(&blob);
        assert!(index.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut index = Index::new();
        let blob = Blob::new("a.txt", "alpha", "root");

        index.remove_stage(&blob);
        index.add_stage(blob.clone());
        index.remove_stage(&blob);
        index.remove_stage(&blob);

        assert!(index.is_empty());
    }

    #[test]
    fn clear_empties_the_staging_area() {
        let mut index = Index::new();
        index.add_stage(Blob::new("a.txt", "alpha", "root"));
        index.add_stage(Blob::new("b.txt", "beta", "root"));
        assert_eq!(index.len(), 2);

        index.clear_stage();
        assert!(index.is_empty());
    }

    #[test]
    fn remove_named_evicts_only_matching_entries() {
        let mut index = Index::new();
        index.add_stage(Blob::new("a.txt", "alpha", "root"));
        index.add_stage(Blob::new("b.txt", "beta", "root"));

        index.remove_named("a.txt");

        let names: Vec<_> = index.staged_files().map(Blob::name).collect();
        assert_eq!(names, vec!["b.txt"]);
    }
}
