//! Tree object
//!
//! Trees represent directory snapshots. A tree maps child object ids to
//! the child objects themselves, which are either blobs or nested trees.
//! The tree id is a SHA-1 hash over the sorted set of child ids, so
//! insertion order never influences the resulting id.
//!
//! Trees are built per commit by the snapshot builder and are immutable
//! once a commit references them; they are retained forever in the
//! repository's tree arena for ancestor lookups.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Compute a tree id from its child ids
///
/// The ids are sorted before hashing, which guarantees that two trees with
/// identical child sets collide to the same id regardless of the order in
/// which the entries were added.
pub fn compute_tree_id<'a, I>(child_ids: I) -> ObjectId
where
    I: IntoIterator<Item = &'a ObjectId>,
{
    let mut ids: Vec<&str> = child_ids.into_iter().map(AsRef::as_ref).collect();
    ids.sort_unstable();
    ObjectId::digest(ids.concat().as_bytes())
}

/// A single child of a tree: a file or a nested directory snapshot
#[derive(Debug, Clone)]
pub enum TreeEntry {
    Blob(Blob),
    Tree(Tree),
}

impl TreeEntry {
    pub fn oid(&self) -> &ObjectId {
        match self {
            TreeEntry::Blob(blob) => blob.id(),
            TreeEntry::Tree(tree) => tree.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeEntry::Blob(blob) => blob.name(),
            TreeEntry::Tree(tree) => tree.name(),
        }
    }
}

/// Tree object representing a directory snapshot
///
/// Entries are keyed by child id; the map keeps them sorted so the tree id
/// can be recomputed cheaply after every insertion.
#[derive(Debug, Clone)]
pub struct Tree {
    name: String,
    entries: BTreeMap<ObjectId, TreeEntry>,
    id: ObjectId,
}

impl Tree {
    /// Create an empty tree for the folder with the given name
    ///
    /// An empty tree is a valid snapshot: folders with no staged or
    /// inherited content still round-trip through commits.
    pub fn new(name: impl Into<String>) -> Self {
        let entries = BTreeMap::new();
        let id = compute_tree_id(entries.keys());

        Tree {
            name: name.into(),
            entries,
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry and recompute the tree id
    pub fn add_entry(&mut self, entry: TreeEntry) {
        self.entries.insert(entry.oid().clone(), entry);
        self.id = compute_tree_id(self.entries.keys());
    }

    /// Search the tree recursively for a blob with the given id
    pub fn find_blob(&self, oid: &ObjectId) -> Option<&Blob> {
        for entry in self.entries.values() {
            match entry {
                TreeEntry::Blob(blob) if blob.id() == oid => return Some(blob),
                TreeEntry::Tree(subtree) => {
                    if let Some(found) = subtree.find_blob(oid) {
                        return Some(found);
                    }
                }
                TreeEntry::Blob(_) => {}
            }
        }

        None
    }

    /// Flatten the tree into a file-name to blob mapping
    ///
    /// Collects blobs from nested trees recursively, keyed by file name.
    /// The merge engine compares snapshots through this view.
    pub fn flatten_files(&self) -> BTreeMap<String, Blob> {
        let mut files = BTreeMap::new();
        self.collect_files(&mut files);
        files
    }

    fn collect_files(&self, files: &mut BTreeMap<String, Blob>) {
        for entry in self.entries.values() {
            match entry {
                TreeEntry::Blob(blob) => {
                    files.insert(blob.name().to_string(), blob.clone());
                }
                TreeEntry::Tree(subtree) => subtree.collect_files(files),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn tree_id_is_insertion_order_independent() {
        let first = Blob::new("a.txt", "alpha", "root");
        let second = Blob::new("b.txt", "beta", "root");

        let mut forward = Tree::new("root");
        forward.add_entry(TreeEntry::Blob(first.clone()));
        forward.add_entry(TreeEntry::Blob(second.clone()));

        let mut backward = Tree::new("root");
        backward.add_entry(TreeEntry::Blob(second));
        backward.add_entry(TreeEntry::Blob(first));

        assert_eq!(forward.id(), backward.id());
    }

    #[test]
    fn adding_an_entry_changes_the_tree_id() {
        let mut tree = Tree::new("root");
        let empty_id = tree.id().clone();

        tree.add_entry(TreeEntry::Blob(Blob::new("a.txt", "alpha", "root")));
        assert_ne!(empty_id, *tree.id());
    }

    #[test]
    fn empty_trees_with_the_same_child_set_share_an_id() {
        // the name is display metadata, not part of the content address
        assert_eq!(Tree::new("docs").id(), Tree::new("src").id());
    }

    #[test]
    fn find_blob_descends_into_nested_trees() {
        let nested = Blob::new("deep.txt", "buried", "sub");
        let mut subtree = Tree::new("sub");
        subtree.add_entry(TreeEntry::Blob(nested.clone()));

        let mut root = Tree::new("root");
        root.add_entry(TreeEntry::Blob(Blob::new("top.txt", "surface", "root")));
        root.add_entry(TreeEntry::Tree(subtree));

        assert_eq!(root.find_blob(nested.id()), Some(&nested));
        assert_eq!(root.find_blob(&ObjectId::digest(b"missing")), None);
    }

    #[test]
    fn flatten_files_collects_nested_blobs_by_name() {
        let mut subtree = Tree::new("sub");
        subtree.add_entry(TreeEntry::Blob(Blob::new("deep.txt", "buried", "sub")));

        let mut root = Tree::new("root");
        root.add_entry(TreeEntry::Blob(Blob::new("top.txt", "surface", "root")));
        root.add_entry(TreeEntry::Tree(subtree));

        let files = root.flatten_files();
        assert_eq!(
            files.into_keys().collect::<Vec<_>>(),
            vec!["deep.txt", "top.txt"]
        );
    }

    proptest! {
        #[test]
        fn tree_id_ignores_any_insertion_order(
            texts in proptest::collection::vec("[a-z]{1,8}", 1..8)
        ) {
            let blobs: Vec<Blob> = texts
                .iter()
                .enumerate()
                .map(|(i, text)| Blob::new(format!("file{i}"), text.clone(), "root"))
                .collect();

            let mut forward = Tree::new("root");
            for blob in &blobs {
                forward.add_entry(TreeEntry::Blob(blob.clone()));
            }

            let mut backward = Tree::new("root");
            for blob in blobs.iter().rev() {
                backward.add_entry(TreeEntry::Blob(blob.clone()));
            }

            prop_assert_eq!(forward.id(), backward.id());
        }
    }
}
