//! Snapshot builder
//!
//! Converts the working-tree hierarchy into an immutable tree object at
//! commit time. A commit's tree must be a complete snapshot of the working
//! tree at that moment, not merely the staged diff: files the user never
//! re-staged must still show up with the content they had in the current
//! HEAD commit. Staged blobs are attached as-is; everything else is
//! inherited from HEAD's tree by content id (copy-on-write).

use crate::areas::index::Index;
use crate::areas::workspace::{Folder, WorkNode};
use crate::artifacts::objects::tree::{Tree, TreeEntry};

/// Recursively build a snapshot tree for a working-tree folder
///
/// For each child of `folder`:
///
/// - a sub-folder recurses and is attached even when the resulting
///   sub-tree is empty, so folder structure round-trips through commits
/// - a file staged in `index` is attached with its staged content
/// - an unstaged file is inherited from `head_tree` when a blob with the
///   same content id exists there; failing that it is simply absent from
///   the snapshot (deleted content is not an error)
/// - with no prior commit (`head_tree` is `None`), unstaged files are
///   omitted
pub fn generate_tree(folder: &Folder, index: &Index, head_tree: Option<&Tree>) -> Tree {
    let mut tree = Tree::new(folder.name());

    for node in folder.children() {
        match node {
            WorkNode::Folder(subfolder) => {
                let subtree = generate_tree(subfolder, index, head_tree);
                tree.add_entry(TreeEntry::Tree(subtree));
            }
            WorkNode::File(file) => {
                if let Some(staged) = index.staged_file(file.id()) {
                    tree.add_entry(TreeEntry::Blob(staged.clone()));
                } else if let Some(inherited) =
                    head_tree.and_then(|head_tree| head_tree.find_blob(file.id()))
                {
                    tree.add_entry(TreeEntry::Blob(inherited.clone()));
                }
            }
        }
    }

    tree
}
