//! Working-tree folder hierarchy
//!
//! The workspace is the host application's view of "what exists right
//! now": a hierarchy of named folders and files. The engine consumes it
//! through a narrow read interface (enumerate named children, take a
//! file's content identity) and never owns its lifecycle; the repository
//! borrows a [`Folder`] for the duration of a commit or merge and nothing
//! more.
//!
//! After a checkout the host can rebuild the visible hierarchy from the
//! checked-out snapshot with [`Folder::from_tree`].

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use std::collections::BTreeMap;

/// A single working-tree node: a file leaf or a nested folder
#[derive(Debug, Clone)]
pub enum WorkNode {
    File(Blob),
    Folder(Folder),
}

impl WorkNode {
    pub fn name(&self) -> &str {
        match self {
            WorkNode::File(file) => file.name(),
            WorkNode::Folder(folder) => folder.name(),
        }
    }
}

/// A named folder holding files and sub-folders, keyed by child name
#[derive(Debug, Clone)]
pub struct Folder {
    name: String,
    children: BTreeMap<String, WorkNode>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Folder {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    /// Rebuild a working-tree hierarchy from a committed snapshot
    pub fn from_tree(tree: &Tree) -> Self {
        let mut folder = Folder::new(tree.name());
        for entry in tree.entries() {
            match entry {
                TreeEntry::Blob(blob) => {
                    folder
                        .children
                        .insert(blob.name().to_string(), WorkNode::File(blob.clone()));
                }
                TreeEntry::Tree(subtree) => {
                    let child = Folder::from_tree(subtree);
                    folder
                        .children
                        .insert(child.name.clone(), WorkNode::Folder(child));
                }
            }
        }
        folder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> impl Iterator<Item = &WorkNode> {
        self.children.values()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Insert a file unless a child with the same name already exists
    ///
    /// # Returns
    ///
    /// Whether the file was inserted
    pub fn insert_file(&mut self, file: Blob) -> bool {
        if self.contains(file.name()) {
            return false;
        }
        self.children
            .insert(file.name().to_string(), WorkNode::File(file));
        true
    }

    /// Insert a sub-folder unless a child with the same name already exists
    ///
    /// # Returns
    ///
    /// Whether the folder was inserted
    pub fn insert_folder(&mut self, folder: Folder) -> bool {
        if self.contains(&folder.name) {
            return false;
        }
        self.children
            .insert(folder.name.clone(), WorkNode::Folder(folder));
        true
    }

    /// Remove a child by name
    pub fn remove(&mut self, name: &str) -> Option<WorkNode> {
        self.children.remove(name)
    }

    /// Look up a direct child file by name
    pub fn file(&self, name: &str) -> Option<&Blob> {
        match self.children.get(name) {
            Some(WorkNode::File(file)) => Some(file),
            _ => None,
        }
    }

    /// Look up a direct child file by name, mutably
    pub fn file_mut(&mut self, name: &str) -> Option<&mut Blob> {
        match self.children.get_mut(name) {
            Some(WorkNode::File(file)) => Some(file),
            _ => None,
        }
    }

    /// Look up a direct sub-folder by name, mutably
    pub fn folder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        match self.children.get_mut(name) {
            Some(WorkNode::Folder(folder)) => Some(folder),
            _ => None,
        }
    }

    /// Search the hierarchy depth-first for a file with the given name
    pub fn find_file_mut(&mut self, name: &str) -> Option<&mut Blob> {
        for node in self.children.values_mut() {
            match node {
                WorkNode::File(file) if file.name() == name => return Some(file),
                WorkNode::Folder(subfolder) => {
                    if let Some(found) = subfolder.find_file_mut(name) {
                        return Some(found);
                    }
                }
                WorkNode::File(_) => {}
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_names_are_refused() {
        let mut root = Folder::new("root");
        assert!(root.insert_file(Blob::new("a.txt", "alpha", "root")));
        assert!(!root.insert_file(Blob::new("a.txt", "other", "root")));
        assert!(!root.insert_folder(Folder::new("a.txt")));

        assert_eq!(root.file("a.txt").unwrap().text(), "alpha");
    }

    #[test]
    fn find_file_mut_descends_into_subfolders() {
        let mut sub = Folder::new("sub");
        sub.insert_file(Blob::new("deep.txt", "buried", "sub"));

        let mut root = Folder::new("root");
        root.insert_file(Blob::new("top.txt", "surface", "root"));
        root.insert_folder(sub);

        let found = root.find_file_mut("deep.txt").unwrap();
        found.update_text("rewritten");

        let reread = root.folder_mut("sub").unwrap().file("deep.txt").unwrap();
        assert_eq!(reread.text(), "rewritten");
        assert!(root.find_file_mut("missing.txt").is_none());
    }

    #[test]
    fn from_tree_round_trips_the_hierarchy() {
        let deep = Blob::new("deep.txt", "buried", "sub");
        let mut subtree = Tree::new("sub");
        subtree.add_entry(TreeEntry::Blob(deep.clone()));

        let top = Blob::new("top.txt", "surface", "root");
        let mut tree = Tree::new("root");
        tree.add_entry(TreeEntry::Blob(top.clone()));
        tree.add_entry(TreeEntry::Tree(subtree));

        let mut rebuilt = Folder::from_tree(&tree);
        assert_eq!(rebuilt.name(), "root");
        assert_eq!(rebuilt.file("top.txt"), Some(&top));
        assert_eq!(rebuilt.folder_mut("sub").unwrap().file("deep.txt"), Some(&deep));
    }
}
