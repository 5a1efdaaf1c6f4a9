//! Blob object
//!
//! Blobs represent one file's content. A blob carries the file name, its
//! text, and the name of its parent folder (the logical path); the id is a
//! SHA-1 hash over all three, so two files with identical name, path, and
//! text collide to the same blob id. That collision is the deduplication
//! property, not a bug.

use crate::artifacts::objects::object_id::ObjectId;

/// Compute a blob id from its identity fields
///
/// Hashes the concatenation of name, path, and text. Pure and
/// deterministic: identical inputs always yield identical ids, on repeated
/// calls and across separate blob instances.
pub fn compute_blob_id(name: &str, path: &str, text: &str) -> ObjectId {
    ObjectId::digest(format!("{name}{path}{text}").as_bytes())
}

/// Blob object representing one file's content
///
/// The id is computed at construction and refreshed on every mutation of
/// `text` or `path`, so it is never observable in a stale state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    name: String,
    text: String,
    path: String,
    id: ObjectId,
}

impl Blob {
    /// Create a new blob and compute its content hash
    ///
    /// # Arguments
    ///
    /// * `name` - File name
    /// * `text` - File content
    /// * `path` - Name of the parent folder
    pub fn new(name: impl Into<String>, text: impl Into<String>, path: impl Into<String>) -> Self {
        let name = name.into();
        let text = text.into();
        let path = path.into();
        let id = compute_blob_id(&name, &path, &text);

        Blob {
            name,
            text,
            path,
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Replace the file content and regenerate the id
    pub fn update_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.refresh_id();
    }

    /// Move the file under a different parent folder and regenerate the id
    pub fn update_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.refresh_id();
    }

    fn refresh_id(&mut self) {
        self.id = compute_blob_id(&self.name, &self.path, &self.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blob_id_is_deterministic_across_instances() {
        let first = Blob::new("notes.txt", "content", "root");
        let second = Blob::new("notes.txt", "content", "root");

        assert_eq!(first.id(), second.id());
        assert_eq!(
            compute_blob_id("notes.txt", "root", "content"),
            compute_blob_id("notes.txt", "root", "content"),
        );
    }

    #[test]
    fn blob_id_depends_on_every_identity_field() {
        let base = Blob::new("notes.txt", "content", "root");

        assert_ne!(base.id(), Blob::new("other.txt", "content", "root").id());
        assert_ne!(base.id(), Blob::new("notes.txt", "changed", "root").id());
        assert_ne!(base.id(), Blob::new("notes.txt", "content", "docs").id());
    }

    #[test]
    fn mutations_regenerate_the_id() {
        let mut blob = Blob::new("notes.txt", "content", "root");
        let original = blob.id().clone();

        blob.update_text("rewritten");
        let after_text = blob.id().clone();
        assert_ne!(original, after_text);

        blob.update_path("docs");
        assert_ne!(after_text, *blob.id());

        // reverting both mutations restores the original id
        blob.update_text("content");
        blob.update_path("root");
        assert_eq!(original, *blob.id());
    }
}
