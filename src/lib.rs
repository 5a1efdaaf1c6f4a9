//! An in-memory, content-addressable version-control engine.
//!
//! The engine models the familiar blob/tree/commit object trio, a staging
//! index, a branch table, and a three-way merge algorithm, but keeps every
//! object in memory for the lifetime of the session. It is meant to be
//! embedded in a host application that owns the visible working tree; the
//! engine consumes that tree through the narrow [`areas::workspace::Folder`]
//! interface and never persists anything.
//!
//! Module layout:
//!
//! - `artifacts::objects`: blob, tree, and commit value types and their
//!   content hashes
//! - `artifacts::snapshot`: recursive snapshot construction with
//!   copy-forward of unchanged content
//! - `artifacts::merge`: merge base finding, three-way file classification,
//!   and the two-phase conflict resolution protocol
//! - `areas`: the staging index, the working-tree hierarchy, and the
//!   repository that ties the commit graph together

pub mod areas;
pub mod artifacts;

pub use areas::index::Index;
pub use areas::repository::Repository;
pub use areas::workspace::{Folder, WorkNode};
pub use artifacts::merge::{MergeCommit, MergeConflict, MergeOutcome, Resolution};
pub use artifacts::objects::blob::Blob;
pub use artifacts::objects::commit::Commit;
pub use artifacts::objects::object_id::ObjectId;
pub use artifacts::objects::tree::{Tree, TreeEntry};
