//! Object types and content-addressing operations
//!
//! Every piece of repository content is an object identified by a SHA-1
//! hash. There are three object types:
//!
//! - **Blob**: one file's content, hashed over name + path + text
//! - **Tree**: a directory snapshot, hashed over its sorted child ids
//! - **Commit**: a point-in-time snapshot with message, timestamp, branch
//!   bookkeeping, and one or two parent links
//!
//! Identical inputs always produce identical ids, which is what lets
//! unchanged content be shared freely across commits.

pub mod blob;
pub mod commit;
pub mod object_id;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
