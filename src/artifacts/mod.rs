//! Version-control data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `objects`: object types (blob, tree, commit) and their content hashes
//! - `snapshot`: recursive snapshot construction from the working tree
//! - `merge`: merge base finding, three-way classification, and conflict
//!   resolution

pub mod merge;
pub mod objects;
pub mod snapshot;
