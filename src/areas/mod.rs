//! Core repository components
//!
//! This module contains the fundamental building blocks of a repository:
//!
//! - `index`: staging area tracking the blobs marked for the next commit
//! - `repository`: the commit graph, branch table, and HEAD bookkeeping
//! - `workspace`: the working-tree folder hierarchy supplied by the host

pub mod index;
pub mod repository;
pub mod workspace;
