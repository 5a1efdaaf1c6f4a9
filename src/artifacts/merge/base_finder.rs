//! Common ancestor finder for merge operations
//!
//! Three-way merging needs a base commit to diff both branch heads
//! against. The finder walks the first-parent chain of the current head,
//! collecting every visited commit id into a set, then walks the target
//! head's chain and returns the first id already present in that set: the
//! nearest common ancestor by linear ancestry.
//!
//! Second parents are deliberately not followed, so histories that join
//! only through merge commits may report no common ancestor. This is a
//! known limitation of the linear walk.
//!
//! The finder takes a generic loader function, keeping it independent of
//! how commits are stored; the repository passes a closure over its
//! commit arena.
//!
//! Debug logging for the traversal is available behind the `debug_merge`
//! cargo feature (`cargo build --features debug_merge`).

use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::HashSet;
use std::marker::PhantomData;

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

/// The slice of a commit the base finder needs: its id and parent link
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct CommitAncestry<'c> {
    pub oid: &'c ObjectId,
    pub parent: Option<&'c ObjectId>,
}

/// Finds the nearest common ancestor of two commits
///
/// # Type Parameters
///
/// * `CommitLoaderFn` - Function resolving a commit id to its ancestry
///   data, borrowed from whatever store backs the commit graph. Returns
///   `None` for unknown ids.
pub struct BaseFinder<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<CommitAncestry<'c>>,
{
    commit_loader: CommitLoaderFn,
    _marker: PhantomData<&'c ()>,
}

impl<'c, CommitLoaderFn> BaseFinder<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<CommitAncestry<'c>>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            commit_loader,
            _marker: PhantomData,
        }
    }

    /// Find the nearest common ancestor of `target` and `current`
    ///
    /// # Returns
    ///
    /// The merge base commit id, or `None` when the two commits share no
    /// history (or either chain runs through an unknown commit)
    pub fn find_base_commit(&self, target: &ObjectId, current: &ObjectId) -> Option<ObjectId> {
        let mut current_ancestors = HashSet::new();

        let mut cursor = Some(current.clone());
        while let Some(oid) = cursor {
            let ancestry = (self.commit_loader)(&oid)?;
            cursor = ancestry.parent.cloned();
            debug_log!("visited {} from current side", oid.to_short_oid());
            current_ancestors.insert(oid);
        }

        let mut cursor = Some(target.clone());
        while let Some(oid) = cursor {
            if current_ancestors.contains(&oid) {
                debug_log!("merge base is {}", oid.to_short_oid());
                return Some(oid);
            }
            let ancestry = (self.commit_loader)(&oid)?;
            cursor = ancestry.parent.cloned();
        }

        debug_log!(
            "no common ancestor between {} and {}",
            target.to_short_oid(),
            current.to_short_oid()
        );
        None
    }
}
