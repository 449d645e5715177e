use {
    crate::{RingPosition, RingShard},
    crossbeam_skiplist::map::Entry,
};

/// A vnode: a shard's claim over a single position on the ring.
///
/// Borrows the index entry, so the token stays valid even if the vnode is
/// removed from the index meanwhile.
#[derive(Clone, Debug)]
pub struct VnodeToken<'a, S>(Entry<'a, RingPosition, S>);

impl<S: RingShard> VnodeToken<'_, S> {
    /// Returns the vnode hash i.e. its position on the ring.
    pub fn hash(&self) -> RingPosition {
        *self.0.key()
    }

    /// Returns the shard that owns this vnode.
    pub fn shard(&self) -> &S {
        self.0.value()
    }
}

impl<'a, S> From<Entry<'a, RingPosition, S>> for VnodeToken<'a, S> {
    fn from(entry: Entry<'a, RingPosition, S>) -> Self {
        Self(entry)
    }
}
