use {
    crate::{
        error::{Error, Result},
        iter::RingWalk,
        keyspace,
        RingDirection::{self, Clockwise, CounterClockwise},
        RingPosition,
        RingShard,
        VnodeToken,
    },
    crossbeam_skiplist::SkipMap,
    std::ops::Bound::{Excluded, Unbounded},
};

/// Ordered index of vnode hashes and the shards that own them.
///
/// A point on the ring belongs to the shard owning the first vnode found when
/// moving clockwise from that point (the point itself included). Past the
/// largest vnode hash the walk wraps around to the smallest one.
pub struct VnodeIndex<S> {
    /// Vnode hashes (sorted in ascending order) and their owners.
    positions: SkipMap<RingPosition, S>,
}

impl<S: RingShard> Default for VnodeIndex<S> {
    fn default() -> Self {
        Self {
            positions: SkipMap::new(),
        }
    }
}

impl<S: RingShard> VnodeIndex<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a deep copy of the index.
    pub fn duplicate(&self) -> Self {
        let positions = SkipMap::new();
        for entry in self.positions.iter() {
            positions.insert(*entry.key(), entry.value().clone());
        }
        Self { positions }
    }

    /// Assigns the vnode `hash` to `shard`.
    ///
    /// Fails if the hash is already taken, by this or any other shard.
    pub fn insert(&self, hash: RingPosition, shard: S) -> Result<()> {
        if self.positions.contains_key(&hash) {
            return Err(Error::DuplicateVnodeHash(hash));
        }
        self.positions.insert(hash, shard);
        Ok(())
    }

    /// Removes the vnode `hash`, if present.
    pub fn remove(&self, hash: RingPosition) {
        self.positions.remove(&hash);
    }

    /// Removes every vnode owned by `shard` and returns their hashes in
    /// ascending order.
    pub fn remove_all_owned_by(&self, shard: &S) -> Vec<RingPosition> {
        let hashes = self.hashes_owned_by(shard);
        for hash in &hashes {
            self.positions.remove(hash);
        }
        hashes
    }

    /// Returns hashes of all vnodes owned by `shard`, in ascending order.
    pub fn hashes_owned_by(&self, shard: &S) -> Vec<RingPosition> {
        self.positions
            .iter()
            .filter(|entry| entry.value() == shard)
            .map(|entry| *entry.key())
            .collect()
    }

    /// Returns `true` if `shard` owns at least one vnode.
    pub fn has_vnodes_of(&self, shard: &S) -> bool {
        self.positions.iter().any(|entry| entry.value() == shard)
    }

    /// Returns the vnode owning `point`: the one with the smallest hash not
    /// below `point`, wrapping around to the smallest hash overall.
    pub fn ceiling_owner(&self, point: RingPosition) -> Result<VnodeToken<'_, S>> {
        self.tokens(point, Clockwise).next().ok_or(Error::EmptyRing)
    }

    /// Returns the vnode immediately counter-clockwise of `hash`, not
    /// including `hash` itself.
    ///
    /// On a ring with a single vnode that vnode is its own predecessor.
    pub fn predecessor_of(&self, hash: RingPosition) -> Option<VnodeToken<'_, S>> {
        self.tokens(keyspace::predecessor(hash), CounterClockwise).next()
    }

    /// Returns all vnodes in ascending order of their hashes.
    pub fn ordered_entries(&self) -> impl Iterator<Item = VnodeToken<'_, S>> {
        self.positions.iter().map(Into::into)
    }

    /// Returns vnodes starting from the given location on the ring.
    ///
    /// Walking clockwise starts with the vnode at `start` or the first one
    /// after it, counter-clockwise starts with the vnode at `start` or the
    /// first one before it. Either way the walk wraps around and visits
    /// every vnode exactly once.
    pub fn tokens(
        &self,
        start: RingPosition,
        dir: RingDirection,
    ) -> impl Iterator<Item = VnodeToken<'_, S>> {
        match dir {
            Clockwise => RingWalk::Clockwise(
                self.positions
                    .range(start..)
                    .chain(self.positions.range(..start)),
            ),
            CounterClockwise => RingWalk::CounterClockwise(
                self.positions
                    .range(..=start)
                    .rev()
                    .chain(self.positions.range((Excluded(start), Unbounded)).rev()),
            ),
        }
        .map(Into::into)
    }

    /// Returns `true` if a vnode with the given hash exists.
    pub fn contains(&self, hash: RingPosition) -> bool {
        self.positions.contains_key(&hash)
    }

    /// Returns number of vnodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if there are no vnodes.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
