#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod diff;
mod error;
mod index;
mod iter;
pub mod keyspace;
mod partitioner;
mod range;
mod shard;
mod token;

use {
    parking_lot::{RwLock, RwLockUpgradableReadGuard},
    std::{
        collections::{BTreeSet, HashSet},
        sync::Arc,
    },
    tracing::debug,
};
pub use {
    diff::{MigrationMap, ReportingKey},
    error::{Error, Result},
    index::VnodeIndex,
    keyspace::RingPoint,
    partitioner::*,
    range::HashRange,
    shard::{RingShard, Shard},
    token::VnodeToken,
};

/// Position on the ring.
pub type RingPosition = i64;

/// Defines the direction in which the ring is traversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingDirection {
    Clockwise,
    CounterClockwise,
}

/// Consistent hash ring with virtual nodes.
///
/// Every shard claims an arbitrary set of vnode hashes, each vnode being
/// responsible for the keys from the previous vnode (counter-clockwise, not
/// included) up to and including its own hash. Adding or removing a shard
/// returns the exact ranges of keys that changed owner.
///
/// The ring can be shared between threads: lookups run concurrently and
/// always observe a complete ring state, while topology changes are applied
/// one at a time and published all at once.
pub struct ConsistentHash<S = Shard, P = DefaultPartitioner> {
    /// Partitioner used to compute ring positions of keys.
    partitioner: P,

    /// Current ring state, replaced as a whole on every topology change.
    index: RwLock<Arc<VnodeIndex<S>>>,
}

impl<S: RingShard> Default for ConsistentHash<S> {
    fn default() -> Self {
        Self::with_partitioner(DefaultPartitioner::new())
    }
}

impl<S: RingShard> ConsistentHash<S> {
    /// Creates an empty ring that places keys with the XXH3 partitioner.
    ///
    /// # Examples
    ///
    /// ```
    /// use vnring::{ConsistentHash, Shard};
    ///
    /// let ring = ConsistentHash::new();
    /// ring.add_shard(Shard::new("a"), [-1000, 1000]).unwrap();
    /// assert_eq!(ring.get_shard_by_key("some key").unwrap(), Shard::new("a"));
    /// ```
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: RingShard, P> ConsistentHash<S, P> {
    /// Creates an empty ring that places keys with the given partitioner.
    pub fn with_partitioner(partitioner: P) -> Self {
        Self {
            partitioner,
            index: RwLock::new(Arc::new(VnodeIndex::new())),
        }
    }

    /// Adds `shard` with the given vnode hashes to the ring.
    ///
    /// Returns ranges that `shard` took over, keyed by the shard that owned
    /// them before. Adding the first shard moves nothing, so the map is empty.
    ///
    /// The call is all-or-nothing: if any of the hashes is already on the
    /// ring, [`Error::DuplicateVnodeHash`] is returned and the ring is left
    /// untouched. An empty set of hashes does not change the ring.
    ///
    /// A shard joins the ring once: while it owns vnodes, adding it again
    /// fails with [`Error::ShardAlreadyOnRing`]. This keeps
    /// [`remove_shard`](Self::remove_shard) the exact inverse of the add.
    pub fn add_shard<I>(&self, shard: S, vnode_hashes: I) -> Result<MigrationMap<S>>
    where
        I: IntoIterator<Item = RingPosition>,
    {
        let hashes = vnode_hashes.into_iter().collect::<BTreeSet<_>>();
        if hashes.is_empty() {
            return Ok(MigrationMap::new());
        }

        let guard = self.index.upgradable_read();
        let before = Arc::clone(&*guard);
        if before.has_vnodes_of(&shard) {
            return Err(Error::ShardAlreadyOnRing(format!("{shard:?}")));
        }

        let after = before.duplicate();
        for hash in &hashes {
            after.insert(*hash, shard.clone())?;
        }

        let added = hashes.into_iter().collect::<Vec<_>>();
        let mapping = diff::migrations(&before, &after, &added, ReportingKey::BeforeOwner)?;
        *RwLockUpgradableReadGuard::upgrade(guard) = Arc::new(after);

        let ranges: usize = mapping.values().map(HashSet::len).sum();
        debug!(?shard, vnodes = added.len(), ranges, "added shard to ring");
        Ok(mapping)
    }

    /// Removes `shard` and all of its vnodes from the ring.
    ///
    /// Returns ranges that `shard` gave away, keyed by the shard that owns
    /// them now.
    ///
    /// Fails with [`Error::UnknownShard`] if the shard has no vnodes, and with
    /// [`Error::EmptyRing`] if it is the last shard (its keys would have
    /// nowhere to go). On failure the ring is left untouched.
    pub fn remove_shard(&self, shard: &S) -> Result<MigrationMap<S>> {
        let guard = self.index.upgradable_read();
        let before = Arc::clone(&*guard);
        let after = before.duplicate();

        let removed = after.remove_all_owned_by(shard);
        if removed.is_empty() {
            return Err(Error::UnknownShard(format!("{shard:?}")));
        }
        if after.is_empty() {
            return Err(Error::EmptyRing);
        }

        let mapping = diff::migrations(&before, &after, &removed, ReportingKey::AfterOwner)?;
        *RwLockUpgradableReadGuard::upgrade(guard) = Arc::new(after);

        let ranges: usize = mapping.values().map(HashSet::len).sum();
        debug!(?shard, vnodes = removed.len(), ranges, "removed shard from ring");
        Ok(mapping)
    }

    /// Returns the shard responsible for the given key.
    ///
    /// The key is owned by the first vnode at or after its ring position,
    /// wrapping around past the largest vnode hash.
    pub fn get_shard_by_key<K>(&self, key: &K) -> Result<S>
    where
        K: ?Sized,
        P: Partitioner<K>,
    {
        self.get_shard_by_position(self.position(key))
    }

    /// Returns the shard responsible for the given ring position.
    pub fn get_shard_by_position(&self, pos: RingPosition) -> Result<S> {
        let index = self.snapshot();
        let owner = index.ceiling_owner(pos)?.shard().clone();
        Ok(owner)
    }

    /// Returns ring position to which a given key will be assigned.
    pub fn position<K>(&self, key: &K) -> RingPosition
    where
        K: ?Sized,
        P: Partitioner<K>,
    {
        self.partitioner.position(key)
    }

    /// Returns the ranges of the keyspace currently owned by `shard`.
    ///
    /// These are the ranges whose data has to be handed over before the
    /// shard is drained. Whenever the shard has no vnodes, `None` is returned.
    pub fn ranges_of(&self, shard: &S) -> Option<HashSet<HashRange>> {
        let index = self.snapshot();
        diff::owned_ranges(&index, shard)
    }

    /// Returns vnode hashes owned by `shard`, in ascending order.
    pub fn vnodes_of(&self, shard: &S) -> Vec<RingPosition> {
        self.snapshot().hashes_owned_by(shard)
    }

    /// Returns shards currently on the ring, ordered by their smallest vnode
    /// hash.
    pub fn shards(&self) -> Vec<S> {
        let index = self.snapshot();
        let mut seen = HashSet::new();
        let shards = index
            .ordered_entries()
            .filter(|token| seen.insert(token.shard().clone()))
            .map(|token| token.shard().clone())
            .collect::<Vec<_>>();
        shards
    }

    /// Returns number of vnodes on the ring.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns `true` if the ring has no vnodes.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Returns the current ring state.
    ///
    /// The read lock is released as soon as the pointer is cloned, so a
    /// topology change waits only for in-flight clones, never for lookups
    /// running against an older snapshot.
    fn snapshot(&self) -> Arc<VnodeIndex<S>> {
        Arc::clone(&*self.index.read())
    }
}
