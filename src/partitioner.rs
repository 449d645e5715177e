use {
    crate::RingPosition,
    std::{
        fmt,
        hash::{BuildHasher, Hash, Hasher},
    },
    xxhash_rust::xxh3::Xxh3Builder,
};

/// A keyspace partitioning strategy.
///
/// Partitioner is responsible for mapping keys to positions on the ring i.e.
/// it knows how to partition the keyspace. Lookups are only deterministic if
/// the mapping is a pure function of the key.
pub trait Partitioner<K: ?Sized> {
    /// Returns ring position for a given key.
    fn position(&self, key: &K) -> RingPosition;
}

/// Seed of the default partitioner.
///
/// Any seed works (XXH3 uses `0` by default), but it has to stay fixed for
/// placement to be reproducible across processes.
pub const DEFAULT_SEED: u64 = 12345;

/// A partitioner that uses a XXH3 hash function to partition data.
#[derive(Clone)]
pub struct Xxh3Partitioner {
    hash_builder: Xxh3Builder,
    seed: u64,
}

impl Default for Xxh3Partitioner {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl Xxh3Partitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a partitioner hashing with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            hash_builder: Xxh3Builder::new(),
            seed,
        }
    }

    /// Hashes `key` with an explicit seed.
    ///
    /// The 64-bit digest is reinterpreted as a signed ring position.
    pub fn hash<K: Hash + ?Sized>(&self, key: &K, seed: u64) -> RingPosition {
        let mut hasher = self.hash_builder.with_seed(seed).build_hasher();
        key.hash(&mut hasher);
        hasher.finish() as RingPosition
    }
}

impl<K: Hash + ?Sized> Partitioner<K> for Xxh3Partitioner {
    fn position(&self, key: &K) -> RingPosition {
        self.hash(key, self.seed)
    }
}

/// Partitioner for keys that already are ring positions.
///
/// Integer keys are placed at their own value, so a key equal to a vnode
/// hash is owned by that vnode.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityPartitioner;

impl<K> Partitioner<K> for IdentityPartitioner
where
    K: Copy + Into<RingPosition>,
{
    fn position(&self, key: &K) -> RingPosition {
        (*key).into()
    }
}

/// Partitioner backed by a function or closure.
#[derive(Clone, Copy)]
pub struct FnPartitioner<F>(pub F);

impl<F> fmt::Debug for FnPartitioner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnPartitioner(..)")
    }
}

impl<K, F> Partitioner<K> for FnPartitioner<F>
where
    K: ?Sized,
    F: Fn(&K) -> RingPosition,
{
    fn position(&self, key: &K) -> RingPosition {
        (self.0)(key)
    }
}

/// Default partitioner.
pub type DefaultPartitioner = Xxh3Partitioner;
