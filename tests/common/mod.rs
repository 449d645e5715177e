#![allow(dead_code)]

use {
    std::collections::{HashMap, HashSet},
    vnring::{ConsistentHash, HashRange, IdentityPartitioner, MigrationMap, RingPosition, Shard},
};

pub type TestRing = ConsistentHash<Shard, IdentityPartitioner>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ring() -> TestRing {
    init_tracing();
    ConsistentHash::with_partitioner(IdentityPartitioner)
}

pub fn shard(idx: usize) -> Shard {
    Shard::new(format!("shard_{idx}"))
}

/// Builds the expected migration map from `(shard, [(left, right), ..])`
/// pairs.
pub fn moved(entries: &[(&Shard, &[(RingPosition, RingPosition)])]) -> MigrationMap<Shard> {
    entries
        .iter()
        .map(|(shard, borders)| {
            let ranges = borders
                .iter()
                .map(|(left, right)| HashRange::new(*left, *right))
                .collect::<HashSet<_>>();
            ((*shard).clone(), ranges)
        })
        .collect::<HashMap<_, _>>()
}
