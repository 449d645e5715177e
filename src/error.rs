use crate::RingPosition;

/// Errors produced by ring mutations and lookups.
///
/// All of them are logic errors: nothing here is transient, so retrying the
/// same call against the same ring state yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("vnode hash {0} is already present on the ring")]
    DuplicateVnodeHash(RingPosition),

    #[error("shard {0} owns no vnodes on the ring")]
    UnknownShard(String),

    #[error("shard {0} is already on the ring")]
    ShardAlreadyOnRing(String),

    #[error("ring has no vnodes")]
    EmptyRing,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
