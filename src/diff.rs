//! Ownership diff between two states of the ring.
//!
//! A topology change either inserts or removes a batch of vnodes of a single
//! shard. Only ranges ending at those vnodes can change owner, so the diff
//! visits just them, then glues neighbouring ranges into maximal runs.

use {
    crate::{
        error::{Error, Result},
        keyspace,
        HashRange,
        RingPosition,
        RingShard,
        VnodeIndex,
    },
    std::collections::{HashMap, HashSet},
    tracing::trace,
};

/// Ranges that changed owner, grouped by the shard they are reported under.
///
/// Shards without migrated ranges are never present.
pub type MigrationMap<S> = HashMap<S, HashSet<HashRange>>;

/// Side of a migrated range used as its key in the [`MigrationMap`].
///
/// The shard being added or removed is always the other side, so it never
/// shows up as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingKey {
    /// The shard that owned the range before the change (shard added).
    BeforeOwner,
    /// The shard that owns the range after the change (shard removed).
    AfterOwner,
}

/// Computes ranges that changed owner between `before` and `after`.
///
/// `changed` holds the vnode hashes inserted into `before` to get `after`
/// (with [`ReportingKey::BeforeOwner`]) or removed from it (with
/// [`ReportingKey::AfterOwner`]). Migrated ranges of the same reporting shard
/// are merged whenever they are adjacent, including across the wraparound
/// point.
///
/// Nothing was owned on an empty `before` ring, so the map is empty then.
/// An empty `after` ring has no owner to report and fails with
/// [`Error::EmptyRing`].
pub fn migrations<S: RingShard>(
    before: &VnodeIndex<S>,
    after: &VnodeIndex<S>,
    changed: &[RingPosition],
    reporting: ReportingKey,
) -> Result<MigrationMap<S>> {
    if changed.is_empty() || before.is_empty() {
        return Ok(MigrationMap::new());
    }

    // Sub-ranges are cut along the union of both vnode sets. Inserted vnodes
    // only refine the old partition, removed ones only coarsen it.
    let finer = match reporting {
        ReportingKey::BeforeOwner => after,
        ReportingKey::AfterOwner => before,
    };

    let mut changed = changed.to_vec();
    changed.sort_unstable();
    changed.dedup();

    let mut migrated = Vec::with_capacity(changed.len());
    for hash in changed {
        let before_owner = before.ceiling_owner(hash)?;
        let after_owner = after.ceiling_owner(hash)?;
        if before_owner.shard() == after_owner.shard() {
            continue;
        }

        let prev = finer.predecessor_of(hash).ok_or(Error::EmptyRing)?;
        let range = HashRange::new(keyspace::successor(prev.hash()), hash);
        let key = match reporting {
            ReportingKey::BeforeOwner => before_owner.shard(),
            ReportingKey::AfterOwner => after_owner.shard(),
        };
        migrated.push((range, key.clone()));
    }

    Ok(merge(migrated))
}

/// Returns the ranges currently owned by `shard`, merged into maximal runs.
///
/// Returns `None` if the shard has no vnodes.
pub fn owned_ranges<S: RingShard>(index: &VnodeIndex<S>, shard: &S) -> Option<HashSet<HashRange>> {
    let sub_ranges = index
        .hashes_owned_by(shard)
        .into_iter()
        .filter_map(|hash| {
            let prev = index.predecessor_of(hash)?;
            Some((HashRange::new(keyspace::successor(prev.hash()), hash), shard.clone()))
        })
        .collect::<Vec<_>>();

    merge(sub_ranges).remove(shard)
}

/// Merges sub-ranges into maximal runs of the same key.
///
/// Input must be sorted by the right border in ascending order, i.e. walk
/// the ring clockwise starting from its smallest vnode. Neighbours are glued
/// only when there is no gap between them, so any range left out of the input
/// (because it did not migrate) splits runs on its own.
fn merge<S: RingShard>(sub_ranges: Vec<(HashRange, S)>) -> MigrationMap<S> {
    let mut runs: Vec<(HashRange, S)> = Vec::with_capacity(sub_ranges.len());
    for (range, key) in sub_ranges {
        if let Some((run, run_key)) = runs.last_mut() {
            if *run_key == key {
                if let Some(merged) = run.merged(&range) {
                    *run = merged;
                    continue;
                }
            }
        }
        runs.push((range, key));
    }

    // The walk starts at an arbitrary point of the circle, so the last run may
    // continue into the first one.
    if runs.len() > 1 {
        let (first, first_key) = &runs[0];
        let (last, last_key) = &runs[runs.len() - 1];
        if first_key == last_key {
            if let Some(merged) = last.merged(first) {
                runs[0].0 = merged;
                runs.pop();
            }
        }
    }

    let mut mapping = MigrationMap::new();
    for (range, key) in runs {
        trace!(%range, shard = ?key, "migrated range");
        mapping.entry(key).or_default().insert(range);
    }
    mapping
}
