use super::group::JoinGroup;
use super::right_index::RightIndex;
use super::GroupMap;
use crate::config::JoinOptions;
use std::hash::Hash;

/// Probe `index` with every left element and collect the combined values per left key.
///
/// Each left element gets a group even when its key has no bucket. Duplicate left keys
/// extend the group created by the first occurrence.
pub(crate) fn probe_left<L, R, K, T, G, E, I, LK, C>(
    left: I,
    index: &RightIndex<K, R>,
    mut left_key: LK,
    mut combiner: C,
    options: &JoinOptions,
) -> Result<GroupMap<K, G>, E>
where
    I: IntoIterator<Item = L>,
    K: Hash + Eq,
    G: JoinGroup<T>,
    LK: FnMut(&L) -> Result<K, E>,
    C: FnMut(&L, &R) -> Result<T, E>,
{
    let iter = left.into_iter();
    let mut result: GroupMap<K, G> = GroupMap::with_capacity_and_hasher(
        options.result_capacity_for(iter.size_hint().0),
        options.hasher(),
    );

    let mut matches = 0;
    for item in iter {
        let key = left_key(&item)?;
        let bucket = index.get(&key);
        let group = result.entry(key).or_default();
        if let Some(bucket) = bucket {
            for other in bucket {
                group.push(combiner(&item, other)?);
            }
            matches += bucket.len();
        }
    }

    log::trace!(
        "left probe finished: {} groups, {matches} matches",
        result.len()
    );

    Ok(result)
}
