use crate::common::hash::JoinHasher;
use crate::config::JoinOptions;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::Hash;

/// Right elements sharing one key, in the order they were seen.
pub type Bucket<R> = SmallVec<R, 1>;

/// Lookup structure over the right input: key -> bucket of right elements.
///
/// Built once per join and only read afterwards. Duplicate keys keep every element
/// (multiplicity is preserved), and each bucket keeps right's iteration order.
#[derive(Debug)]
pub struct RightIndex<K, R> {
    buckets: HashMap<K, Bucket<R>, JoinHasher>,
    len: usize,
}

impl<K, R> RightIndex<K, R>
where
    K: Hash + Eq,
{
    /// Index `right` by `key_fn`, stopping at the first error the extractor returns.
    pub fn try_build<I, F, E>(right: I, mut key_fn: F, options: &JoinOptions) -> Result<Self, E>
    where
        I: IntoIterator<Item = R>,
        F: FnMut(&R) -> Result<K, E>,
    {
        let iter = right.into_iter();
        let capacity = options.index_capacity_for(iter.size_hint().0);
        let mut buckets: HashMap<K, Bucket<R>, JoinHasher> =
            HashMap::with_capacity_and_hasher(capacity, options.hasher());

        let mut len = 0;
        for item in iter {
            let key = key_fn(&item)?;
            buckets.entry(key).or_default().push(item);
            len += 1;
        }

        log::trace!(
            "right index built: {len} elements in {} buckets",
            buckets.len()
        );

        Ok(RightIndex { buckets, len })
    }

    pub fn build<I, F>(right: I, mut key_fn: F, options: &JoinOptions) -> Self
    where
        I: IntoIterator<Item = R>,
        F: FnMut(&R) -> K,
    {
        Self::try_build(right, |item: &R| Ok(key_fn(item)), options)
            .unwrap_or_else(|e: std::convert::Infallible| match e {})
    }

    /// The bucket for `key`, if any right element produced it.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&[R]> {
        self.buckets.get(key).map(|bucket| &bucket[..])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.buckets.contains_key(key)
    }

    /// Number of right elements indexed.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct right keys.
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.keys()
    }
}
