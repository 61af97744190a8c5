use super::group::{GroupFamily, JoinGroup};
use super::left_probe::probe_left;
use super::nested_loop::nested_loop_join;
use super::right_index::RightIndex;
use super::strategy::{Comparison, JoinStrategy};
use super::GroupMap;
use crate::config::JoinOptions;
use std::convert::Infallible;
use std::hash::Hash;

/// Default key extractor: the element itself.
#[inline]
pub fn identity<X: Clone>(item: &X) -> X {
    item.clone()
}

/// Default combiner: a `(left, right)` tuple.
#[inline]
pub fn pair<L: Clone, R: Clone>(left: &L, right: &R) -> (L, R) {
    (left.clone(), right.clone())
}

#[inline]
fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => match e {},
    }
}

/// Group every left element with the combined values of its matching right elements.
///
/// This is the fallible core every other entry point delegates to. Key extractors, the combiner
/// and the predicate may all fail; the first error aborts the join and is returned unchanged.
/// `Comparison::Equality` runs on a hash index over `right` unless `options` forces a nested
/// loop, any `Comparison::Predicate` runs as a nested loop.
///
/// The result holds exactly one entry per distinct left key. Unmatched keys map to empty groups.
pub fn try_left_group_join<L, R, K, T, G, E, LI, RI, LK, RK, C, P>(
    left: LI,
    right: RI,
    left_key: LK,
    right_key: RK,
    combiner: C,
    comparison: Comparison<P>,
    options: &JoinOptions,
) -> Result<GroupMap<K, G>, E>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    K: Hash + Eq,
    G: JoinGroup<T>,
    LK: FnMut(&L) -> Result<K, E>,
    RK: FnMut(&R) -> Result<K, E>,
    C: FnMut(&L, &R) -> Result<T, E>,
    P: FnMut(&K, &K) -> Result<bool, E>,
{
    match JoinStrategy::select(&comparison, options.strategy) {
        JoinStrategy::Hash => {
            let index = RightIndex::try_build(right, right_key, options)?;
            probe_left(left, &index, left_key, combiner, options)
        }
        JoinStrategy::NestedLoop => match comparison {
            Comparison::Equality => nested_loop_join(
                left,
                right,
                left_key,
                right_key,
                combiner,
                |a: &K, b: &K| Ok(a == b),
                options,
            ),
            Comparison::Predicate(predicate) => nested_loop_join(
                left, right, left_key, right_key, combiner, predicate, options,
            ),
        },
    }
}

/// Fallible join over a predicate relating keys of two different types. Always a nested loop.
pub fn try_left_group_join_where<L, R, KL, KR, T, G, E, LI, RI, LK, RK, C, P>(
    left: LI,
    right: RI,
    left_key: LK,
    right_key: RK,
    combiner: C,
    predicate: P,
    options: &JoinOptions,
) -> Result<GroupMap<KL, G>, E>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    KL: Hash + Eq,
    G: JoinGroup<T>,
    LK: FnMut(&L) -> Result<KL, E>,
    RK: FnMut(&R) -> Result<KR, E>,
    C: FnMut(&L, &R) -> Result<T, E>,
    P: FnMut(&KL, &KR) -> Result<bool, E>,
{
    log::debug!("left group join: selected {} (heterogeneous keys)", JoinStrategy::NestedLoop);
    nested_loop_join(left, right, left_key, right_key, combiner, predicate, options)
}

/// Infallible join with explicit options, collecting each group into a `Vec`.
pub fn left_group_join_with<L, R, K, T, LI, RI, LK, RK, C, P>(
    left: LI,
    right: RI,
    mut left_key: LK,
    mut right_key: RK,
    mut combiner: C,
    comparison: Comparison<P>,
    options: &JoinOptions,
) -> GroupMap<K, Vec<T>>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    K: Hash + Eq,
    LK: FnMut(&L) -> K,
    RK: FnMut(&R) -> K,
    C: FnMut(&L, &R) -> T,
    P: FnMut(&K, &K) -> bool,
{
    let comparison = comparison.map(|mut p| move |a: &K, b: &K| Ok(p(a, b)));
    unwrap_infallible(try_left_group_join(
        left,
        right,
        |item: &L| Ok(left_key(item)),
        |item: &R| Ok(right_key(item)),
        |l: &L, r: &R| Ok(combiner(l, r)),
        comparison,
        options,
    ))
}

/// Join with a user supplied comparison.
///
/// # Example
/// ```rust
/// use left_group_join::{left_group_join_by, Comparison};
///
/// let left = vec!["apple", "Banana"];
/// let right = vec!["APPLE", "cherry", "apple"];
/// let result = left_group_join_by(
///     left,
///     right,
///     |l: &&str| l.to_string(),
///     |r: &&str| r.to_string(),
///     |l: &&str, r: &&str| format!("{l}={r}"),
///     Comparison::Predicate(|a: &String, b: &String| a.eq_ignore_ascii_case(b)),
/// );
/// assert_eq!(result["apple"], vec!["apple=APPLE", "apple=apple"]);
/// assert!(result["Banana"].is_empty());
/// ```
pub fn left_group_join_by<L, R, K, T, LI, RI, LK, RK, C, P>(
    left: LI,
    right: RI,
    left_key: LK,
    right_key: RK,
    combiner: C,
    comparison: Comparison<P>,
) -> GroupMap<K, Vec<T>>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    K: Hash + Eq,
    LK: FnMut(&L) -> K,
    RK: FnMut(&R) -> K,
    C: FnMut(&L, &R) -> T,
    P: FnMut(&K, &K) -> bool,
{
    left_group_join_with(
        left,
        right,
        left_key,
        right_key,
        combiner,
        comparison,
        &JoinOptions::default(),
    )
}

/// Equality join on the hash path.
pub fn left_group_join<L, R, K, T, LI, RI, LK, RK, C>(
    left: LI,
    right: RI,
    left_key: LK,
    right_key: RK,
    combiner: C,
) -> GroupMap<K, Vec<T>>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    K: Hash + Eq,
    LK: FnMut(&L) -> K,
    RK: FnMut(&R) -> K,
    C: FnMut(&L, &R) -> T,
{
    left_group_join_by(
        left,
        right,
        left_key,
        right_key,
        combiner,
        Comparison::<fn(&K, &K) -> bool>::Equality,
    )
}

/// Equality join where one key extractor serves both sides, pairing matched elements.
///
/// # Example
/// ```rust
/// use left_group_join::left_group_join_on;
///
/// let result = left_group_join_on(vec![1, 2, 3, 4], vec![0, 1, 2], |x: &i32| x % 2 == 0);
/// assert_eq!(result[&false], vec![(1, 1), (3, 1)]);
/// assert_eq!(result[&true], vec![(2, 0), (2, 2), (4, 0), (4, 2)]);
/// ```
pub fn left_group_join_on<L, K, LI, RI, F>(left: LI, right: RI, key: F) -> GroupMap<K, Vec<(L, L)>>
where
    L: Clone,
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = L>,
    K: Hash + Eq,
    F: Fn(&L) -> K,
{
    left_group_join(left, right, &key, &key, pair)
}

/// Equality join on the elements themselves, pairing matched elements.
pub fn left_group_join_pairs<L, LI, RI>(left: LI, right: RI) -> GroupMap<L, Vec<(L, L)>>
where
    L: Clone + Hash + Eq,
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = L>,
{
    left_group_join(left, right, identity, identity, pair)
}

/// Predicate join over keys of different types. Always a nested loop.
pub fn left_group_join_where<L, R, KL, KR, T, LI, RI, LK, RK, C, P>(
    left: LI,
    right: RI,
    mut left_key: LK,
    mut right_key: RK,
    mut combiner: C,
    mut predicate: P,
) -> GroupMap<KL, Vec<T>>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    KL: Hash + Eq,
    LK: FnMut(&L) -> KL,
    RK: FnMut(&R) -> KR,
    C: FnMut(&L, &R) -> T,
    P: FnMut(&KL, &KR) -> bool,
{
    unwrap_infallible(try_left_group_join_where(
        left,
        right,
        |item: &L| Ok(left_key(item)),
        |item: &R| Ok(right_key(item)),
        |l: &L, r: &R| Ok(combiner(l, r)),
        |a: &KL, b: &KR| Ok(predicate(a, b)),
        &JoinOptions::default(),
    ))
}

/// Join whose groups use the container family of `left`.
///
/// A `SmallVec<L, N>` input yields `SmallVec<T, N>` groups, a `VecDeque<L>` yields
/// `VecDeque<T>` groups. Contents and ordering match the `Vec` based entry points.
pub fn left_group_join_shaped<F, R, K, T, RI, LK, RK, C, P>(
    left: F,
    right: RI,
    mut left_key: LK,
    mut right_key: RK,
    mut combiner: C,
    comparison: Comparison<P>,
    options: &JoinOptions,
) -> GroupMap<K, F::Group<T>>
where
    F: GroupFamily,
    RI: IntoIterator<Item = R>,
    K: Hash + Eq,
    LK: FnMut(&F::Item) -> K,
    RK: FnMut(&R) -> K,
    C: FnMut(&F::Item, &R) -> T,
    P: FnMut(&K, &K) -> bool,
{
    let comparison = comparison.map(|mut p| move |a: &K, b: &K| Ok(p(a, b)));
    unwrap_infallible(try_left_group_join(
        left,
        right,
        |item: &F::Item| Ok(left_key(item)),
        |item: &R| Ok(right_key(item)),
        |l: &F::Item, r: &R| Ok(combiner(l, r)),
        comparison,
        options,
    ))
}
