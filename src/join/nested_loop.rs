use super::group::JoinGroup;
use super::GroupMap;
use crate::config::JoinOptions;
use std::hash::Hash;

/// Compare every left key against every right key.
///
/// The right input is drained into `(key, element)` pairs when the first left key has been
/// extracted, since it has to be walked once per left element. An empty left input never
/// touches `right`. Left and right keys may be different types here.
pub(crate) fn nested_loop_join<L, R, KL, KR, T, G, E, LI, RI, LK, RK, C, P>(
    left: LI,
    right: RI,
    mut left_key: LK,
    mut right_key: RK,
    mut combiner: C,
    mut comparison: P,
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
    let mut right = Some(right);
    let mut keyed_right: Option<Vec<(KR, R)>> = None;

    let iter = left.into_iter();
    let mut result: GroupMap<KL, G> = GroupMap::with_capacity_and_hasher(
        options.result_capacity_for(iter.size_hint().0),
        options.hasher(),
    );

    let mut comparisons = 0;
    for item in iter {
        let key = left_key(&item)?;
        let keyed: &[(KR, R)] = match keyed_right {
            Some(ref keyed) => keyed,
            None => &*keyed_right.insert(
                right
                    .take()
                    .into_iter()
                    .flatten()
                    .map(|other| right_key(&other).map(|other_key| (other_key, other)))
                    .collect::<Result<Vec<_>, E>>()?,
            ),
        };
        let mut matched = Vec::new();
        for (other_key, other) in keyed {
            if comparison(&key, other_key)? {
                matched.push(combiner(&item, other)?);
            }
        }
        comparisons += keyed.len();

        let group = result.entry(key).or_default();
        for value in matched {
            group.push(value);
        }
    }

    log::trace!(
        "nested loop finished: {} groups, {comparisons} comparisons",
        result.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_range_predicate() {
        // right elements are (lo, hi) ranges, left elements are points
        let result: Result<GroupMap<i32, Vec<(i32, i32)>>, Infallible> = nested_loop_join(
            vec![1, 5, 9],
            vec![(0, 4), (3, 6), (4, 10)],
            |l: &i32| Ok(*l),
            |r: &(i32, i32)| Ok(*r),
            |l: &i32, r: &(i32, i32)| Ok((*l, r.0)),
            |l: &i32, r: &(i32, i32)| Ok(r.0 <= *l && *l < r.1),
            &JoinOptions::default(),
        );
        let result = result.unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[&1], vec![(1, 0)]);
        assert_eq!(result[&5], vec![(5, 3), (5, 4)]);
        assert_eq!(result[&9], vec![(9, 4)]);
    }

    #[test]
    fn test_every_left_key_gets_a_group() {
        let result: Result<GroupMap<i32, Vec<i32>>, Infallible> = nested_loop_join(
            vec![1, 2],
            vec![10, 20],
            |l: &i32| Ok(*l),
            |r: &i32| Ok(*r),
            |l: &i32, _r: &i32| Ok(*l),
            |_l: &i32, _r: &i32| Ok(false),
            &JoinOptions::default(),
        );
        let result = result.unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.values().all(|g| g.is_empty()));
    }

    #[test]
    fn test_predicate_error_propagates() {
        let result: Result<GroupMap<i32, Vec<i32>>, &'static str> = nested_loop_join(
            vec![1, 2],
            vec![1, 2],
            |l: &i32| Ok(*l),
            |r: &i32| Ok(*r),
            |l: &i32, _r: &i32| Ok(*l),
            |l: &i32, r: &i32| if *l == 2 { Err("cannot compare") } else { Ok(l == r) },
            &JoinOptions::default(),
        );
        assert_eq!(result.unwrap_err(), "cannot compare");
    }

    #[test]
    fn test_empty_left_never_extracts_right_keys() {
        let result: Result<GroupMap<i32, Vec<i32>>, &'static str> = nested_loop_join(
            Vec::<i32>::new(),
            vec![1, 2],
            |l: &i32| Ok(*l),
            |_r: &i32| Err("bad right key"),
            |l: &i32, _r: &i32| Ok(*l),
            |l: &i32, r: &i32| Ok(l == r),
            &JoinOptions::default(),
        );
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_left_key_error_precedes_right_key_error() {
        let result: Result<GroupMap<i32, Vec<i32>>, &'static str> = nested_loop_join(
            vec![1],
            vec![1],
            |_l: &i32| Err("bad left key"),
            |_r: &i32| Err("bad right key"),
            |l: &i32, _r: &i32| Ok(*l),
            |l: &i32, r: &i32| Ok(l == r),
            &JoinOptions::default(),
        );
        assert_eq!(result.unwrap_err(), "bad left key");
    }

    #[test]
    fn test_right_keys_extracted_once_per_element() {
        let mut calls = 0;
        let result: Result<GroupMap<i32, Vec<i32>>, Infallible> = nested_loop_join(
            vec![1, 2, 3],
            vec![1, 2],
            |l: &i32| Ok(*l),
            |r: &i32| {
                calls += 1;
                Ok(*r)
            },
            |_l: &i32, r: &i32| Ok(*r),
            |l: &i32, r: &i32| Ok(l == r),
            &JoinOptions::default(),
        );
        let result = result.unwrap();
        assert_eq!(result[&2], vec![2]);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_right_key_error_propagates() {
        let result: Result<GroupMap<i32, Vec<i32>>, &'static str> = nested_loop_join(
            vec![1],
            vec![1, 2],
            |l: &i32| Ok(*l),
            |r: &i32| if *r == 2 { Err("bad right key") } else { Ok(*r) },
            |l: &i32, _r: &i32| Ok(*l),
            |l: &i32, r: &i32| Ok(l == r),
            &JoinOptions::default(),
        );
        assert_eq!(result.unwrap_err(), "bad right key");
    }
}
