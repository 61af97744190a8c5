use crate::common::hash::JoinHasher;
use std::collections::HashMap;
use std::hash::Hash;

mod group;
mod join_handler;
mod left_probe;
mod nested_loop;
mod right_index;
mod strategy;


pub use group::*;
pub use join_handler::*;
pub use right_index::*;
pub use strategy::*;

/// Result of a left group-join: one group per distinct left key.
pub type GroupMap<K, G> = HashMap<K, G, JoinHasher>;

pub trait LeftGroupJoinExt: Iterator {
    fn left_group_join<R, K, T, RI, LK, RK, C>(
        self,
        right: RI,
        left_key: LK,
        right_key: RK,
        combiner: C,
    ) -> GroupMap<K, Vec<T>>
    where
        Self: Sized,
        RI: IntoIterator<Item = R>,
        K: Hash + Eq,
        LK: FnMut(&Self::Item) -> K,
        RK: FnMut(&R) -> K,
        C: FnMut(&Self::Item, &R) -> T,
    {
        left_group_join(self, right, left_key, right_key, combiner)
    }

    fn left_group_join_by<R, K, T, RI, LK, RK, C, P>(
        self,
        right: RI,
        left_key: LK,
        right_key: RK,
        combiner: C,
        comparison: Comparison<P>,
    ) -> GroupMap<K, Vec<T>>
    where
        Self: Sized,
        RI: IntoIterator<Item = R>,
        K: Hash + Eq,
        LK: FnMut(&Self::Item) -> K,
        RK: FnMut(&R) -> K,
        C: FnMut(&Self::Item, &R) -> T,
        P: FnMut(&K, &K) -> bool,
    {
        left_group_join_by(self, right, left_key, right_key, combiner, comparison)
    }

    fn left_group_join_pairs<RI>(
        self,
        right: RI,
    ) -> GroupMap<Self::Item, Vec<(Self::Item, Self::Item)>>
    where
        Self: Sized,
        Self::Item: Clone + Hash + Eq,
        RI: IntoIterator<Item = Self::Item>,
    {
        left_group_join_pairs(self, right)
    }
}

impl<T: ?Sized> LeftGroupJoinExt for T where T: Iterator {}
