use smallvec::SmallVec;
use std::collections::VecDeque;

/// An ordered container that collects the combined values for one left key.
pub trait JoinGroup<T>: Default {
    fn push(&mut self, value: T);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> JoinGroup<T> for Vec<T> {
    #[inline]
    fn push(&mut self, value: T) {
        Vec::push(self, value);
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> JoinGroup<T> for VecDeque<T> {
    #[inline]
    fn push(&mut self, value: T) {
        self.push_back(value);
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T, const N: usize> JoinGroup<T> for SmallVec<T, N> {
    #[inline]
    fn push(&mut self, value: T) {
        SmallVec::push(self, value);
    }

    #[inline]
    fn len(&self) -> usize {
        SmallVec::len(self)
    }
}

/// A left input whose container family decides the shape of the output groups.
///
/// `Group<T>` is the same family instantiated at the combined value type, so a join over a
/// `SmallVec<L, 4>` yields `SmallVec<T, 4>` groups and one over a `VecDeque<L>` yields
/// `VecDeque<T>` groups. Fixed size arrays and slices can't grow, so they map to `Vec<T>`.
pub trait GroupFamily: IntoIterator {
    type Group<T>: JoinGroup<T>;
}

impl<L> GroupFamily for Vec<L> {
    type Group<T> = Vec<T>;
}

impl<'a, L> GroupFamily for &'a Vec<L> {
    type Group<T> = Vec<T>;
}

impl<L> GroupFamily for VecDeque<L> {
    type Group<T> = VecDeque<T>;
}

impl<'a, L> GroupFamily for &'a VecDeque<L> {
    type Group<T> = VecDeque<T>;
}

impl<L, const N: usize> GroupFamily for SmallVec<L, N> {
    type Group<T> = SmallVec<T, N>;
}

impl<L, const N: usize> GroupFamily for [L; N] {
    type Group<T> = Vec<T>;
}

impl<'a, L> GroupFamily for &'a [L] {
    type Group<T> = Vec<T>;
}

impl<L> GroupFamily for Box<[L]> {
    type Group<T> = Vec<T>;
}
