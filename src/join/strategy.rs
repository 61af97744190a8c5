use crate::config::StrategyHint;
use std::fmt::{self, Display};

/// How left keys are matched against right keys.
///
/// The variant is what decides the execution path: only `Equality` can use the hash index.
/// A `Predicate` that happens to behave like `==` still runs as a nested loop.
#[derive(Clone, Copy, Debug)]
pub enum Comparison<P> {
    Equality,
    Predicate(P),
}

impl<P> Default for Comparison<P> {
    fn default() -> Self {
        Comparison::Equality
    }
}

impl<P> Comparison<P> {
    pub const fn is_equality(&self) -> bool {
        matches!(self, Comparison::Equality)
    }

    pub fn map<Q, F>(self, f: F) -> Comparison<Q>
    where
        F: FnOnce(P) -> Q,
    {
        match self {
            Comparison::Equality => Comparison::Equality,
            Comparison::Predicate(p) => Comparison::Predicate(f(p)),
        }
    }
}

/// `Comparison::Equality` where no predicate type can be inferred.
pub type EqualityComparison<K> = Comparison<fn(&K, &K) -> bool>;

pub const fn equality<K>() -> EqualityComparison<K> {
    Comparison::Equality
}

/// Execution path for one join call.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum JoinStrategy {
    #[default]
    Hash,
    NestedLoop,
}

impl JoinStrategy {
    pub fn select<P>(comparison: &Comparison<P>, hint: StrategyHint) -> Self {
        let strategy = match (comparison, hint) {
            (Comparison::Equality, StrategyHint::Auto) => JoinStrategy::Hash,
            (Comparison::Equality, StrategyHint::NestedLoop) => JoinStrategy::NestedLoop,
            (Comparison::Predicate(_), _) => JoinStrategy::NestedLoop,
        };
        log::debug!("left group join: selected {strategy} (hint: {hint})");
        strategy
    }
}

impl Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinStrategy::Hash => write!(f, "HASH JOIN"),
            JoinStrategy::NestedLoop => write!(f, "NESTED LOOP JOIN"),
        }
    }
}
