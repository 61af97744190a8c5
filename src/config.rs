use crate::common::hash::JoinHasher;
use crate::error::{JoinError, JoinResult};
use bon::Builder;
use std::fmt;
use std::str::FromStr;

/// Upper bound on the number of buckets pre-allocated for the right-side index.
pub const MAX_INDEX_CAPACITY: usize = 1 << 24;
/// Upper bound on the number of groups pre-allocated for the result map. Left inputs often
/// repeat keys, so the left size hint overstates the group count; the map grows past this as needed.
pub const MAX_RESULT_CAPACITY: usize = 1 << 16;
pub const DEFAULT_STRATEGY: StrategyHint = StrategyHint::Auto;

/// Caller preference for the execution path.
///
/// `Auto` picks the hash path whenever the comparison is plain equality. `NestedLoop`
/// always compares every left key against every right key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyHint {
    #[default]
    Auto,
    NestedLoop,
}

fn strategy_hint_get(key: &str) -> Option<StrategyHint> {
    hashify::tiny_map_ignore_case! {
        key.as_bytes(),
        "auto" => StrategyHint::Auto,
        "default" => StrategyHint::Auto,
        "nested_loop" => StrategyHint::NestedLoop,
        "nested-loop" => StrategyHint::NestedLoop,
        "nl" => StrategyHint::NestedLoop,
    }
}

impl StrategyHint {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StrategyHint::Auto => "auto",
            StrategyHint::NestedLoop => "nested_loop",
        }
    }
}

impl FromStr for StrategyHint {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyHint::try_from(s)
    }
}

impl TryFrom<&str> for StrategyHint {
    type Error = JoinError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        strategy_hint_get(value.trim()).ok_or_else(|| JoinError::UnknownStrategy(value.to_string()))
    }
}

impl fmt::Display for StrategyHint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tuning knobs for a single join call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JoinOptions {
    #[builder(default)]
    pub strategy: StrategyHint,
    /// Number of distinct right keys to reserve room for. Falls back to the right input's
    /// size hint when unset.
    pub index_capacity: Option<usize>,
    /// Seed for the hasher used by the index and the result map. Unset means a random seed.
    pub hash_seed: Option<u64>,
}

impl JoinOptions {
    pub fn nested_loop() -> Self {
        JoinOptions {
            strategy: StrategyHint::NestedLoop,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> JoinResult {
        if let Some(capacity) = self.index_capacity {
            if capacity > MAX_INDEX_CAPACITY {
                return Err(JoinError::InvalidConfiguration(format!(
                    "index capacity {capacity} exceeds the maximum of {MAX_INDEX_CAPACITY}"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn hasher(&self) -> JoinHasher {
        JoinHasher::from_seed(self.hash_seed)
    }

    /// Capacity to reserve for an index over an input reporting `size_hint` as its lower bound.
    pub(crate) fn index_capacity_for(&self, size_hint: usize) -> usize {
        let requested = self.index_capacity.unwrap_or(size_hint);
        if self.index_capacity.is_some() && requested > MAX_INDEX_CAPACITY {
            log::warn!(
                "index capacity {requested} exceeds the maximum of {MAX_INDEX_CAPACITY}, clamping"
            );
        }
        requested.min(MAX_INDEX_CAPACITY)
    }

    /// Capacity to reserve for the result map over a left input reporting `size_hint`.
    pub(crate) fn result_capacity_for(&self, size_hint: usize) -> usize {
        size_hint.min(MAX_RESULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_hint_parse() {
        assert_eq!("auto".parse::<StrategyHint>().unwrap(), StrategyHint::Auto);
        assert_eq!("NESTED_LOOP".parse::<StrategyHint>().unwrap(), StrategyHint::NestedLoop);
        assert_eq!("nested-loop".parse::<StrategyHint>().unwrap(), StrategyHint::NestedLoop);
        assert_eq!(" nl ".parse::<StrategyHint>().unwrap(), StrategyHint::NestedLoop);
    }

    #[test]
    fn test_strategy_hint_parse_unknown() {
        let err = "merge".parse::<StrategyHint>().unwrap_err();
        assert_eq!(err, JoinError::UnknownStrategy("merge".to_string()));
        assert_eq!(err.to_string(), "Unknown join strategy \"merge\"");
    }

    #[test]
    fn test_strategy_hint_display_round_trips() {
        for hint in [StrategyHint::Auto, StrategyHint::NestedLoop] {
            assert_eq!(hint.to_string().parse::<StrategyHint>().unwrap(), hint);
        }
    }

    #[test]
    fn test_builder_defaults() {
        let options = JoinOptions::builder().build();
        assert_eq!(options, JoinOptions::default());
        assert_eq!(options.strategy, DEFAULT_STRATEGY);
    }

    #[test]
    fn test_builder_sets_fields() {
        let options = JoinOptions::builder()
            .strategy(StrategyHint::NestedLoop)
            .index_capacity(64)
            .hash_seed(7)
            .build();
        assert_eq!(options.strategy, StrategyHint::NestedLoop);
        assert_eq!(options.index_capacity, Some(64));
        assert_eq!(options.hash_seed, Some(7));
    }

    #[test]
    fn test_validate_rejects_oversized_capacity() {
        let options = JoinOptions::builder()
            .index_capacity(MAX_INDEX_CAPACITY + 1)
            .build();
        assert!(matches!(
            options.validate(),
            Err(JoinError::InvalidConfiguration(_))
        ));
        assert!(JoinOptions::default().validate().is_ok());
    }

    #[test]
    fn test_index_capacity_for() {
        let options = JoinOptions::default();
        assert_eq!(options.index_capacity_for(10), 10);
        assert_eq!(options.index_capacity_for(usize::MAX), MAX_INDEX_CAPACITY);

        let options = JoinOptions::builder().index_capacity(3).build();
        assert_eq!(options.index_capacity_for(10), 3);
    }

    #[test]
    fn test_oversized_index_capacity_is_clamped_not_rejected() {
        let options = JoinOptions::builder()
            .index_capacity(MAX_INDEX_CAPACITY + 1)
            .build();
        assert!(options.validate().is_err());
        assert_eq!(options.index_capacity_for(0), MAX_INDEX_CAPACITY);
    }

    #[test]
    fn test_result_capacity_for() {
        let options = JoinOptions::default();
        assert_eq!(options.result_capacity_for(0), 0);
        assert_eq!(options.result_capacity_for(10), 10);
        assert_eq!(options.result_capacity_for(usize::MAX), MAX_RESULT_CAPACITY);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_serde() {
        let options = JoinOptions::builder()
            .strategy(StrategyHint::NestedLoop)
            .hash_seed(11)
            .build();
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"nested_loop\""));
        let parsed: JoinOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, options);

        let partial: JoinOptions = serde_json::from_str("{\"index_capacity\": 8}").unwrap();
        assert_eq!(partial.strategy, StrategyHint::Auto);
        assert_eq!(partial.index_capacity, Some(8));
    }
}
