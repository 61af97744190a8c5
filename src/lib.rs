//! Left group-join over arbitrary sequences.
//!
//! Every distinct key produced by the left key extractor maps to the group of values the
//! combiner produces for each matching right element, so unmatched left keys still show up
//! with an empty group. Equality joins run on a hash index built from the right side, any other
//! predicate falls back to a nested loop.
//!
//! ```rust
//! use left_group_join::left_group_join_pairs;
//!
//! let result = left_group_join_pairs(vec![1, 1, 2], vec![1, 2]);
//! assert_eq!(result[&1], vec![(1, 1), (1, 1)]);
//! assert_eq!(result[&2], vec![(2, 2)]);
//! ```
pub mod common;
pub mod config;
mod error;
pub mod join;

pub use config::{JoinOptions, StrategyHint};
pub use error::{JoinError, JoinResult};
pub use join::*;
