mod join_hasher;

pub use join_hasher::*;
