use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
/// Errors raised by the join machinery itself.
///
/// Failures of user supplied key extractors, combiners or predicates are never
/// wrapped in this type; the fallible entry points hand them back unchanged.
pub enum JoinError {
    #[error("Invalid configuration. {0}")]
    InvalidConfiguration(String),

    #[error("Unknown join strategy \"{0}\"")]
    UnknownStrategy(String),
}

pub type JoinResult<T = ()> = Result<T, JoinError>;
