//! Error types for Weyl-group operations.

/// Error that can occur during Weyl-group operations.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeylError {
    #[error("{0:?} is neither \"right\" nor \"left\"")]
    BadSide(String),
    #[error("unrecognized Cartan type {0:?}")]
    BadCartanType(String),
    #[error("index {index} is not a node of the Dynkin diagram (rank {rank})")]
    BadIndexSet { index: usize, rank: usize },
    #[error("relative index set must be a superset of the index set")]
    BadRelativeIndexSet,
    #[error("cover relation contains a cycle")]
    CyclicCovers,
    #[error("{0} is not implemented yet")]
    Unimplemented(&'static str),
}

/// Result type returned by Weyl-group operations.
pub type WeylResult<T> = Result<T, WeylError>;
