use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("at least one cluster is required")]
    ZeroClusters,

    #[error("{objects} objects cannot fill {clusters} clusters")]
    TooFewObjects { objects: usize, clusters: usize },

    #[error("{distinct} distinct values cannot fill {clusters} clusters")]
    TooFewValues { distinct: usize, clusters: usize },

    #[error("object #{index} reuses an existing key")]
    DuplicateKey { index: usize },

    #[error("object #{index} has value {value}, values must be >= 1")]
    ValueBelowOne { index: usize, value: u64 },

    #[error("max_tries must be greater than 1, got {0}")]
    InvalidMaxTries(usize),

    #[error("no two of {tries} tries produced the same clustering")]
    NoConclusiveResult { tries: usize },

    #[error("recovery found {clusters} clusters but only {capacity} are allowed")]
    RecoveryInconsistency { clusters: usize, capacity: usize },

    #[error("clustering did not reach a fixed point within {iterations} iterations")]
    DidNotConverge { iterations: usize },
}

pub type Result<T> = std::result::Result<T, ClusterError>;
