use thiserror::Error;
use valence_kmeans::ClusterError;
use valence_protocol::{SentenceId, WordId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame edit would leave no signature")]
    EmptyFrame,
    #[error("Sentence {sentence} is not part of the frame")]
    UnknownSentence { sentence: SentenceId },
    #[error("Word {word} not found in sentence {sentence}")]
    UnknownWord { sentence: SentenceId, word: WordId },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Cluster quantity must be at least 1")]
    ZeroClusters,
    #[error("Clusters to keep must be at least 1, got {keep}")]
    KeepBelowOne { keep: usize },
    #[error("Clusters to keep ({keep}) must be below the cluster quantity ({clusters})")]
    KeepNotBelowClusterCount { keep: usize, clusters: usize },
    #[error("Valency frame has not been initialized")]
    FrameNotInitialized,
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}
