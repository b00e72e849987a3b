use thiserror::Error;
use valence_protocol::{SentenceId, WordId};
use valence_tree::TreeError;

/// Malformed sentence input, detected before any tree is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantiationError {
    #[error("sentence id must be positive")]
    InvalidSentenceId,

    #[error("sentence has no word ids")]
    EmptyWordIds,

    #[error("{words} words for {word_ids} word ids")]
    MisalignedWords { word_ids: usize, words: usize },

    #[error("sentence has no dependency edges")]
    EmptyEdges,

    #[error("edge #{index} ({head} -> {dependent}) has a non-positive vertex")]
    InvalidEdgeVertex {
        index: usize,
        head: WordId,
        dependent: WordId,
    },

    #[error("edge #{index} has an empty or non-alphabetic label")]
    InvalidEdgeLabel { index: usize },

    #[error("sentence has no lemmas")]
    EmptyLemmas,

    #[error("{lemmas} lemmas for {word_ids} word ids")]
    MisalignedLemmas { word_ids: usize, lemmas: usize },

    #[error("no lemma for word {word}")]
    MissingLemma { word: WordId },
}

/// Access to analyses that do not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    #[error("sentence {sentence} has no dependency tree")]
    TreeUnavailable { sentence: SentenceId },

    #[error("sentence {sentence} has not been analyzed")]
    NoAnalysis { sentence: SentenceId },
}

/// Any failure while turning one sentence into analyses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClauseError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
}
