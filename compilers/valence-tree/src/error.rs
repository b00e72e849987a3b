use thiserror::Error;
use valence_protocol::WordId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("{tokens} tokens and {edges} edges do not fit a tree over {punctuation} punctuation tokens")]
    EdgeCountMismatch {
        tokens: usize,
        edges: usize,
        punctuation: usize,
    },

    #[error("expected exactly one root, found {roots}")]
    RootCount { roots: usize },

    #[error("vertex {vertex} is reached twice or not at all from the root")]
    CycleOrSharedParent { vertex: WordId },

    #[error("root {root} has no subj or subjc dependent")]
    InvalidRoot { root: WordId },

    #[error("edge {head} -> {dependent} has an empty label")]
    InvalidLabel { head: WordId, dependent: WordId },
}
