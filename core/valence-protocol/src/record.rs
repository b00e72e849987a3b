use crate::ids::{SentenceId, WordId};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One labeled dependency edge, `head -> dependent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Edge {
    pub head: WordId,
    pub dependent: WordId,
    pub label: String,
}

impl Edge {
    pub fn new(head: u32, dependent: u32, label: impl Into<String>) -> Self {
        Self {
            head: WordId(head),
            dependent: WordId(dependent),
            label: label.into(),
        }
    }
}

/// A sentence as delivered by the upstream parser.
///
/// `word_ids`, `words` and `lemmas` are index-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct SentenceRecord {
    pub id: SentenceId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
    pub word_ids: Vec<WordId>,
    pub words: Vec<String>,
    pub lemmas: Vec<String>,
    pub edges: Vec<Edge>,
}
