use crate::edit::SignatureMap;
use crate::error::FrameError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;
use valence_clause::DependencyAnalysis;
use valence_protocol::{ComplementClass, SentenceId, WordId};

/// Word with its first character lower-cased, as prepositions are listed.
pub fn preposition_key(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The analyses contributing to a frame, the surface words of their
/// sentences, and the live signature mapping derived from them.
#[derive(Debug, Clone, Default)]
pub struct ValencyFrame {
    analyses: BTreeMap<SentenceId, Vec<DependencyAnalysis>>,
    words: HashMap<SentenceId, HashMap<WordId, String>>,
    current: SignatureMap,
    consensus_count: usize,
}

impl ValencyFrame {
    pub fn new(
        analyses: BTreeMap<SentenceId, Vec<DependencyAnalysis>>,
        words: HashMap<SentenceId, HashMap<WordId, String>>,
    ) -> Self {
        let current = build_mapping(&analyses);
        Self {
            analyses,
            words,
            current,
            consensus_count: 0,
        }
    }

    pub fn analyses(&self) -> &BTreeMap<SentenceId, Vec<DependencyAnalysis>> {
        &self.analyses
    }

    pub fn sentence_count(&self) -> usize {
        self.analyses.len()
    }

    pub fn current(&self) -> &SignatureMap {
        &self.current
    }

    /// Replaces the live mapping. An empty mapping is rejected and the frame
    /// stays as it was.
    pub fn set_current(&mut self, mapping: SignatureMap) -> Result<(), FrameError> {
        if mapping.is_empty() {
            return Err(FrameError::EmptyFrame);
        }
        self.current = mapping;
        Ok(())
    }

    /// Rebuilds the live mapping from the analyses, dropping earlier edits.
    pub fn reset(&mut self) {
        self.current = build_mapping(&self.analyses);
    }

    pub fn consensus_count(&self) -> usize {
        self.consensus_count
    }

    pub fn set_consensus_count(&mut self, count: usize) {
        self.consensus_count = count;
    }

    /// Surface form of `word`. Prepositions are matched on the word as
    /// written, so contractions like "im" are not folded into "in".
    pub fn word(&self, sentence: SentenceId, word: WordId) -> Result<&str, FrameError> {
        self.words
            .get(&sentence)
            .ok_or(FrameError::UnknownSentence { sentence })?
            .get(&word)
            .map(String::as_str)
            .ok_or(FrameError::UnknownWord { sentence, word })
    }

    /// Occurrences of each head word among complements of `classes`.
    pub fn head_word_counts(&self, classes: &[ComplementClass]) -> Result<BTreeMap<String, u64>, FrameError> {
        let mut counts = BTreeMap::new();
        for (&sentence, analyses) in &self.analyses {
            for analysis in analyses {
                for complement in analysis.complements_of(classes) {
                    let key = preposition_key(self.word(sentence, complement.root_id())?);
                    *counts.entry(key).or_insert(0) += 1;
                }
            }
        }
        Ok(counts)
    }

    /// Offers every complement of `classes` to `relabel` with its head word
    /// key and current class; returned classes are applied. All words are
    /// resolved before anything changes. Complements are re-sorted and the
    /// live mapping is rebuilt afterwards. Returns the number relabeled.
    pub fn relabel_complements<F>(&mut self, classes: &[ComplementClass], mut relabel: F) -> Result<usize, FrameError>
    where
        F: FnMut(&str, ComplementClass) -> Option<ComplementClass>,
    {
        let mut plan = Vec::new();
        for (&sentence, analyses) in &self.analyses {
            for (a, analysis) in analyses.iter().enumerate() {
                for (c, complement) in analysis.complements().iter().enumerate() {
                    if !classes.contains(&complement.class()) {
                        continue;
                    }
                    let key = preposition_key(self.word(sentence, complement.root_id())?);
                    if let Some(class) = relabel(&key, complement.class()) {
                        plan.push((sentence, a, c, class));
                    }
                }
            }
        }

        for &(sentence, a, c, class) in &plan {
            let complement = self
                .analyses
                .get_mut(&sentence)
                .and_then(|analyses| analyses.get_mut(a))
                .and_then(|analysis| analysis.complements_mut().get_mut(c));
            if let Some(complement) = complement {
                complement.set_class(class);
            }
        }
        for analysis in self.analyses.values_mut().flatten() {
            analysis.sort_complements();
        }
        self.reset();

        debug!(relabeled = plan.len(), signatures = self.current.len(), "complements relabeled");
        Ok(plan.len())
    }
}

/// Appends each sentence id once per analysis to its signature's bucket.
pub fn build_mapping(analyses: &BTreeMap<SentenceId, Vec<DependencyAnalysis>>) -> SignatureMap {
    let mut mapping = SignatureMap::new();
    for (&sentence, list) in analyses {
        for analysis in list {
            mapping.entry(analysis.signature()).or_insert_with(Vec::new).push(sentence);
        }
    }
    mapping
}

impl fmt::Display for ValencyFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (signature, sentences) in &self.current {
            let ids: Vec<String> = sentences.iter().map(ToString::to_string).collect();
            writeln!(f, "{} ({}): {}", signature.describe(), sentences.len(), ids.join(", "))?;
        }
        Ok(())
    }
}
