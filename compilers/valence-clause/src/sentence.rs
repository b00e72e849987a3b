use crate::analysis::DependencyAnalysis;
use crate::decompose::decompose;
use crate::error::{ClauseError, ConnectorError, InstantiationError};
use std::collections::HashMap;
use tracing::debug;
use valence_protocol::{SentenceId, SentenceRecord, WordId};
use valence_tree::{DependencyTree, TreeError};

#[derive(Debug, Clone)]
enum AnalysisState {
    Pending,
    TreeFailed(TreeError),
    Analyzed {
        tree: DependencyTree,
        analysis: DependencyAnalysis,
    },
}

/// A validated input sentence together with its clause analyses.
#[derive(Debug, Clone)]
pub struct Sentence {
    record: SentenceRecord,
    words: HashMap<WordId, usize>,
    state: AnalysisState,
}

impl Sentence {
    pub fn new(record: SentenceRecord) -> Result<Self, InstantiationError> {
        validate_record(&record)?;
        let words = record
            .word_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();
        Ok(Self {
            record,
            words,
            state: AnalysisState::Pending,
        })
    }

    pub fn id(&self) -> SentenceId {
        self.record.id
    }

    pub fn text(&self) -> &str {
        &self.record.text
    }

    pub fn record(&self) -> &SentenceRecord {
        &self.record
    }

    pub fn word(&self, id: WordId) -> Option<&str> {
        self.words.get(&id).map(|index| self.record.words[*index].as_str())
    }

    pub fn lemma(&self, id: WordId) -> Option<&str> {
        self.words.get(&id).map(|index| self.record.lemmas[*index].as_str())
    }

    /// Builds the tree, decomposes a copy of it and resolves every clause's
    /// lemma. Clauses whose lemma equals `verb` are marked primary.
    pub fn analyze(&mut self, verb: &str) -> Result<(), ClauseError> {
        let tree = match DependencyTree::from_edges(&self.record.words, &self.record.edges) {
            Ok(tree) => tree,
            Err(err) => {
                self.state = AnalysisState::TreeFailed(err.clone());
                return Err(err.into());
            }
        };

        let mut analysis = decompose(tree.clone());
        analysis.try_for_each_mut(&mut |clause| self.resolve_lemma(clause, verb))?;
        debug!(
            sentence = %self.record.id,
            clauses = analysis.flatten().len(),
            "sentence analyzed"
        );

        self.state = AnalysisState::Analyzed { tree, analysis };
        Ok(())
    }

    fn resolve_lemma(&self, clause: &mut DependencyAnalysis, verb: &str) -> Result<(), InstantiationError> {
        let lookup = |word: WordId| {
            self.lemma(word)
                .map(str::to_string)
                .ok_or(InstantiationError::MissingLemma { word })
        };

        let mut lemma = lookup(clause.valence_holder())?;
        let mut prefix_lemmas = Vec::with_capacity(clause.prefix_nodes().len());
        for prefix in clause.prefix_nodes() {
            let prefix_lemma = lookup(*prefix)?;
            lemma.insert_str(0, &prefix_lemma);
            prefix_lemmas.push(prefix_lemma);
        }

        clause.set_primary(lemma == verb);
        clause.set_lemma(lemma);
        clause.set_prefix_lemmas(prefix_lemmas);
        Ok(())
    }

    fn analyzed(&self) -> Result<(&DependencyTree, &DependencyAnalysis), ConnectorError> {
        match &self.state {
            AnalysisState::Analyzed { tree, analysis } => Ok((tree, analysis)),
            AnalysisState::TreeFailed(_) => Err(ConnectorError::TreeUnavailable { sentence: self.id() }),
            AnalysisState::Pending => Err(ConnectorError::NoAnalysis { sentence: self.id() }),
        }
    }

    pub fn is_analyzed(&self) -> bool {
        matches!(self.state, AnalysisState::Analyzed { .. })
    }

    /// The tree error from the last `analyze` call, if it failed there.
    pub fn tree_error(&self) -> Option<&TreeError> {
        match &self.state {
            AnalysisState::TreeFailed(err) => Some(err),
            _ => None,
        }
    }

    /// The untouched tree the analyses were decomposed from.
    pub fn dependency_tree(&self) -> Result<&DependencyTree, ConnectorError> {
        self.analyzed().map(|(tree, _)| tree)
    }

    pub fn main_analysis(&self) -> Result<&DependencyAnalysis, ConnectorError> {
        self.analyzed().map(|(_, analysis)| analysis)
    }

    pub fn main_analysis_mut(&mut self) -> Result<&mut DependencyAnalysis, ConnectorError> {
        let sentence = self.id();
        match &mut self.state {
            AnalysisState::Analyzed { analysis, .. } => Ok(analysis),
            AnalysisState::TreeFailed(_) => Err(ConnectorError::TreeUnavailable { sentence }),
            AnalysisState::Pending => Err(ConnectorError::NoAnalysis { sentence }),
        }
    }

    /// Main clause first, then every sub-clause in pre-order.
    pub fn analyses(&self) -> Result<Vec<&DependencyAnalysis>, ConnectorError> {
        Ok(self.main_analysis()?.flatten())
    }

    pub fn primary_analyses(&self) -> Result<Vec<&DependencyAnalysis>, ConnectorError> {
        let mut analyses = self.analyses()?;
        analyses.retain(|analysis| analysis.is_primary());
        Ok(analyses)
    }

    /// First sub-clause that was cut off at `node`.
    pub fn analysis_by_connecting_node(&self, node: WordId) -> Result<Option<&DependencyAnalysis>, ConnectorError> {
        Ok(self
            .analyses()?
            .into_iter()
            .skip(1)
            .find(|analysis| analysis.connecting_node() == Some(node)))
    }
}

fn validate_record(record: &SentenceRecord) -> Result<(), InstantiationError> {
    if record.id.get() == 0 {
        return Err(InstantiationError::InvalidSentenceId);
    }
    if record.word_ids.is_empty() {
        return Err(InstantiationError::EmptyWordIds);
    }
    if record.words.len() != record.word_ids.len() {
        return Err(InstantiationError::MisalignedWords {
            word_ids: record.word_ids.len(),
            words: record.words.len(),
        });
    }
    if record.edges.is_empty() {
        return Err(InstantiationError::EmptyEdges);
    }
    for (index, edge) in record.edges.iter().enumerate() {
        if edge.head.get() == 0 || edge.dependent.get() == 0 {
            return Err(InstantiationError::InvalidEdgeVertex {
                index,
                head: edge.head,
                dependent: edge.dependent,
            });
        }
        // Letters only: numbered labels such as "obja2" are rejected, not normalized.
        if edge.label.is_empty() || !edge.label.chars().all(char::is_alphabetic) {
            return Err(InstantiationError::InvalidEdgeLabel { index });
        }
    }
    if record.lemmas.is_empty() {
        return Err(InstantiationError::EmptyLemmas);
    }
    if record.lemmas.len() != record.word_ids.len() {
        return Err(InstantiationError::MisalignedLemmas {
            word_ids: record.word_ids.len(),
            lemmas: record.lemmas.len(),
        });
    }
    Ok(())
}
