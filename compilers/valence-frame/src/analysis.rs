use crate::config::{ClusterSelection, FrameScope, RefinementConfig};
use crate::edit::{self, ClassFilter, SignatureMap};
use crate::error::AnalysisError;
use crate::frame::ValencyFrame;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use tracing::{debug, info, warn};
use valence_clause::{DependencyAnalysis, Sentence};
use valence_kmeans::{cluster_by_value, CentroidSource, Consensus, ResetPolicy};
use valence_protocol::{ComplementClass, Preposition, SentenceId, SentenceRecord, Signature};

/// A batch of sentences analyzed for one verb, and the valency frame built
/// from them.
#[derive(Debug, Clone)]
pub struct ValencyAnalysis {
    verb: String,
    sentences: Vec<Sentence>,
    frame: Option<ValencyFrame>,
}

impl ValencyAnalysis {
    /// Instantiates and analyzes every record. Records that fail validation,
    /// tree construction or lemma resolution are logged and left out, as are
    /// repeated sentence ids.
    pub fn new(records: impl IntoIterator<Item = SentenceRecord>, verb: impl Into<String>) -> Self {
        let verb = verb.into();
        let mut sentences = Vec::new();
        let mut seen = HashSet::new();
        let mut skipped = 0usize;

        for record in records {
            let id = record.id;
            if !seen.insert(id) {
                warn!(sentence = %id, "duplicate sentence id, skipped");
                skipped += 1;
                continue;
            }
            let mut sentence = match Sentence::new(record) {
                Ok(sentence) => sentence,
                Err(err) => {
                    warn!(sentence = %id, error = %err, "sentence rejected");
                    skipped += 1;
                    continue;
                }
            };
            if let Err(err) = sentence.analyze(&verb) {
                warn!(sentence = %id, error = %err, "sentence could not be analyzed");
                skipped += 1;
                continue;
            }
            sentences.push(sentence);
        }

        info!(verb = %verb, analyzed = sentences.len(), skipped, "batch analyzed");
        Self {
            verb,
            sentences,
            frame: None,
        }
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence(&self, id: SentenceId) -> Option<&Sentence> {
        self.sentences.iter().find(|sentence| sentence.id() == id)
    }

    /// Builds a fresh frame from the clauses of the verb under study,
    /// discarding any earlier frame and its edits.
    pub fn initialize_frame(&mut self, scope: FrameScope) -> &ValencyFrame {
        let mut analyses = BTreeMap::new();
        let mut words = HashMap::new();

        for sentence in &self.sentences {
            let selected: Vec<DependencyAnalysis> = match scope {
                FrameScope::MainClause => sentence
                    .main_analysis()
                    .ok()
                    .filter(|analysis| analysis.is_primary())
                    .map(|analysis| vec![analysis.detached_copy()])
                    .unwrap_or_default(),
                FrameScope::AllClauses => sentence
                    .primary_analyses()
                    .map(|primary| primary.into_iter().map(|analysis| analysis.detached_copy()).collect())
                    .unwrap_or_default(),
            };
            if selected.is_empty() {
                continue;
            }

            let record = sentence.record();
            let surface = record.word_ids.iter().copied().zip(record.words.iter().cloned()).collect();
            words.insert(sentence.id(), surface);
            analyses.insert(sentence.id(), selected);
        }

        let frame = ValencyFrame::new(analyses, words);
        info!(
            scope = ?scope,
            sentences = frame.sentence_count(),
            signatures = frame.current().len(),
            "valency frame initialized"
        );
        self.frame.insert(frame)
    }

    pub fn frame(&self) -> Result<&ValencyFrame, AnalysisError> {
        self.frame.as_ref().ok_or(AnalysisError::FrameNotInitialized)
    }

    fn frame_mut(&mut self) -> Result<&mut ValencyFrame, AnalysisError> {
        self.frame.as_mut().ok_or(AnalysisError::FrameNotInitialized)
    }

    /// The live signature mapping.
    pub fn current(&self) -> Result<&SignatureMap, AnalysisError> {
        Ok(self.frame()?.current())
    }

    /// Agreement of the most recent clustering, 0 if none ran.
    pub fn consensus_count(&self) -> usize {
        self.frame.as_ref().map_or(0, ValencyFrame::consensus_count)
    }

    /// Rebuilds the live mapping from the frame's analyses.
    pub fn reset_frame(&mut self) -> Result<(), AnalysisError> {
        self.frame_mut()?.reset();
        Ok(())
    }

    /// Relabels adverbial complements headed by frequent prepositions as
    /// prepositional objects.
    ///
    /// Head words of all adverbial complements are clustered by occurrence
    /// count; adverbials whose head falls into a kept cluster become
    /// prepositional. The live mapping is rebuilt. Returns the number of
    /// complements relabeled.
    pub fn correct_adverbials<S: CentroidSource>(
        &mut self,
        selection: &ClusterSelection,
        reset: ResetPolicy,
        source: &mut S,
    ) -> Result<usize, AnalysisError> {
        selection.validate()?;
        let frame = self.frame_mut()?;

        let counts = frame.head_word_counts(&[ComplementClass::ADVERBIAL])?;
        let consensus = cluster_by_value(counts.into_iter().collect(), &selection.cluster_config(reset), source)?;
        frame.set_consensus_count(consensus.agreement);

        let kept: HashSet<String> = kept_keys(consensus, selection).into_iter().collect();
        debug!(prepositions = ?kept, "prepositions kept as prepositional objects");

        let relabeled = frame.relabel_complements(&[ComplementClass::ADVERBIAL], |key, _| {
            kept.contains(key).then_some(ComplementClass::PREPOSITIONAL)
        })?;
        info!(relabeled, agreement = frame.consensus_count(), "adverbials corrected");
        Ok(relabeled)
    }

    /// Attaches the governing preposition to complements of `classes` whose
    /// head word is a known preposition. Composite classes stay untouched.
    pub fn specify_by_preposition(&mut self, classes: &[ComplementClass]) -> Result<usize, AnalysisError> {
        let frame = self.frame_mut()?;
        let relabeled = frame.relabel_complements(classes, |key, class| {
            Preposition::from_word(key).and_then(|preposition| class.with_preposition(preposition).ok())
        })?;
        info!(relabeled, "complements specified by preposition");
        Ok(relabeled)
    }

    /// Keeps or drops `classes` in every signature of the live mapping.
    pub fn filter_classes(
        &mut self,
        classes: &[ComplementClass],
        filter: ClassFilter,
        simply_delete: bool,
    ) -> Result<(), AnalysisError> {
        let frame = self.frame_mut()?;
        let mapping = edit::filter_classes(frame.current(), classes, filter, simply_delete);
        frame.set_current(mapping)?;
        debug!(?filter, simply_delete, signatures = frame.current().len(), "classes filtered");
        Ok(())
    }

    /// Caps runs of equal classes at `max` in every signature of the live
    /// mapping.
    pub fn cap_multiplicity(&mut self, max: usize, simply_delete: bool) -> Result<(), AnalysisError> {
        let frame = self.frame_mut()?;
        let mapping = edit::cap_multiplicity(frame.current(), max, simply_delete);
        frame.set_current(mapping)?;
        debug!(max, simply_delete, signatures = frame.current().len(), "multiplicity capped");
        Ok(())
    }

    /// Output classes only, at most two of a kind.
    pub fn standard_cleaning(&mut self) -> Result<(), AnalysisError> {
        self.filter_classes(&ComplementClass::OUTPUT, ClassFilter::Keep, false)?;
        self.cap_multiplicity(2, false)
    }

    /// Clusters signatures by bucket size and keeps the signatures of the
    /// kept clusters with their buckets.
    pub fn prune_rare_signatures<S: CentroidSource>(
        &mut self,
        selection: &ClusterSelection,
        reset: ResetPolicy,
        source: &mut S,
    ) -> Result<(), AnalysisError> {
        selection.validate()?;
        let frame = self.frame_mut()?;

        let items: Vec<(Signature, u64)> = frame
            .current()
            .iter()
            .map(|(signature, sentences)| (signature.clone(), sentences.len() as u64))
            .collect();
        let consensus = cluster_by_value(items, &selection.cluster_config(reset), source)?;
        frame.set_consensus_count(consensus.agreement);

        let mapping: SignatureMap = kept_keys(consensus, selection)
            .into_iter()
            .filter_map(|signature| {
                let sentences = frame.current().get(&signature)?.clone();
                Some((signature, sentences))
            })
            .collect();
        frame.set_current(mapping)?;
        info!(
            signatures = frame.current().len(),
            agreement = frame.consensus_count(),
            "rare signatures pruned"
        );
        Ok(())
    }

    /// Fresh frame in `config.scope`, adverbial correction, internal classes
    /// dropped, multiplicity capped, rare signatures pruned.
    pub fn refine<S: CentroidSource>(
        &mut self,
        config: &RefinementConfig,
        source: &mut S,
    ) -> Result<&ValencyFrame, AnalysisError> {
        self.initialize_frame(config.scope);
        self.correct_adverbials(&config.adverbial_correction, config.reset, source)?;
        self.filter_classes(&config.dropped_classes, ClassFilter::Drop, false)?;
        self.cap_multiplicity(config.multiplicity_cap, false)?;
        self.prune_rare_signatures(&config.rare_signature_pruning, config.reset, source)?;
        self.frame()
    }
}

/// Keys of the leading clusters the selection keeps.
fn kept_keys<K>(consensus: Consensus<K>, selection: &ClusterSelection) -> Vec<K> {
    let groups = consensus.clustering.into_key_groups();
    let kept = selection.kept_count(groups.len());
    groups.into_iter().take(kept).flatten().collect()
}

impl fmt::Display for ValencyAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "valency frame of \"{}\"", self.verb)?;
        match &self.frame {
            Some(frame) => write!(f, "{}", frame),
            None => writeln!(f, "  (not initialized)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use valence_kmeans::{ClusterError, RngSource};
    use valence_protocol::{Edge, WordId};

    /// Cycles through fixed draws.
    struct Script {
        draws: Vec<u64>,
        next: usize,
    }

    impl Script {
        fn new(draws: &[u64]) -> Self {
            Self {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl CentroidSource for Script {
        fn draw(&mut self, scale: u64) -> u64 {
            let value = self.draws[self.next % self.draws.len()];
            self.next += 1;
            value.clamp(1, scale.max(1))
        }
    }

    /// "Er kämpft <prep> ihm <prep> ihm ... ." with every phrase a "pp".
    fn fight(id: u32, prepositions: &[&str]) -> SentenceRecord {
        let mut words = vec![("Er", "er"), ("kämpft", "kämpfen")];
        let mut edges = vec![Edge::new(2, 1, "subj")];
        for &preposition in prepositions {
            let head = words.len() as u32 + 1;
            words.push((preposition, preposition));
            words.push(("ihm", "er"));
            edges.push(Edge::new(2, head, "pp"));
            edges.push(Edge::new(head, head + 1, "pn"));
        }
        words.push((".", "."));

        SentenceRecord {
            id: SentenceId(id),
            text: words.iter().map(|(w, _)| *w).collect::<Vec<_>>().join(" "),
            word_ids: (1..=words.len() as u32).map(WordId).collect(),
            words: words.iter().map(|(w, _)| w.to_string()).collect(),
            lemmas: words.iter().map(|(_, l)| l.to_string()).collect(),
            edges,
        }
    }

    fn sig(codes: &[u32]) -> Signature {
        codes.iter().map(|c| ComplementClass::new(*c).unwrap()).collect()
    }

    fn ids(raw: &[u32]) -> Vec<SentenceId> {
        raw.iter().copied().map(SentenceId).collect()
    }

    fn bucket_sizes(analysis: &ValencyAnalysis) -> Vec<usize> {
        let mut sizes: Vec<usize> = analysis.current().unwrap().values().map(Vec::len).collect();
        sizes.sort();
        sizes
    }

    /// Adverbial heads: "mit" six times (once capitalized), "um" twice, "gegen" once.
    fn preposition_corpus() -> Vec<SentenceRecord> {
        vec![
            fight(1, &["mit", "mit"]),
            fight(2, &["mit", "um"]),
            fight(3, &["mit", "um"]),
            fight(4, &["Mit", "gegen"]),
            fight(5, &["mit"]),
        ]
    }

    #[test]
    fn test_frame_buckets() {
        let records = vec![
            fight(1, &["mit", "um"]),
            fight(2, &["mit", "um"]),
            fight(3, &["für", "gegen"]),
            fight(4, &[]),
            fight(5, &[]),
        ];
        let mut analysis = ValencyAnalysis::new(records, "kämpfen");
        analysis.initialize_frame(FrameScope::MainClause);

        assert_eq!(bucket_sizes(&analysis), vec![2, 3]);
        let current = analysis.current().unwrap();
        assert_eq!(current[&sig(&[0, 5, 5])], ids(&[1, 2, 3]));
        assert_eq!(current[&sig(&[0])], ids(&[4, 5]));

        analysis.cap_multiplicity(1, false).unwrap();
        let current = analysis.current().unwrap();
        assert_eq!(current[&sig(&[0, 5])], ids(&[1, 2, 3]));
        assert_eq!(current[&sig(&[0])], ids(&[4, 5]));
        assert_eq!(analysis.consensus_count(), 0);
    }

    #[test]
    fn test_cap_merges_into_existing_signature() {
        let records = vec![fight(1, &["mit", "um"]), fight(2, &["mit"]), fight(3, &["um", "um"])];
        let mut analysis = ValencyAnalysis::new(records, "kämpfen");
        analysis.initialize_frame(FrameScope::AllClauses);

        analysis.cap_multiplicity(1, false).unwrap();
        assert_eq!(analysis.current().unwrap().len(), 1);
        assert_eq!(analysis.current().unwrap()[&sig(&[0, 5])], ids(&[1, 2, 3]));

        analysis.reset_frame().unwrap();
        analysis.cap_multiplicity(1, true).unwrap();
        assert_eq!(analysis.current().unwrap().len(), 1);
        assert_eq!(analysis.current().unwrap()[&sig(&[0, 5])], ids(&[2]));
    }

    #[test]
    fn test_invalid_sentences_are_skipped() {
        let mut no_subject = fight(2, &["mit"]);
        no_subject.edges[0].label = "obja".to_string();
        let mut no_edges = fight(3, &[]);
        no_edges.edges.clear();

        let analysis = ValencyAnalysis::new(vec![fight(1, &[]), no_subject, no_edges, fight(1, &["mit"])], "kämpfen");
        assert_eq!(analysis.sentences().len(), 1);
        assert!(analysis.sentence(SentenceId(1)).is_some());
        assert!(analysis.sentence(SentenceId(2)).is_none());
    }

    #[test]
    fn test_scope_selects_primary_clauses() {
        // Main clause "treten", coordinated clause "kämpfen"
        let record = SentenceRecord {
            id: SentenceId(1),
            text: String::from("Er tritt an und kämpft mit ihm ."),
            word_ids: (1..=8).map(WordId).collect(),
            words: ["Er", "tritt", "an", "und", "kämpft", "mit", "ihm", "."].iter().map(|w| w.to_string()).collect(),
            lemmas: ["er", "treten", "an", "und", "kämpfen", "mit", "er", "."].iter().map(|w| w.to_string()).collect(),
            edges: vec![
                Edge::new(2, 1, "subj"),
                Edge::new(2, 3, "avz"),
                Edge::new(2, 4, "kon"),
                Edge::new(4, 5, "cj"),
                Edge::new(5, 6, "pp"),
                Edge::new(6, 7, "pn"),
            ],
        };
        let mut analysis = ValencyAnalysis::new(vec![record], "kämpfen");

        assert_eq!(analysis.initialize_frame(FrameScope::MainClause).sentence_count(), 0);
        let frame = analysis.initialize_frame(FrameScope::AllClauses);
        assert_eq!(frame.sentence_count(), 1);
        assert_eq!(frame.current()[&sig(&[5])], ids(&[1]));
    }

    #[test]
    fn test_filter_classes() {
        let records = vec![fight(1, &["mit"]), fight(2, &[])];
        let mut analysis = ValencyAnalysis::new(records, "kämpfen");
        analysis.initialize_frame(FrameScope::MainClause);

        analysis
            .filter_classes(&[ComplementClass::ADVERBIAL], ClassFilter::Drop, false)
            .unwrap();
        assert_eq!(analysis.current().unwrap().len(), 1);
        assert_eq!(analysis.current().unwrap()[&sig(&[0])], ids(&[1, 2]));

        // Nothing survives a strict filter that changes every signature
        analysis.reset_frame().unwrap();
        let err = analysis
            .filter_classes(&[ComplementClass::SUBJECT], ClassFilter::Drop, true)
            .unwrap_err();
        assert_eq!(err, AnalysisError::Frame(FrameError::EmptyFrame));
        assert_eq!(analysis.current().unwrap().len(), 2);
    }

    #[test]
    fn test_operations_need_a_frame() {
        let mut analysis = ValencyAnalysis::new(vec![fight(1, &[])], "kämpfen");
        assert_eq!(analysis.current().unwrap_err(), AnalysisError::FrameNotInitialized);
        assert_eq!(analysis.cap_multiplicity(1, false).unwrap_err(), AnalysisError::FrameNotInitialized);
        assert_eq!(analysis.consensus_count(), 0);
        assert!(analysis.to_string().contains("not initialized"));
    }

    #[test]
    fn test_prepositions_are_keyed_by_surface_word() {
        // "im" is lemmatized to "in" but is not itself a listed preposition
        let mut contracted = fight(1, &["im"]);
        contracted.lemmas[2] = String::from("in");
        let mut analysis = ValencyAnalysis::new(vec![contracted, fight(2, &["in"])], "kämpfen");
        analysis.initialize_frame(FrameScope::MainClause);

        let counts = analysis
            .frame()
            .unwrap()
            .head_word_counts(&[ComplementClass::ADVERBIAL])
            .unwrap();
        assert_eq!(counts, BTreeMap::from([(String::from("im"), 1), (String::from("in"), 1)]));

        assert_eq!(analysis.specify_by_preposition(&[ComplementClass::ADVERBIAL]).unwrap(), 1);
        let in_adverbial = ComplementClass::ADVERBIAL
            .with_preposition(Preposition::from_word("in").unwrap())
            .unwrap();
        let current = analysis.current().unwrap();
        assert_eq!(current[&sig(&[0, 5])], ids(&[1]));
        assert_eq!(current[&Signature::new(vec![ComplementClass::SUBJECT, in_adverbial])], ids(&[2]));
    }

    #[test]
    fn test_correct_adverbials() {
        let mut analysis = ValencyAnalysis::new(preposition_corpus(), "kämpfen");
        analysis.initialize_frame(FrameScope::AllClauses);

        let selection = ClusterSelection::new(3, 3, Some(1));
        let relabeled = analysis
            .correct_adverbials(&selection, ResetPolicy::Random, &mut Script::new(&[1, 2, 6]))
            .unwrap();

        assert_eq!(relabeled, 6);
        assert_eq!(analysis.consensus_count(), 2);
        let current = analysis.current().unwrap();
        assert_eq!(current[&sig(&[0, 4, 4])], ids(&[1]));
        assert_eq!(current[&sig(&[0, 4, 5])], ids(&[2, 3, 4]));
        assert_eq!(current[&sig(&[0, 4])], ids(&[5]));
    }

    #[test]
    fn test_correct_adverbials_validation() {
        let mut analysis = ValencyAnalysis::new(preposition_corpus(), "kämpfen");
        let mut source = Script::new(&[1]);

        let selection = ClusterSelection::new(3, 3, Some(1));
        assert_eq!(
            analysis.correct_adverbials(&selection, ResetPolicy::Random, &mut source).unwrap_err(),
            AnalysisError::FrameNotInitialized
        );

        analysis.initialize_frame(FrameScope::AllClauses);
        let before = analysis.current().unwrap().clone();
        for (selection, expected) in [
            (ClusterSelection::new(0, 3, None), AnalysisError::ZeroClusters),
            (ClusterSelection::new(3, 3, Some(0)), AnalysisError::KeepBelowOne { keep: 0 }),
            (
                ClusterSelection::new(3, 3, Some(4)),
                AnalysisError::KeepNotBelowClusterCount { keep: 4, clusters: 3 },
            ),
            (
                ClusterSelection::new(4, 3, Some(1)),
                AnalysisError::Cluster(ClusterError::TooFewObjects { objects: 3, clusters: 4 }),
            ),
            (
                ClusterSelection::new(3, 1, Some(1)),
                AnalysisError::Cluster(ClusterError::InvalidMaxTries(1)),
            ),
        ] {
            let err = analysis.correct_adverbials(&selection, ResetPolicy::Random, &mut source).unwrap_err();
            assert_eq!(err, expected);
        }
        assert_eq!(analysis.current().unwrap(), &before);
    }

    #[test]
    fn test_specify_by_preposition() {
        let mut analysis = ValencyAnalysis::new(preposition_corpus(), "kämpfen");
        analysis.initialize_frame(FrameScope::AllClauses);
        analysis
            .correct_adverbials(&ClusterSelection::new(3, 3, Some(1)), ResetPolicy::Random, &mut Script::new(&[1, 2, 6]))
            .unwrap();

        let with = |class: ComplementClass, word: &str| {
            class.with_preposition(Preposition::from_word(word).unwrap()).unwrap()
        };
        let relabeled = analysis
            .specify_by_preposition(&[ComplementClass::PREPOSITIONAL])
            .unwrap();
        assert_eq!(relabeled, 6);

        let mit = with(ComplementClass::PREPOSITIONAL, "mit");
        let current = analysis.current().unwrap();
        assert_eq!(
            current[&Signature::new(vec![ComplementClass::SUBJECT, mit, mit])],
            ids(&[1])
        );
        assert_eq!(
            current[&Signature::new(vec![ComplementClass::SUBJECT, ComplementClass::ADVERBIAL, mit])],
            ids(&[2, 3, 4])
        );

        // Composite classes are not specified again
        assert_eq!(analysis.specify_by_preposition(&[mit]).unwrap(), 0);
        assert_eq!(analysis.specify_by_preposition(&[ComplementClass::ADVERBIAL]).unwrap(), 3);
        let um = with(ComplementClass::ADVERBIAL, "um");
        let gegen = with(ComplementClass::ADVERBIAL, "gegen");
        let current = analysis.current().unwrap();
        assert_eq!(current[&Signature::sorted([ComplementClass::SUBJECT, mit, um])], ids(&[2, 3]));
        assert_eq!(current[&Signature::sorted([ComplementClass::SUBJECT, mit, gegen])], ids(&[4]));
    }

    #[test]
    fn test_prune_rare_signatures() {
        let records = vec![
            fight(1, &["mit", "um"]),
            fight(2, &["mit", "um"]),
            fight(3, &["für", "gegen"]),
            fight(4, &[]),
            fight(5, &[]),
            fight(6, &["mit"]),
        ];
        let mut analysis = ValencyAnalysis::new(records, "kämpfen");
        analysis.initialize_frame(FrameScope::MainClause);

        // Bucket sizes 3, 2 and 1
        let selection = ClusterSelection::new(3, 4, Some(2));
        analysis
            .prune_rare_signatures(&selection, ResetPolicy::Random, &mut Script::new(&[1, 2, 3]))
            .unwrap();

        assert_eq!(analysis.consensus_count(), 3);
        let current = analysis.current().unwrap();
        assert_eq!(current.len(), 2);
        assert_eq!(current[&sig(&[0, 5, 5])], ids(&[1, 2, 3]));
        assert_eq!(current[&sig(&[0])], ids(&[4, 5]));

        let err = analysis
            .prune_rare_signatures(&ClusterSelection::new(3, 4, None), ResetPolicy::Random, &mut Script::new(&[1]))
            .unwrap_err();
        assert_eq!(err, AnalysisError::Cluster(ClusterError::TooFewObjects { objects: 2, clusters: 3 }));
        assert_eq!(analysis.current().unwrap().len(), 2);
    }

    #[test]
    fn test_standard_cleaning() {
        // "... gegen ihm . und" with a bare coordination leaf on the verb
        let mut record = fight(1, &["mit", "um", "gegen"]);
        record.word_ids.push(WordId(10));
        record.words.push(String::from("und"));
        record.lemmas.push(String::from("und"));
        record.edges.push(Edge::new(2, 10, "kon"));
        let mut analysis = ValencyAnalysis::new(vec![record], "kämpfen");
        analysis.initialize_frame(FrameScope::MainClause);
        assert_eq!(analysis.current().unwrap().keys().next(), Some(&sig(&[0, 5, 5, 5, 10])));

        analysis.standard_cleaning().unwrap();
        assert_eq!(analysis.current().unwrap()[&sig(&[0, 5, 5])], ids(&[1]));
    }

    #[test]
    fn test_refine_pipeline() {
        let config = RefinementConfig {
            adverbial_correction: ClusterSelection::new(2, 3, Some(1)),
            rare_signature_pruning: ClusterSelection::new(2, 3, Some(1)),
            ..RefinementConfig::default()
        };
        let mut analysis = ValencyAnalysis::new(preposition_corpus(), "kämpfen");

        // three correction tries on (.2, .6), then three pruning tries on (.1, .3)
        let mut source = Script::new(&[2, 6, 2, 6, 2, 6, 1, 3, 1, 3, 1, 3]);
        let frame = analysis.refine(&config, &mut source).unwrap();

        assert_eq!(frame.current().len(), 1);
        assert_eq!(frame.current()[&sig(&[0, 4, 5])], ids(&[2, 3, 4]));
        assert_eq!(frame.consensus_count(), 2);
        assert!(analysis.to_string().contains("Ksubj Kprp Kadv (3): 2, 3, 4"));
    }

    #[test]
    fn test_seeded_refine_is_reproducible() {
        let run = |seed: u64| {
            let mut analysis = ValencyAnalysis::new(preposition_corpus(), "kämpfen");
            let config = RefinementConfig {
                adverbial_correction: ClusterSelection::new(2, 5, Some(1)),
                rare_signature_pruning: ClusterSelection::new(2, 5, None),
                ..RefinementConfig::default()
            };
            let mut source = RngSource(StdRng::seed_from_u64(seed));
            let current = analysis.refine(&config, &mut source).map(|frame| frame.current().clone());
            current
        };
        assert_eq!(run(11), run(11));
    }
}
