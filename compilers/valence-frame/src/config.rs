use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use valence_kmeans::{ClusterConfig, ResetPolicy};
use valence_protocol::ComplementClass;

/// Which analyses of a sentence feed the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameScope {
    /// Only the main clause, and only if its lemma is the verb under study.
    MainClause,
    /// Every clause whose lemma is the verb under study.
    #[default]
    AllClauses,
}

/// One clustering pass and how many of its top clusters survive.
///
/// Clusters are ranked by descending centroid. `keep: Some(k)` keeps the
/// top `k`; `None` keeps everything but the lowest cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSelection {
    pub clusters: usize,
    pub max_tries: usize,
    #[serde(default)]
    pub keep: Option<usize>,
}

impl ClusterSelection {
    pub fn new(clusters: usize, max_tries: usize, keep: Option<usize>) -> Self {
        Self { clusters, max_tries, keep }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.clusters == 0 {
            return Err(AnalysisError::ZeroClusters);
        }
        match self.keep {
            Some(0) => Err(AnalysisError::KeepBelowOne { keep: 0 }),
            Some(keep) if keep >= self.clusters => Err(AnalysisError::KeepNotBelowClusterCount {
                keep,
                clusters: self.clusters,
            }),
            _ => Ok(()),
        }
    }

    /// Number of leading clusters to keep out of `found`.
    pub fn kept_count(&self, found: usize) -> usize {
        match self.keep {
            Some(keep) => found.saturating_sub(self.clusters.saturating_sub(keep)),
            None => found.saturating_sub(1),
        }
    }

    pub fn cluster_config(&self, reset: ResetPolicy) -> ClusterConfig {
        ClusterConfig::new(self.clusters, self.max_tries).with_reset(reset)
    }
}

/// Parameters of the standard refinement pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementConfig {
    pub scope: FrameScope,
    pub adverbial_correction: ClusterSelection,
    pub dropped_classes: Vec<ComplementClass>,
    pub multiplicity_cap: usize,
    pub rare_signature_pruning: ClusterSelection,
    pub reset: ResetPolicy,
    /// Seed for centroid draws; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            scope: FrameScope::AllClauses,
            adverbial_correction: ClusterSelection::new(3, 10, Some(1)),
            dropped_classes: ComplementClass::INTERNAL.to_vec(),
            multiplicity_cap: 2,
            rare_signature_pruning: ClusterSelection::new(4, 10, Some(3)),
            reset: ResetPolicy::Random,
            seed: None,
        }
    }
}
