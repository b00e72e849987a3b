#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an object's centroid is re-seeded when clusters went empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResetPolicy {
    /// Fresh draw from the same range as the initial centroids.
    #[default]
    Random,
    /// The object's own normalized value.
    OwnValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusterConfig {
    pub cluster_quantity: usize,
    /// Independent runs compared for consensus; must be > 1.
    pub max_tries: usize,
    pub reset: ResetPolicy,
    /// Ceiling on assign/recompute rounds of a single run.
    pub max_iterations: usize,
}

impl ClusterConfig {
    pub fn new(cluster_quantity: usize, max_tries: usize) -> Self {
        Self {
            cluster_quantity,
            max_tries,
            ..Self::default()
        }
    }

    pub fn with_reset(mut self, reset: ResetPolicy) -> Self {
        self.reset = reset;
        self
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cluster_quantity: 3,
            max_tries: 10,
            reset: ResetPolicy::Random,
            max_iterations: 1000,
        }
    }
}
