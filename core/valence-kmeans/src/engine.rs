use crate::clustering::Clustering;
use crate::config::{ClusterConfig, ResetPolicy};
use crate::error::{ClusterError, Result};
use crate::object::ClusteredObject;
use crate::source::CentroidSource;
use std::collections::BTreeSet;
use tracing::trace;

/// A validated, normalized object set ready for any number of k-means runs.
#[derive(Debug, Clone)]
pub struct KMeans<K> {
    objects: Vec<ClusteredObject<K>>,
    scale: u64,
    config: ClusterConfig,
}

/// Smallest power of ten that is >= `max`.
pub fn normalization_scale(max: u64) -> u64 {
    let mut scale: u64 = 1;
    while scale < max {
        match scale.checked_mul(10) {
            Some(next) => scale = next,
            None => return u64::MAX,
        }
    }
    scale
}

impl<K: Clone + Ord> KMeans<K> {
    pub fn new(items: Vec<(K, u64)>, config: ClusterConfig) -> Result<Self> {
        let clusters = config.cluster_quantity;
        if clusters == 0 {
            return Err(ClusterError::ZeroClusters);
        }
        if items.len() < clusters {
            return Err(ClusterError::TooFewObjects {
                objects: items.len(),
                clusters,
            });
        }

        let distinct: BTreeSet<u64> = items.iter().map(|(_, value)| *value).collect();
        if distinct.len() < clusters {
            return Err(ClusterError::TooFewValues {
                distinct: distinct.len(),
                clusters,
            });
        }

        let mut keys = BTreeSet::new();
        for (index, (key, _)) in items.iter().enumerate() {
            if !keys.insert(key) {
                return Err(ClusterError::DuplicateKey { index });
            }
        }

        if let Some((index, (_, value))) = items.iter().enumerate().find(|(_, (_, value))| *value < 1) {
            return Err(ClusterError::ValueBelowOne { index, value: *value });
        }

        let scale = normalization_scale(distinct.iter().next_back().copied().unwrap_or(1));
        let mut objects: Vec<_> = items
            .into_iter()
            .map(|(key, value)| ClusteredObject::new(key, value, scale))
            .collect();
        objects.sort_by(|a, b| b.key().cmp(a.key()));

        Ok(Self { objects, scale, config })
    }

    pub fn scale(&self) -> u64 {
        self.scale
    }

    pub fn objects(&self) -> &[ClusteredObject<K>] {
        &self.objects
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// One full k-means run: fresh random centroids, then assign, recover,
    /// recompute and recover again until the partition stops changing.
    pub fn run<S: CentroidSource>(&self, source: &mut S) -> Result<Clustering<K>> {
        let mut centroids: Vec<f64> = (0..self.config.cluster_quantity)
            .map(|_| self.draw(source))
            .collect();
        centroids.sort_by(f64::total_cmp);

        let mut objects = self.objects.clone();
        for iteration in 0..self.config.max_iterations {
            let before = Clustering::from_objects(objects.clone());

            assign(&mut objects, &centroids);
            let clustering = self.recover(Clustering::from_objects(objects), source)?;
            let clustering = self.recover(clustering.recompute(), source)?;

            centroids = clustering.centroids();
            trace!(iteration, clusters = clustering.len(), "k-means iteration");

            if before.same_partition(&clustering) {
                return Ok(clustering);
            }
            objects = clustering.into_objects();
        }

        Err(ClusterError::DidNotConverge {
            iterations: self.config.max_iterations,
        })
    }

    /// Re-seeds the centroids of the objects farthest from their centroid
    /// until as many clusters could exist as configured.
    fn recover<S: CentroidSource>(&self, clustering: Clustering<K>, source: &mut S) -> Result<Clustering<K>> {
        let capacity = self.config.cluster_quantity;
        let present = clustering.len();
        if present > capacity {
            return Err(ClusterError::RecoveryInconsistency {
                clusters: present,
                capacity,
            });
        }
        if present == capacity {
            return Ok(clustering);
        }

        let deficit = capacity - present;
        let mut objects = clustering.into_objects();
        objects.sort_by(|a, b| b.distance().total_cmp(&a.distance()));
        for object in objects.iter_mut().take(deficit) {
            let centroid = match self.config.reset {
                ResetPolicy::Random => self.draw(source),
                ResetPolicy::OwnValue => object.value(),
            };
            object.set_centroid(centroid);
        }
        Ok(Clustering::from_objects(objects))
    }

    fn draw<S: CentroidSource>(&self, source: &mut S) -> f64 {
        source.draw(self.scale) as f64 / self.scale as f64
    }
}

/// Moves every object onto its nearest centroid; ties go to the earlier one.
fn assign<K>(objects: &mut [ClusteredObject<K>], centroids: &[f64]) {
    for object in objects.iter_mut() {
        let mut best: Option<(f64, f64)> = None;
        for &centroid in centroids {
            let distance = (centroid - object.value()).abs();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((centroid, distance));
            }
        }
        if let Some((centroid, _)) = best {
            object.set_centroid(centroid);
        }
    }
}
