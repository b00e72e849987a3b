use crate::object::ClusteredObject;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<K> {
    centroid: f64,
    members: Vec<ClusteredObject<K>>,
}

impl<K> Cluster<K> {
    pub fn centroid(&self) -> f64 {
        self.centroid
    }

    /// Members, ordered by key descending.
    pub fn members(&self) -> &[ClusteredObject<K>] {
        &self.members
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.members.iter().map(ClusteredObject::key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Objects grouped by identical centroid.
///
/// Clusters are ordered by centroid descending, members by key descending, so
/// two clusterings of the same objects compare equal exactly when every
/// object has the same key, value and centroid in both.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering<K> {
    clusters: Vec<Cluster<K>>,
}

impl<K: Ord> Clustering<K> {
    pub fn from_objects(mut objects: Vec<ClusteredObject<K>>) -> Self {
        objects.sort_by(|a, b| {
            b.centroid()
                .total_cmp(&a.centroid())
                .then_with(|| b.key().cmp(a.key()))
        });

        let mut clusters: Vec<Cluster<K>> = Vec::new();
        for object in objects {
            match clusters.last_mut() {
                Some(cluster) if cluster.centroid.total_cmp(&object.centroid()) == Ordering::Equal => {
                    cluster.members.push(object);
                }
                _ => clusters.push(Cluster {
                    centroid: object.centroid(),
                    members: vec![object],
                }),
            }
        }
        Self { clusters }
    }

    /// Moves every member onto the arithmetic mean of its cluster. Clusters
    /// whose means coincide are merged.
    pub(crate) fn recompute(self) -> Self {
        let mut objects = Vec::new();
        for cluster in self.clusters {
            let sum: f64 = cluster.members.iter().map(ClusteredObject::value).sum();
            let mean = sum / cluster.members.len() as f64;
            for mut member in cluster.members {
                member.set_centroid(mean);
                objects.push(member);
            }
        }
        Self::from_objects(objects)
    }
}

impl<K> Clustering<K> {
    pub fn clusters(&self) -> &[Cluster<K>] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn centroids(&self) -> Vec<f64> {
        self.clusters.iter().map(|c| c.centroid).collect()
    }

    pub fn same_partition(&self, other: &Self) -> bool
    where
        K: PartialEq,
    {
        self == other
    }

    /// All objects, cluster by cluster in the clustering's order.
    pub fn into_objects(self) -> Vec<ClusteredObject<K>> {
        self.clusters.into_iter().flat_map(|c| c.members).collect()
    }

    /// Keys per cluster, highest centroid first.
    pub fn into_key_groups(self) -> Vec<Vec<K>> {
        self.clusters
            .into_iter()
            .map(|c| c.members.into_iter().map(ClusteredObject::into_key).collect())
            .collect()
    }
}
