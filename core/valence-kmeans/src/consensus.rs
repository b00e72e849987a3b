use crate::clustering::Clustering;
use crate::config::ClusterConfig;
use crate::engine::KMeans;
use crate::error::{ClusterError, Result};
use crate::source::CentroidSource;
use tracing::debug;

/// The clustering that agreed with the most other tries.
#[derive(Debug, Clone, PartialEq)]
pub struct Consensus<K> {
    pub clustering: Clustering<K>,
    /// Number of other tries producing the identical clustering.
    pub agreement: usize,
    pub tries: usize,
}

/// Clusters `items` by value `config.max_tries` times and returns the result
/// most tries agree on. The earliest try wins among equally supported ones.
/// A try that hits `config.max_iterations` fails the whole consensus with
/// [`ClusterError::DidNotConverge`].
pub fn cluster_by_value<K, S>(items: Vec<(K, u64)>, config: &ClusterConfig, source: &mut S) -> Result<Consensus<K>>
where
    K: Clone + Ord,
    S: CentroidSource,
{
    if config.max_tries <= 1 {
        return Err(ClusterError::InvalidMaxTries(config.max_tries));
    }

    let engine = KMeans::new(items, *config)?;
    let mut results = Vec::with_capacity(config.max_tries);
    for attempt in 0..config.max_tries {
        let clustering = engine.run(source)?;
        debug!(attempt, clusters = clustering.len(), "k-means try finished");
        results.push(clustering);
    }

    let mut best: Option<(usize, usize)> = None;
    for (i, candidate) in results.iter().enumerate() {
        let agreement = results
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && candidate.same_partition(other))
            .count();
        if best.map_or(true, |(_, count)| agreement > count) {
            best = Some((i, agreement));
        }
    }

    match best {
        Some((index, agreement)) if agreement > 0 => {
            debug!(agreement, tries = config.max_tries, "k-means consensus reached");
            let clustering = results.swap_remove(index);
            Ok(Consensus {
                clustering,
                agreement,
                tries: config.max_tries,
            })
        }
        _ => Err(ClusterError::NoConclusiveResult {
            tries: config.max_tries,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RngSource, ScriptedSource};
    use proptest::prelude::*;

    fn five_values() -> Vec<(&'static str, u64)> {
        vec![("a", 1), ("b", 2), ("c", 5), ("d", 8), ("e", 9)]
    }

    #[test]
    fn test_max_tries_must_exceed_one() {
        let mut source = RngSource::seeded(1);
        for tries in [0, 1] {
            let err = cluster_by_value(five_values(), &ClusterConfig::new(3, tries), &mut source).unwrap_err();
            assert_eq!(err, ClusterError::InvalidMaxTries(tries));
        }
    }

    #[test]
    fn test_pairwise_distinct_tries_are_inconclusive() {
        // Three initial centroid sets that settle into three different partitions
        let mut source = ScriptedSource::new(vec![1, 2, 7, 1, 5, 9, 3, 8, 9]);
        let err = cluster_by_value(five_values(), &ClusterConfig::new(3, 3), &mut source).unwrap_err();
        assert_eq!(err, ClusterError::NoConclusiveResult { tries: 3 });
    }

    #[test]
    fn test_two_agreeing_tries_win() {
        let mut source = ScriptedSource::new(vec![1, 2, 7, 3, 8, 9, 1, 2, 7]);
        let consensus = cluster_by_value(five_values(), &ClusterConfig::new(3, 3), &mut source).unwrap();

        assert_eq!(consensus.agreement, 1);
        assert_eq!(consensus.tries, 3);
        assert_eq!(
            consensus.clustering.into_key_groups(),
            vec![vec!["e", "d", "c"], vec!["b"], vec!["a"]]
        );
    }

    #[test]
    fn test_non_converging_try_aborts_consensus() {
        let mut config = ClusterConfig::new(2, 3);
        config.max_iterations = 1;
        let mut source = ScriptedSource::new(vec![1, 9]);

        let err = cluster_by_value(vec![("a", 1), ("b", 2), ("c", 9)], &config, &mut source).unwrap_err();
        assert_eq!(err, ClusterError::DidNotConverge { iterations: 1 });
    }

    #[test]
    fn test_setup_errors_propagate() {
        let mut source = RngSource::seeded(3);
        let err = cluster_by_value(vec![("a", 1), ("b", 1)], &ClusterConfig::new(2, 2), &mut source).unwrap_err();
        assert_eq!(err, ClusterError::TooFewValues { distinct: 1, clusters: 2 });
    }

    proptest! {
        #[test]
        fn test_fixed_seed_is_deterministic(
            values in prop::collection::vec(1u64..500, 3..24),
            seed in any::<u64>(),
        ) {
            let items: Vec<(usize, u64)> = values.iter().copied().enumerate().collect();
            let config = ClusterConfig::new(2, 4);

            let first = cluster_by_value(items.clone(), &config, &mut RngSource::seeded(seed));
            let second = cluster_by_value(items, &config, &mut RngSource::seeded(seed));
            prop_assert_eq!(&first, &second);

            if let Ok(consensus) = first {
                let mut keys: Vec<usize> = consensus.clustering.into_key_groups().into_iter().flatten().collect();
                keys.sort_unstable();
                prop_assert_eq!(keys, (0..values.len()).collect::<Vec<_>>());
            }
        }
    }
}
