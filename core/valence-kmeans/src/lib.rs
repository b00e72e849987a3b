//! Scalar k-means over keyed positive integers.
//!
//! Values are normalized by the smallest power of ten covering the maximum,
//! clusters that run empty are recovered by re-seeding the objects farthest
//! from their centroid, and [`cluster_by_value`] picks the result most
//! independent runs agree on.

pub mod clustering;
pub mod config;
pub mod consensus;
pub mod engine;
pub mod error;
pub mod object;
pub mod source;

pub use clustering::{Cluster, Clustering};
pub use config::{ClusterConfig, ResetPolicy};
pub use consensus::{cluster_by_value, Consensus};
pub use engine::{normalization_scale, KMeans};
pub use error::ClusterError;
pub use object::ClusteredObject;
pub use source::{CentroidSource, RngSource};
