//! Valency frames: the mapping from complement signature to the sentences
//! producing it, its edits, and the clustering passes that refine it.

pub mod analysis;
pub mod config;
pub mod edit;
pub mod error;
pub mod frame;

pub use analysis::ValencyAnalysis;
pub use config::{ClusterSelection, FrameScope, RefinementConfig};
pub use edit::{cap_multiplicity, filter_classes, ClassFilter, SignatureMap};
pub use error::{AnalysisError, FrameError};
pub use frame::{build_mapping, preposition_key, ValencyFrame};
