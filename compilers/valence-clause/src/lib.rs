pub mod analysis;
pub mod complement;
pub mod decompose;
pub mod error;
pub mod sentence;

pub use analysis::{AnalysisKind, DependencyAnalysis};
pub use complement::Complement;
pub use decompose::{decompose, SUBORDINATE_LABELS};
pub use error::{ClauseError, ConnectorError, InstantiationError};
pub use sentence::Sentence;
