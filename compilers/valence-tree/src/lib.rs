pub mod error;
pub mod node;
pub mod tree;
pub mod validate;

pub use error::TreeError;
pub use node::Node;
pub use tree::{DependencyTree, ROOT_LABEL};
pub use validate::{punctuation_count, validate, EdgeGraph, SUBJECT_LABELS};
