use crate::error::TreeError;
use crate::node::Node;
use crate::validate::validate;
use tracing::trace;
use valence_protocol::{Edge, WordId};

/// Label given to the tree root, which has no incoming edge.
pub const ROOT_LABEL: &str = "root";

/// A validated dependency tree. `Clone` is a full deep copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    root: Node,
}

impl DependencyTree {
    /// Validates `edges` against `tokens` and builds the tree from the root.
    pub fn from_edges<S: AsRef<str>>(tokens: &[S], edges: &[Edge]) -> Result<Self, TreeError> {
        let (graph, root) = validate(tokens, edges)?;
        let root = graph.build_node(root, ROOT_LABEL);
        trace!(root = %root.id(), nodes = root.node_count(), "dependency tree built");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> WordId {
        self.root.id()
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn find(&self, id: WordId) -> Option<&Node> {
        self.root.find(id)
    }
}
