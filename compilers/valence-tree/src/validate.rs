use crate::error::TreeError;
use crate::node::Node;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::collections::{HashMap, HashSet, VecDeque};
use valence_protocol::{Edge, WordId};

/// Labels that make the root a valid clause head.
pub const SUBJECT_LABELS: [&str; 2] = ["subj", "subjc"];

/// Single-character tokens that are neither letter nor digit.
pub fn punctuation_count<S: AsRef<str>>(tokens: &[S]) -> usize {
    tokens
        .iter()
        .filter(|token| {
            let mut chars = token.as_ref().chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_alphanumeric())
        })
        .count()
}

/// Directed head -> dependent graph over the raw edge list.
#[derive(Debug)]
pub struct EdgeGraph {
    graph: Graph<WordId, String, Directed>,
    index_map: HashMap<WordId, NodeIndex>,
}

impl EdgeGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            index_map: HashMap::new(),
        }
    }

    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.head, edge.dependent, &edge.label);
        }
        graph
    }

    pub fn add_edge(&mut self, head: WordId, dependent: WordId, label: &str) {
        let head_idx = *self.index_map.entry(head).or_insert_with(|| self.graph.add_node(head));
        let dependent_idx = *self
            .index_map
            .entry(dependent)
            .or_insert_with(|| self.graph.add_node(dependent));

        self.graph.add_edge(head_idx, dependent_idx, label.to_string());
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Vertices without an incoming edge, ascending.
    pub fn roots(&self) -> Vec<WordId> {
        let mut roots: Vec<WordId> = self
            .graph
            .node_indices()
            .filter(|idx| {
                self.graph
                    .edges_directed(*idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx])
            .collect();
        roots.sort();
        roots
    }

    /// Dependents of `vertex` with their edge labels, ascending by id.
    pub fn dependents(&self, vertex: WordId) -> Vec<(WordId, &str)> {
        let mut dependents: Vec<(WordId, &str)> = match self.index_map.get(&vertex) {
            Some(idx) => self
                .graph
                .edges(*idx)
                .map(|edge| (self.graph[edge.target()], edge.weight().as_str()))
                .collect(),
            None => Vec::new(),
        };
        dependents.sort_by_key(|(id, _)| *id);
        dependents
    }

    /// Breadth-first walk from `root`. Any vertex reached a second time, or
    /// never reached at all, breaks the tree shape.
    pub fn check_reachability(&self, root: WordId) -> Result<(), TreeError> {
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for (dependent, _) in self.dependents(current) {
                if !visited.insert(dependent) {
                    return Err(TreeError::CycleOrSharedParent { vertex: dependent });
                }
                queue.push_back(dependent);
            }
        }

        if visited.len() < self.vertex_count() {
            let unreached = self
                .graph
                .node_weights()
                .filter(|id| !visited.contains(*id))
                .min()
                .copied();
            if let Some(vertex) = unreached {
                return Err(TreeError::CycleOrSharedParent { vertex });
            }
        }
        Ok(())
    }

    pub fn has_subject_edge(&self, root: WordId) -> bool {
        self.dependents(root)
            .iter()
            .any(|(_, label)| SUBJECT_LABELS.contains(label))
    }

    /// Materializes the subtree below `vertex`. Only valid after
    /// [`check_reachability`](Self::check_reachability) succeeded.
    pub fn build_node(&self, vertex: WordId, label: &str) -> Node {
        let children = self
            .dependents(vertex)
            .into_iter()
            .map(|(dependent, edge_label)| self.build_node(dependent, edge_label))
            .collect();
        Node::with_children(vertex, label, children)
    }
}

impl Default for EdgeGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs every tree check in order and returns the validated graph and its root.
pub fn validate<S: AsRef<str>>(tokens: &[S], edges: &[Edge]) -> Result<(EdgeGraph, WordId), TreeError> {
    if let Some(edge) = edges.iter().find(|edge| edge.label.is_empty()) {
        return Err(TreeError::InvalidLabel {
            head: edge.head,
            dependent: edge.dependent,
        });
    }

    let punctuation = punctuation_count(tokens);
    if tokens.len() != edges.len() + 1 + punctuation {
        return Err(TreeError::EdgeCountMismatch {
            tokens: tokens.len(),
            edges: edges.len(),
            punctuation,
        });
    }

    let graph = EdgeGraph::from_edges(edges);
    let roots = graph.roots();
    let root = match roots.as_slice() {
        [root] => *root,
        _ => return Err(TreeError::RootCount { roots: roots.len() }),
    };

    graph.check_reachability(root)?;

    if !graph.has_subject_edge(root) {
        return Err(TreeError::InvalidRoot { root });
    }

    Ok((graph, root))
}
