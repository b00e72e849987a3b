use std::fmt;
use valence_protocol::{ComplementClass, WordId};
use valence_tree::Node;

/// A phrase depending on the valence holder, owning the subtree it heads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complement {
    subtree: Node,
    class: ComplementClass,
}

impl Complement {
    pub fn new(subtree: Node, class: ComplementClass) -> Self {
        Self { subtree, class }
    }

    /// Classifies the subtree by the label of its root.
    pub fn classify(subtree: Node) -> Self {
        let class = ComplementClass::from_label(subtree.label());
        Self::new(subtree, class)
    }

    pub fn root_id(&self) -> WordId {
        self.subtree.id()
    }

    pub fn label(&self) -> &str {
        self.subtree.label()
    }

    pub fn class(&self) -> ComplementClass {
        self.class
    }

    pub fn set_class(&mut self, class: ComplementClass) {
        self.class = class;
    }

    pub fn subtree(&self) -> &Node {
        &self.subtree
    }

    pub fn word_ids(&self) -> Vec<WordId> {
        self.subtree.ids()
    }
}

impl fmt::Display for Complement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.root_id(), self.label(), self.class.label())
    }
}
