use std::mem;
use valence_protocol::WordId;

/// A labeled tree vertex owning its children, which are kept sorted by id.
///
/// The label is the grammatical role of the incoming edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: WordId,
    label: String,
    children: Vec<Node>,
}

impl Node {
    pub fn new(id: WordId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(id: WordId, label: impl Into<String>, children: Vec<Node>) -> Self {
        let mut node = Self::new(id, label);
        node.append_children(children);
        node
    }

    pub fn id(&self) -> WordId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Detaches this node's subtree into a new node with the same id and label.
    /// `self` stays where it is, childless.
    pub fn cut(&mut self) -> Node {
        Node {
            id: self.id,
            label: self.label.clone(),
            children: mem::take(&mut self.children),
        }
    }

    /// Cuts every direct child labeled `label` and returns the detached
    /// subtrees in id order. The childless originals stay in place.
    pub fn cut_children_labeled(&mut self, label: &str) -> Vec<Node> {
        self.children
            .iter_mut()
            .filter(|child| child.label == label)
            .map(Node::cut)
            .collect()
    }

    /// Cuts, along every branch below `self`, the first node whose label is in
    /// `labels`. Matches of one level come before those found deeper.
    pub fn cut_descendants_labeled(&mut self, labels: &[&str]) -> Vec<Node> {
        let mut cut: Vec<Node> = self
            .children
            .iter_mut()
            .filter(|child| labels.contains(&child.label.as_str()))
            .map(Node::cut)
            .collect();
        for child in self.children.iter_mut() {
            if !labels.contains(&child.label.as_str()) {
                cut.extend(child.cut_descendants_labeled(labels));
            }
        }
        cut
    }

    /// Removes the direct child with `id`.
    pub fn remove_child(&mut self, id: WordId) -> Option<Node> {
        let position = self.children.iter().position(|child| child.id == id)?;
        Some(self.children.remove(position))
    }

    /// Adds children, keeping the ascending id order.
    pub fn append_children(&mut self, children: Vec<Node>) {
        self.children.extend(children);
        self.children.sort_by_key(Node::id);
    }

    pub fn find(&self, id: WordId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Ids of the whole subtree, pre-order.
    pub fn ids(&self) -> Vec<WordId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<WordId>) {
        ids.push(self.id);
        for child in &self.children {
            child.collect_ids(ids);
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: u32, label: &str) -> Node {
        Node::new(WordId(id), label)
    }

    #[test]
    fn test_children_stay_sorted() {
        let node = Node::with_children(WordId(2), "root", vec![leaf(5, "obja"), leaf(1, "subj"), leaf(3, "adv")]);
        let ids: Vec<u32> = node.children().iter().map(|c| c.id().get()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_cut_leaves_childless_original() {
        let mut node = Node::with_children(WordId(4), "obja", vec![leaf(3, "det"), leaf(5, "gmod")]);
        let cut = node.cut();

        assert_eq!(cut.id(), WordId(4));
        assert_eq!(cut.label(), "obja");
        assert_eq!(cut.node_count(), 3);
        assert!(node.is_leaf());
        assert_eq!(node.id(), WordId(4));
    }

    #[test]
    fn test_cut_children_labeled() {
        let mut root = Node::with_children(
            WordId(3),
            "root",
            vec![
                Node::with_children(WordId(2), "aux", vec![leaf(1, "adv")]),
                leaf(4, "subj"),
                leaf(6, "aux"),
            ],
        );
        let cut = root.cut_children_labeled("aux");

        assert_eq!(cut.iter().map(Node::id).collect::<Vec<_>>(), vec![WordId(2), WordId(6)]);
        assert_eq!(cut[0].children().len(), 1);
        // Originals stay as childless placeholders
        assert_eq!(root.children().len(), 3);
        assert!(root.find(WordId(1)).is_none());
    }

    #[test]
    fn test_cut_descendants_stops_at_first_match() {
        // 2 -> {1 neb -> {0 rel}, 4 obja -> {5 rel -> {6 s}}}
        let mut root = Node::with_children(
            WordId(2),
            "root",
            vec![
                Node::with_children(WordId(1), "neb", vec![leaf(0, "rel")]),
                Node::with_children(
                    WordId(4),
                    "obja",
                    vec![Node::with_children(WordId(5), "rel", vec![leaf(6, "s")])],
                ),
            ],
        );
        let cut = root.cut_descendants_labeled(&["neb", "rel", "s"]);

        assert_eq!(cut.iter().map(Node::id).collect::<Vec<_>>(), vec![WordId(1), WordId(5)]);
        assert_eq!(cut[0].node_count(), 2);
        assert_eq!(cut[1].node_count(), 2);
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_remove_and_find() {
        let mut root = Node::with_children(WordId(2), "root", vec![leaf(1, "subj"), leaf(3, "obja")]);
        assert_eq!(root.remove_child(WordId(3)).map(|n| n.id()), Some(WordId(3)));
        assert!(root.remove_child(WordId(3)).is_none());
        assert_eq!(root.find(WordId(1)).map(Node::label), Some("subj"));
        assert_eq!(root.ids(), vec![WordId(2), WordId(1)]);
    }
}
