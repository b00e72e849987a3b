use crate::analysis::{AnalysisKind, DependencyAnalysis};
use crate::complement::Complement;
use tracing::debug;
use valence_protocol::WordId;
use valence_tree::{DependencyTree, Node, ROOT_LABEL};

pub const AUXILIARY_LABEL: &str = "aux";
pub const PREFIX_LABEL: &str = "avz";
pub const COORDINATION_LABEL: &str = "kon";
pub const CONJUNCT_LABEL: &str = "cj";

/// Labels that introduce a subordinate clause.
pub const SUBORDINATE_LABELS: [&str; 6] = ["konj", "neb", "objc", "rel", "s", "subjc"];

/// Decomposes a tree into its clause forest. The tree is consumed; clone it
/// first if it is still needed.
pub fn decompose(tree: DependencyTree) -> DependencyAnalysis {
    decompose_clause(tree.into_root(), AnalysisKind::Main)
}

fn decompose_clause(mut root: Node, kind: AnalysisKind) -> DependencyAnalysis {
    let root_id = root.id();
    let root_label = root.label().to_string();
    root.set_label(ROOT_LABEL);

    // 1. Auxiliaries: the last one removed carries the valence.
    let mut auxiliary_nodes = cut_and_mend(&mut root, AUXILIARY_LABEL);
    let valence_holder = match auxiliary_nodes.pop() {
        Some(last) => {
            auxiliary_nodes.insert(0, root_id);
            last
        }
        None => root_id,
    };

    // 2. Separated verb prefixes
    let prefix_nodes = cut_and_mend(&mut root, PREFIX_LABEL);

    // 3. Coordinated clauses, first level only. The "kon" leaf stays behind.
    let coordinated = root
        .cut_children_labeled(COORDINATION_LABEL)
        .into_iter()
        .map(|kon| {
            let connecting_node = kon.id();
            decompose_clause(promote_conjunct(kon), AnalysisKind::Coordinated { connecting_node })
        })
        .collect();

    // 4. Subordinate clauses, anywhere below the root
    let subordinate = root
        .cut_descendants_labeled(&SUBORDINATE_LABELS)
        .into_iter()
        .map(|clause| {
            let connecting_node = clause.id();
            decompose_clause(clause, AnalysisKind::Subordinate { connecting_node })
        })
        .collect();

    // 5. Whatever hangs off the root now is a complement.
    let mut complements: Vec<Complement> = root
        .into_children()
        .into_iter()
        .map(Complement::classify)
        .collect();
    complements.sort_by_key(Complement::class);

    debug!(
        root = %root_id,
        valence_holder = %valence_holder,
        complements = complements.len(),
        "clause decomposed"
    );

    DependencyAnalysis {
        kind,
        root: root_id,
        root_label,
        valence_holder,
        lemma: String::new(),
        prefix_nodes,
        prefix_lemmas: Vec::new(),
        auxiliary_nodes,
        complements,
        coordinated,
        subordinate,
        primary: false,
    }
}

/// Removes every root child labeled `label`, re-attaching its children to the
/// root, until none is left. Returns the removed ids in removal order.
fn cut_and_mend(root: &mut Node, label: &str) -> Vec<WordId> {
    let mut removed = Vec::new();
    loop {
        let cut = root.cut_children_labeled(label);
        if cut.is_empty() {
            return removed;
        }
        for subtree in cut {
            root.remove_child(subtree.id());
            removed.push(subtree.id());
            root.append_children(subtree.into_children());
        }
    }
}

/// A "kon" node whose only child is a "cj" hands the clause over to that child.
fn promote_conjunct(mut kon: Node) -> Node {
    let single_conjunct = matches!(kon.children(), [only] if only.label() == CONJUNCT_LABEL);
    if single_conjunct {
        if let Some(conjunct) = kon.cut_children_labeled(CONJUNCT_LABEL).pop() {
            return conjunct;
        }
    }
    kon
}
