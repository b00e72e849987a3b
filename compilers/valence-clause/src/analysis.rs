use crate::complement::Complement;
use std::fmt;
use valence_protocol::{ComplementClass, Signature, WordId};

/// How a clause hangs off its parent clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Main,
    /// Joined by "kon" (optionally via "cj"); the connecting node is the "kon" node.
    Coordinated { connecting_node: WordId },
    /// Introduced by konj/neb/objc/rel/s/subjc; the connecting node is the cut subtree root.
    Subordinate { connecting_node: WordId },
}

impl AnalysisKind {
    pub fn connecting_node(&self) -> Option<WordId> {
        match self {
            AnalysisKind::Main => None,
            AnalysisKind::Coordinated { connecting_node } | AnalysisKind::Subordinate { connecting_node } => {
                Some(*connecting_node)
            }
        }
    }
}

/// Analysis of one clause: its valence holder, the nodes folded into the
/// verb, its complements and the analyses of clauses below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyAnalysis {
    pub(crate) kind: AnalysisKind,
    pub(crate) root: WordId,
    pub(crate) root_label: String,
    pub(crate) valence_holder: WordId,
    pub(crate) lemma: String,
    pub(crate) prefix_nodes: Vec<WordId>,
    pub(crate) prefix_lemmas: Vec<String>,
    pub(crate) auxiliary_nodes: Vec<WordId>,
    pub(crate) complements: Vec<Complement>,
    pub(crate) coordinated: Vec<DependencyAnalysis>,
    pub(crate) subordinate: Vec<DependencyAnalysis>,
    pub(crate) primary: bool,
}

impl DependencyAnalysis {
    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    pub fn connecting_node(&self) -> Option<WordId> {
        self.kind.connecting_node()
    }

    /// Id of the clause's working root.
    pub fn root(&self) -> WordId {
        self.root
    }

    /// Label the working root carried before decomposition.
    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn valence_holder(&self) -> WordId {
        self.valence_holder
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn set_lemma(&mut self, lemma: impl Into<String>) {
        self.lemma = lemma.into();
    }

    /// Separated verb prefixes, in removal order.
    pub fn prefix_nodes(&self) -> &[WordId] {
        &self.prefix_nodes
    }

    pub fn prefix_lemmas(&self) -> &[String] {
        &self.prefix_lemmas
    }

    pub fn set_prefix_lemmas(&mut self, lemmas: Vec<String>) {
        self.prefix_lemmas = lemmas;
    }

    /// The working root followed by every auxiliary except the valence holder.
    pub fn auxiliary_nodes(&self) -> &[WordId] {
        &self.auxiliary_nodes
    }

    pub fn complements(&self) -> &[Complement] {
        &self.complements
    }

    pub fn complements_mut(&mut self) -> &mut [Complement] {
        &mut self.complements
    }

    pub fn complements_of<'a>(
        &'a self,
        classes: &'a [ComplementClass],
    ) -> impl Iterator<Item = &'a Complement> + 'a {
        self.complements.iter().filter(move |c| classes.contains(&c.class()))
    }

    /// Restores the ascending class order after relabeling.
    pub fn sort_complements(&mut self) {
        self.complements.sort_by_key(Complement::class);
    }

    pub fn coordinated(&self) -> &[DependencyAnalysis] {
        &self.coordinated
    }

    pub fn subordinate(&self) -> &[DependencyAnalysis] {
        &self.subordinate
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn set_primary(&mut self, primary: bool) {
        self.primary = primary;
    }

    /// Complement classes in their current order.
    pub fn signature(&self) -> Signature {
        self.complements.iter().map(Complement::class).collect()
    }

    /// Value copy without the coordinated and subordinate analyses.
    pub fn detached_copy(&self) -> Self {
        Self {
            kind: self.kind,
            root: self.root,
            root_label: self.root_label.clone(),
            valence_holder: self.valence_holder,
            lemma: self.lemma.clone(),
            prefix_nodes: self.prefix_nodes.clone(),
            prefix_lemmas: self.prefix_lemmas.clone(),
            auxiliary_nodes: self.auxiliary_nodes.clone(),
            complements: self.complements.clone(),
            coordinated: Vec::new(),
            subordinate: Vec::new(),
            primary: self.primary,
        }
    }

    /// Direct sub-analyses, coordinated first.
    pub fn sub_analyses(&self) -> impl Iterator<Item = &DependencyAnalysis> {
        self.coordinated.iter().chain(self.subordinate.iter())
    }

    pub fn sub_analyses_mut(&mut self) -> impl Iterator<Item = &mut DependencyAnalysis> {
        self.coordinated.iter_mut().chain(self.subordinate.iter_mut())
    }

    /// This analysis and every analysis below it, pre-order.
    pub fn flatten(&self) -> Vec<&DependencyAnalysis> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a DependencyAnalysis>) {
        out.push(self);
        for sub in self.sub_analyses() {
            sub.flatten_into(out);
        }
    }

    /// Applies `f` to this analysis and every analysis below it, pre-order.
    pub fn try_for_each_mut<E>(&mut self, f: &mut impl FnMut(&mut DependencyAnalysis) -> Result<(), E>) -> Result<(), E> {
        f(self)?;
        for sub in self.sub_analyses_mut() {
            sub.try_for_each_mut(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for DependencyAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AnalysisKind::Main => writeln!(f, "main clause")?,
            AnalysisKind::Coordinated { connecting_node } => writeln!(f, "coordinated clause at {}", connecting_node)?,
            AnalysisKind::Subordinate { connecting_node } => writeln!(f, "subordinate clause at {}", connecting_node)?,
        }
        writeln!(
            f,
            "  valence holder: {} ({}){}",
            self.valence_holder,
            self.lemma,
            if self.primary { " *" } else { "" }
        )?;
        for complement in &self.complements {
            writeln!(f, "  {}", complement)?;
        }
        for sub in self.sub_analyses() {
            write!(f, "{}", sub)?;
        }
        Ok(())
    }
}
