//! Dependency graphs.

use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

use petgraph::graph::{node_index, DiGraph, NodeIndices, NodeWeightsMut};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::GraphError;
use crate::label::{Dep2Label, DepLabel, SrlLabel};
use crate::token::Token;

/// Dependency graph node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Root node.
    Root,

    /// Token node.
    Token(Token),
}

impl Node {
    pub fn is_root(&self) -> bool {
        !self.is_token()
    }

    pub fn is_token(&self) -> bool {
        match self {
            Node::Root => false,
            Node::Token(_) => true,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Root => None,
            Node::Token(token) => Some(token),
        }
    }

    pub fn token_mut(&mut self) -> Option<&mut Token> {
        match self {
            Node::Root => None,
            Node::Token(token) => Some(token),
        }
    }
}

/// A dependency triple.
///
/// A dependency triple consists of: a head index; a dependent index; and
/// an optional label.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct DepTriple<L> {
    head: usize,
    dependent: usize,
    relation: Option<L>,
}

impl<L> DepTriple<L> {
    /// Construct a new dependency triple.
    pub fn new(head: usize, relation: Option<L>, dependent: usize) -> Self {
        DepTriple {
            head,
            dependent,
            relation,
        }
    }

    /// Get the dependent.
    pub fn dependent(&self) -> usize {
        self.dependent
    }

    /// Get the head.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Get the label.
    pub fn relation(&self) -> Option<&L> {
        self.relation.as_ref()
    }
}

/// Dependency edge.
///
/// Primary arcs form the dependency tree proper. Secondary and semantic
/// arcs are extra edges on top of it; they may form arbitrary DAG edges.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Arc {
    Primary(Option<DepLabel>),
    Secondary(Dep2Label),
    Semantic(SrlLabel),
}

impl Arc {
    pub fn is_primary(&self) -> bool {
        matches!(self, Arc::Primary(_))
    }

    pub fn is_secondary(&self) -> bool {
        matches!(self, Arc::Secondary(_))
    }

    pub fn is_semantic(&self) -> bool {
        matches!(self, Arc::Semantic(_))
    }
}

/// A dependency sentence.
///
/// `Sentence` stores a dependency graph over tokens, with a synthetic
/// root node at index 0. This data structure is a thin wrapper around the
/// `petgraph` `DiGraph` data structure that enforces invariants such as
/// single-headedness of primary arcs. The `into_inner`/`get_ref` methods
/// can be used to unwrap or get a reference to the wrapped graph.
#[derive(Clone, Debug)]
pub struct Sentence {
    graph: DiGraph<Node, Arc>,
}

#[allow(clippy::len_without_is_empty)]
impl Sentence {
    /// Construct a new sentence.
    ///
    /// The sentence will be constructed such that the first node is the
    /// root of the dependency graph:
    ///
    /// ```
    /// use depgraph::graph::{Node, Sentence};
    ///
    /// let sentence = Sentence::new();
    /// assert_eq!(sentence[0], Node::Root);
    /// ```
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        graph.add_node(Node::Root);
        Sentence { graph }
    }

    /// Get a reference to the `DiGraph` of the sentence.
    pub fn get_ref(&self) -> &DiGraph<Node, Arc> {
        &self.graph
    }

    /// Unwrap the `DiGraph` of the sentence.
    pub fn into_inner(self) -> DiGraph<Node, Arc> {
        self.graph
    }

    /// Get an iterator over the nodes in the graph.
    pub fn iter(&self) -> Iter {
        Iter {
            inner: self.graph.node_indices(),
            graph: &self.graph,
        }
    }

    /// Get a mutable iterator over the nodes in the graph.
    pub fn iter_mut(&mut self) -> IterMut {
        IterMut(self.graph.node_weights_mut())
    }

    /// Add a new token to the graph.
    ///
    /// Tokens should always be pushed in sentence order.
    ///
    /// Returns the index of the token. The first pushed token has index 1,
    /// since index 0 is reserved by the root of the graph.
    pub fn push(&mut self, token: Token) -> usize {
        self.graph.add_node(Node::Token(token)).index()
    }

    /// Get the primary dependency graph.
    pub fn dep_graph(&self) -> DepGraph {
        DepGraph { inner: &self.graph }
    }

    /// Get the primary dependency graph mutably.
    pub fn dep_graph_mut(&mut self) -> DepGraphMut {
        DepGraphMut {
            inner: &mut self.graph,
        }
    }

    /// Get the number of nodes in the dependency graph.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    fn check_bounds(&self, head: usize, dependent: usize) -> Result<(), GraphError> {
        if head >= self.len() {
            return Err(GraphError::HeadOutOfBounds {
                head,
                node_count: self.len(),
            });
        }

        if dependent >= self.len() {
            return Err(GraphError::DependentOutOfBounds {
                dependent,
                node_count: self.len(),
            });
        }

        Ok(())
    }

    /// Add a secondary arc from `head` to `dependent`.
    pub fn add_secondary(
        &mut self,
        head: usize,
        dependent: usize,
        label: Dep2Label,
    ) -> Result<(), GraphError> {
        self.check_bounds(head, dependent)?;

        self.graph.add_edge(
            node_index(head),
            node_index(dependent),
            Arc::Secondary(label),
        );

        Ok(())
    }

    /// Get the secondary heads of `dependent`, ordered by head index and
    /// label.
    pub fn secondary_heads(&self, dependent: usize) -> Vec<DepTriple<Dep2Label>> {
        let mut heads: Vec<_> = self
            .graph
            .edges_directed(node_index(dependent), Direction::Incoming)
            .filter_map(|e| match e.weight() {
                Arc::Secondary(label) => {
                    Some(DepTriple::new(e.source().index(), Some(*label), dependent))
                }
                _ => None,
            })
            .collect();
        heads.sort();
        heads
    }

    pub fn has_secondary(&self, head: usize, dependent: usize, label: Dep2Label) -> bool {
        self.secondary_heads(dependent)
            .iter()
            .any(|t| t.head() == head && t.relation() == Some(&label))
    }

    /// Add a semantic arc from the predicate `head` to `dependent`.
    pub fn add_semantic(
        &mut self,
        head: usize,
        dependent: usize,
        label: SrlLabel,
    ) -> Result<(), GraphError> {
        self.check_bounds(head, dependent)?;

        self.graph.add_edge(
            node_index(head),
            node_index(dependent),
            Arc::Semantic(label),
        );

        Ok(())
    }

    /// Get the semantic heads of `dependent`, ordered by head index and
    /// label.
    pub fn semantic_heads(&self, dependent: usize) -> Vec<DepTriple<SrlLabel>> {
        let mut heads: Vec<_> = self
            .graph
            .edges_directed(node_index(dependent), Direction::Incoming)
            .filter_map(|e| match e.weight() {
                Arc::Semantic(label) => Some(DepTriple::new(
                    e.source().index(),
                    Some(label.clone()),
                    dependent,
                )),
                _ => None,
            })
            .collect();
        heads.sort();
        heads
    }

    /// Whether `dependent` is an argument of the predicate `head`.
    pub fn is_semantic_argument_of(&self, head: usize, dependent: usize) -> bool {
        self.semantic_heads(dependent)
            .iter()
            .any(|t| t.head() == head)
    }

    /// Whether `dependent` is an argument of the predicate `head` with the
    /// given label.
    pub fn is_semantic_argument_with(
        &self,
        head: usize,
        dependent: usize,
        label: &SrlLabel,
    ) -> bool {
        self.semantic_heads(dependent)
            .iter()
            .any(|t| t.head() == head && t.relation() == Some(label))
    }

    /// Remove one semantic arc from `head` to `dependent` with the given
    /// label.
    ///
    /// Returns `true` iff an arc was removed.
    pub fn remove_semantic(&mut self, head: usize, dependent: usize, label: &SrlLabel) -> bool {
        let id = self
            .graph
            .edges_directed(node_index(dependent), Direction::Incoming)
            .find(|e| {
                e.source().index() == head
                    && match e.weight() {
                        Arc::Semantic(l) => l == label,
                        _ => false,
                    }
            })
            .map(|e| e.id());

        match id {
            Some(id) => {
                self.graph.remove_edge(id);
                true
            }
            None => false,
        }
    }

    /// Whether the primary arcs contain a cycle.
    ///
    /// Following primary heads from any node must reach the root within
    /// as many steps as the graph has nodes.
    pub fn contains_cycle(&self) -> bool {
        let len = self.len();

        for start in 1..len {
            let mut steps = 0;
            let mut curr = start;

            while let Some(triple) = self.dep_graph().head(curr) {
                curr = triple.head();
                steps += 1;

                if curr == 0 {
                    break;
                }

                if steps >= len {
                    return true;
                }
            }
        }

        false
    }
}

impl Default for Sentence {
    fn default() -> Self {
        Sentence::new()
    }
}

impl FromIterator<Token> for Sentence {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Token>,
    {
        let mut sentence = Sentence::new();
        for token in iter {
            sentence.push(token);
        }
        sentence
    }
}

/// Iterator over the nodes in a dependency graph.
pub struct Iter<'a> {
    inner: NodeIndices,
    graph: &'a DiGraph<Node, Arc>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|idx| &self.graph[idx])
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mutable iterator over the nodes in a dependency graph.
pub struct IterMut<'a>(NodeWeightsMut<'a, Node>);

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl<'a> IntoIterator for &'a mut Sentence {
    type Item = &'a mut Node;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl Eq for Sentence {}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        for i in 0..self.len() {
            if self[i] != other[i]
                || self.dep_graph().head(i) != other.dep_graph().head(i)
                || self.secondary_heads(i) != other.secondary_heads(i)
                || self.semantic_heads(i) != other.semantic_heads(i)
            {
                return false;
            }
        }

        true
    }
}

impl Display for Sentence {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        for i in 1..self.len() {
            let form = self[i].token().map(Token::form).unwrap_or("_");
            match self.dep_graph().head(i) {
                Some(triple) => writeln!(
                    fmt,
                    "{}\t{}\t{}\t{}",
                    i,
                    form,
                    triple.head(),
                    triple
                        .relation()
                        .map(|r| r.as_str())
                        .unwrap_or("_")
                )?,
                None => writeln!(fmt, "{}\t{}\t_\t_", i, form)?,
            }
        }

        Ok(())
    }
}

impl From<Sentence> for DiGraph<Node, Arc> {
    fn from(sentence: Sentence) -> Self {
        sentence.into_inner()
    }
}

impl<'a> From<&'a Sentence> for &'a DiGraph<Node, Arc> {
    fn from(sentence: &'a Sentence) -> Self {
        sentence.get_ref()
    }
}

impl Index<usize> for Sentence {
    type Output = Node;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.graph[node_index(idx)]
    }
}

impl IndexMut<usize> for Sentence {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.graph[node_index(idx)]
    }
}

/// A primary graph view.
///
/// This data structure provides a view of the primary arcs of a
/// dependency graph. The view can be used to retrieve the dependents of a
/// head or the head of a dependent.
pub struct DepGraph<'a> {
    inner: &'a DiGraph<Node, Arc>,
}

#[allow(clippy::len_without_is_empty)]
impl<'a> DepGraph<'a> {
    /// Return an iterator over the dependents of `head`.
    pub fn dependents(&self, head: usize) -> impl Iterator<Item = DepTriple<DepLabel>> + 'a {
        dependents_impl(self.inner, head)
    }

    /// Return the head relation of `dependent`, if any.
    pub fn head(&self, dependent: usize) -> Option<DepTriple<DepLabel>> {
        head_impl(self.inner, dependent)
    }

    /// Get the number of nodes in the dependency graph.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }
}

impl<'a> Index<usize> for DepGraph<'a> {
    type Output = Node;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.inner[node_index(idx)]
    }
}

/// A mutable primary graph view.
///
/// In addition to the read-only view, the `add_deprel` method can be used
/// to add primary dependency relations to the graph.
pub struct DepGraphMut<'a> {
    inner: &'a mut DiGraph<Node, Arc>,
}

#[allow(clippy::len_without_is_empty)]
impl<'a> DepGraphMut<'a> {
    /// Add a primary dependency relation between `head` and `dependent`.
    ///
    /// If `dependent` already has a head relation, this relation is removed
    /// to ensure single-headedness.
    pub fn add_deprel(&mut self, triple: DepTriple<DepLabel>) -> Result<(), GraphError> {
        if triple.head() >= self.inner.node_count() {
            return Err(GraphError::HeadOutOfBounds {
                head: triple.head(),
                node_count: self.inner.node_count(),
            });
        }

        if triple.dependent() >= self.inner.node_count() {
            return Err(GraphError::DependentOutOfBounds {
                dependent: triple.dependent(),
                node_count: self.inner.node_count(),
            });
        }

        // Remove existing head relation (when present).
        if let Some(id) = self
            .inner
            .edges_directed(node_index(triple.dependent), Direction::Incoming)
            .filter(|e| e.weight().is_primary())
            .map(|e| e.id())
            .next()
        {
            self.inner.remove_edge(id);
        }

        self.inner.add_edge(
            node_index(triple.head),
            node_index(triple.dependent),
            Arc::Primary(triple.relation),
        );

        Ok(())
    }

    /// Return an iterator over the dependents of `head`.
    pub fn dependents(&self, head: usize) -> impl Iterator<Item = DepTriple<DepLabel>> + '_ {
        dependents_impl(self.inner, head)
    }

    /// Return the head relation of `dependent`, if any.
    pub fn head(&self, dependent: usize) -> Option<DepTriple<DepLabel>> {
        head_impl(self.inner, dependent)
    }

    /// Remove the relation of a token to its head.
    ///
    /// Returns the removed relation, if any.
    pub fn remove_head_rel(&mut self, dependent: usize) -> Option<DepTriple<DepLabel>> {
        // match instead of map to avoid simultaneous mutable and
        // immutable borrow.
        match self
            .inner
            .edges_directed(node_index(dependent), Direction::Incoming)
            .find(|e| e.weight().is_primary())
        {
            Some(edge) => {
                let head = edge.source().index();
                let edge_id = edge.id();
                let weight = self.inner.remove_edge(edge_id);
                let relation = match weight {
                    Some(Arc::Primary(relation)) => relation,
                    _ => None,
                };
                Some(DepTriple::new(head, relation, dependent))
            }
            None => None,
        }
    }

    /// Get the number of nodes in the dependency graph.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }
}

impl<'a> Index<usize> for DepGraphMut<'a> {
    type Output = Node;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.inner[node_index(idx)]
    }
}

impl<'a> IndexMut<usize> for DepGraphMut<'a> {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.inner[node_index(idx)]
    }
}

fn dependents_impl<'a>(
    graph: &'a DiGraph<Node, Arc>,
    head: usize,
) -> impl Iterator<Item = DepTriple<DepLabel>> + 'a {
    graph
        .edges_directed(node_index(head), Direction::Outgoing)
        .filter_map(move |e| match e.weight() {
            Arc::Primary(relation) => Some(DepTriple::new(
                e.source().index(),
                *relation,
                e.target().index(),
            )),
            _ => None,
        })
}

fn head_impl(graph: &DiGraph<Node, Arc>, dependent: usize) -> Option<DepTriple<DepLabel>> {
    graph
        .edges_directed(node_index(dependent), Direction::Incoming)
        .find(|e| e.weight().is_primary())
        .map(|e| match e.weight() {
            Arc::Primary(relation) => {
                DepTriple::new(e.source().index(), *relation, e.target().index())
            }
            _ => unreachable!("non-primary arc after primary filter"),
        })
}

#[cfg(test)]
mod tests {
    use super::{DepTriple, Node, Sentence};
    use crate::label::{Dep2Label, DepLabel, SrlLabel};
    use crate::token::Token;

    fn three_tokens() -> Sentence {
        let mut g = Sentence::default();
        g.push(Token::new("time"));
        g.push(Token::new("flies"));
        g.push(Token::new("fast"));
        g
    }

    #[test]
    fn add_deprel() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Dep), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 2))
            .unwrap();

        assert!(g.dep_graph().head(0).is_none());
        assert_eq!(
            g.dep_graph().head(1),
            Some(DepTriple::new(0, Some(DepLabel::Dep), 1))
        );
        assert_eq!(
            g.dep_graph().head(2),
            Some(DepTriple::new(0, Some(DepLabel::Root), 2))
        );
        assert!(g.dep_graph().head(3).is_none());

        // Single-headedness: reattachment replaces the old relation.
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some(DepLabel::Nsubj), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some(DepLabel::Advmod), 3))
            .unwrap();
        assert_eq!(
            g.dep_graph().head(1),
            Some(DepTriple::new(2, Some(DepLabel::Nsubj), 1))
        );
        assert_eq!(
            g.dep_graph().head(3),
            Some(DepTriple::new(2, Some(DepLabel::Advmod), 3))
        );
    }

    #[test]
    fn dependents() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 2))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some(DepLabel::Nsubj), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some(DepLabel::Advmod), 3))
            .unwrap();

        let deps = g.dep_graph().dependents(0).collect::<Vec<_>>();
        assert_eq!(&deps, &[DepTriple::new(0, Some(DepLabel::Root), 2)]);

        assert!(g.dep_graph().dependents(1).next().is_none());

        let mut deps = g.dep_graph().dependents(2).collect::<Vec<_>>();
        deps.sort();
        assert_eq!(
            &deps,
            &[
                DepTriple::new(2, Some(DepLabel::Nsubj), 1),
                DepTriple::new(2, Some(DepLabel::Advmod), 3),
            ]
        );
    }

    #[test]
    fn secondary_arcs() {
        let mut g = three_tokens();
        g.add_secondary(2, 1, Dep2Label::Xsubj).unwrap();
        g.add_secondary(3, 1, Dep2Label::Ref).unwrap();

        assert_eq!(
            g.secondary_heads(1),
            vec![
                DepTriple::new(2, Some(Dep2Label::Xsubj), 1),
                DepTriple::new(3, Some(Dep2Label::Ref), 1),
            ]
        );
        assert!(g.has_secondary(2, 1, Dep2Label::Xsubj));
        assert!(!g.has_secondary(2, 1, Dep2Label::Rnr));
        assert!(g.secondary_heads(2).is_empty());
    }

    #[test]
    fn semantic_arcs() {
        let mut g = three_tokens();
        g.add_semantic(2, 1, SrlLabel::short("ARG0")).unwrap();
        g.add_semantic(2, 3, SrlLabel::short("ARGM-TMP")).unwrap();

        assert!(g.is_semantic_argument_of(2, 1));
        assert!(g.is_semantic_argument_with(2, 1, &SrlLabel::new("A0")));
        assert!(!g.is_semantic_argument_with(2, 1, &SrlLabel::new("A1")));

        assert!(g.remove_semantic(2, 3, &SrlLabel::new("AM-TMP")));
        assert!(!g.remove_semantic(2, 3, &SrlLabel::new("AM-TMP")));
        assert!(g.semantic_heads(3).is_empty());
    }

    #[test]
    fn cycle_detection() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(3, Some(DepLabel::Dep), 2))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some(DepLabel::Dep), 3))
            .unwrap();

        assert!(g.contains_cycle());

        g.dep_graph_mut()
            .add_deprel(DepTriple::new(1, Some(DepLabel::Dep), 3))
            .unwrap();
        assert!(!g.contains_cycle());
    }

    #[test]
    fn equality() {
        let mut g1 = three_tokens();
        let g2 = g1.clone();
        assert_eq!(g1, g2);

        g1.push(Token::new("?"));
        assert_ne!(g1, g2);

        let mut g3 = g1.clone();
        g1.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 2))
            .unwrap();
        assert_ne!(g1, g3);
        g3.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 2))
            .unwrap();
        assert_eq!(g1, g3);

        g3.add_secondary(2, 1, Dep2Label::Gap).unwrap();
        assert_ne!(g1, g3);

        let mut g4 = g1.clone();
        if let Node::Token(ref mut token) = g4[3] {
            token.set_pos(Some("RB"));
        }
        assert_ne!(g1, g4);
    }

    #[test]
    #[should_panic(expected = "HeadOutOfBounds")]
    fn incorrect_head_is_rejected() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(4, Some(DepLabel::Dep), 3))
            .unwrap();
    }

    #[test]
    #[should_panic(expected = "DependentOutOfBounds")]
    fn incorrect_dependent_is_rejected() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(3, Some(DepLabel::Dep), 4))
            .unwrap();
    }

    #[test]
    fn remove_deprel() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Dep), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 2))
            .unwrap();
        assert_eq!(
            g.dep_graph_mut().remove_head_rel(1),
            Some(DepTriple::new(0, Some(DepLabel::Dep), 1))
        );
        assert!(g.dep_graph_mut().remove_head_rel(0).is_none());

        assert!(g.dep_graph().head(0).is_none());
        assert!(g.dep_graph().head(1).is_none());
        assert_eq!(
            g.dep_graph().head(2),
            Some(DepTriple::new(0, Some(DepLabel::Root), 2))
        );
    }
}
