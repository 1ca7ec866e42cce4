//! Constituency trees.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::node::{CTNode, NodeId};
use crate::tag::CTag;

/// A constituency tree.
///
/// The tree is an arena of nodes addressed by `NodeId`. Surgery on the
/// tree (detaching, splicing) rewires parent/child indices, but node
/// identifiers, terminal identifiers and token identifiers stay valid for
/// the lifetime of the tree. Side tables for co-indexation are built once
/// when the tree is sealed.
#[derive(Clone, Debug)]
pub struct CTTree {
    nodes: Vec<CTNode>,
    root: NodeId,
    terminals: Vec<NodeId>,
    tokens: Vec<NodeId>,
    co_indexed: HashMap<usize, NodeId>,
    ec_groups: HashMap<usize, Vec<NodeId>>,
}

impl CTTree {
    /// Construct a tree holding only a root node.
    pub fn with_root(tag: CTag) -> Self {
        CTTree {
            nodes: vec![CTNode::phrase(tag)],
            root: NodeId(0),
            terminals: Vec::new(),
            tokens: Vec::new(),
            co_indexed: HashMap::new(),
            ec_groups: HashMap::new(),
        }
    }

    /// Add a phrase node under `parent`.
    pub fn add_phrase(&mut self, parent: NodeId, tag: CTag) -> NodeId {
        self.add_node(parent, CTNode::phrase(tag))
    }

    /// Add a terminal node under `parent`.
    pub fn add_terminal(&mut self, parent: NodeId, tag: CTag, form: impl Into<String>) -> NodeId {
        self.add_node(parent, CTNode::terminal(tag, form))
    }

    fn add_node(&mut self, parent: NodeId, mut node: CTNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Assign terminal/token identifiers and build the co-indexation side
    /// tables. Call once after the last node was added.
    pub fn seal(&mut self) {
        self.terminals = self.terminals_under(self.root);

        self.tokens.clear();
        self.co_indexed.clear();
        self.ec_groups.clear();

        for i in 0..self.nodes.len() {
            if let Some(index) = self.nodes[i].co_index() {
                self.co_indexed.entry(index).or_insert(NodeId(i));
            }
        }

        for (i, &id) in self.terminals.clone().iter().enumerate() {
            self[id].terminal_id = Some(i);

            if self[id].is_empty_category() {
                if let Some(index) = self[id].ec_index() {
                    self.ec_groups.entry(index).or_insert_with(Vec::new).push(id);
                    let antecedent = self.co_indexed.get(&index).copied();
                    self[id].set_antecedent(antecedent);
                }
            } else {
                let token_id = self.tokens.len();
                self[id].token_id = Some(token_id);
                self.tokens.push(id);
            }
        }
    }

    /// Get the number of nodes in the arena, including detached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// All terminals in surface order, including empty categories.
    pub fn terminals(&self) -> &[NodeId] {
        &self.terminals
    }

    /// All tokens (non-empty terminals) in surface order.
    pub fn tokens(&self) -> &[NodeId] {
        &self.tokens
    }

    pub fn token(&self, token_id: usize) -> NodeId {
        self.tokens[token_id]
    }

    /// The node carrying co-index `index`, if any.
    pub fn co_indexed(&self, index: usize) -> Option<NodeId> {
        self.co_indexed.get(&index).copied()
    }

    /// Empty categories referencing co-index `index`, in surface order.
    pub fn ec_group(&self, index: usize) -> &[NodeId] {
        self.ec_groups
            .get(&index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self[id].children()
    }

    // ====================== Navigation ======================

    pub fn left_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let pos = self.position(parent, id)?;
        if pos == 0 {
            None
        } else {
            Some(self[parent].children()[pos - 1])
        }
    }

    pub fn right_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let pos = self.position(parent, id)?;
        self[parent].children().get(pos + 1).copied()
    }

    /// Nearest left sibling matching the predicate, scanning outward.
    pub fn left_nearest_sibling<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        let parent = self.parent(id)?;
        let pos = self.position(parent, id)?;
        self[parent].children()[..pos]
            .iter()
            .rev()
            .copied()
            .find(|&sib| pred(self, sib))
    }

    /// Nearest right sibling matching the predicate, scanning outward.
    pub fn right_nearest_sibling<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        let parent = self.parent(id)?;
        let pos = self.position(parent, id)?;
        self[parent].children()[pos + 1..]
            .iter()
            .copied()
            .find(|&sib| pred(self, sib))
    }

    pub fn first_child<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        self[id].children().iter().copied().find(|&c| pred(self, c))
    }

    pub fn contains_child<P>(&self, id: NodeId, pred: P) -> bool
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        self.first_child(id, pred).is_some()
    }

    /// First matching descendant in pre-order, excluding the node itself.
    pub fn first_descendant<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        self.first_descendant_aux(id, &pred)
    }

    fn first_descendant_aux<P>(&self, id: NodeId, pred: &P) -> Option<NodeId>
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        for &child in self[id].children() {
            if pred(self, child) {
                return Some(child);
            }

            if let Some(desc) = self.first_descendant_aux(child, pred) {
                return Some(desc);
            }
        }

        None
    }

    /// Follow matching first children down to the lowest node of the chain.
    pub fn first_lowest_chained_descendant<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        let mut desc = None;
        let mut curr = self.first_child(id, &pred);

        while let Some(node) = curr {
            desc = Some(node);
            curr = self.first_child(node, &pred);
        }

        desc
    }

    /// Nearest ancestor matching the predicate.
    pub fn nearest_ancestor<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        let mut curr = self.parent(id);

        while let Some(node) = curr {
            if pred(self, node) {
                return Some(node);
            }
            curr = self.parent(node);
        }

        None
    }

    /// Highest ancestor of an unbroken chain of matching ancestors.
    pub fn highest_chained_ancestor<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&CTTree, NodeId) -> bool,
    {
        let mut ancestor = None;
        let mut curr = self.parent(id);

        while let Some(node) = curr {
            if !pred(self, node) {
                break;
            }
            ancestor = Some(node);
            curr = self.parent(node);
        }

        ancestor
    }

    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut curr = self.parent(id);

        while let Some(node) = curr {
            if node == ancestor {
                return true;
            }
            curr = self.parent(node);
        }

        false
    }

    /// Terminals under a node, in surface order. A terminal is its own
    /// (singleton) terminal list.
    pub fn terminals_under(&self, id: NodeId) -> Vec<NodeId> {
        let mut terminals = Vec::new();
        self.terminals_under_aux(id, &mut terminals);
        terminals
    }

    fn terminals_under_aux(&self, id: NodeId, terminals: &mut Vec<NodeId>) {
        if self[id].is_terminal() {
            terminals.push(id);
            return;
        }

        for &child in self[id].children() {
            self.terminals_under_aux(child, terminals);
        }
    }

    /// Tokens (non-empty terminals) under a node, in surface order.
    pub fn tokens_under(&self, id: NodeId) -> Vec<NodeId> {
        self.terminals_under(id)
            .into_iter()
            .filter(|&t| !self[t].is_empty_category())
            .collect()
    }

    pub fn first_terminal(&self, id: NodeId) -> Option<NodeId> {
        if self[id].is_terminal() {
            return Some(id);
        }

        self[id]
            .children()
            .iter()
            .find_map(|&child| self.first_terminal(child))
    }

    /// A node all of whose terminals are empty categories.
    pub fn is_empty_category_terminal(&self, id: NodeId) -> bool {
        if self[id].is_terminal() {
            return self[id].is_empty_category();
        }

        self.terminals_under(id)
            .iter()
            .all(|&t| self[t].is_empty_category())
    }

    /// Word forms of the terminals under a node, space-joined.
    pub fn forms_under(&self, id: NodeId) -> String {
        let forms: Vec<_> = self
            .terminals_under(id)
            .into_iter()
            .filter_map(|t| self[t].form().map(ToOwned::to_owned))
            .collect();
        forms.join(" ")
    }

    // ====================== Surgery ======================

    fn position(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self[parent].children().iter().position(|&c| c == child)
    }

    /// Detach a node from its parent without collapsing emptied ancestors.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            if let Some(pos) = self.position(parent, id) {
                self.nodes[parent.0].children.remove(pos);
            }
            self.nodes[id.0].parent = None;
        }
    }

    /// Remove a node: detach it and recursively remove ancestors that are
    /// left without children.
    pub fn remove(&mut self, id: NodeId) {
        let parent = match self.parent(id) {
            Some(parent) => parent,
            None => return,
        };

        self.detach(id);

        if self[parent].children().is_empty() {
            self.remove(parent);
        }
    }

    /// Replace `old` by `new` in the child list of `parent`.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if let Some(pos) = self.position(parent, old) {
            self.nodes[parent.0].children[pos] = new;
            self.nodes[old.0].parent = None;
            self.nodes[new.0].parent = Some(parent);
        }
    }

    /// Move `antecedent` into the tree position of `slot`: the antecedent is
    /// removed from its current position (collapsing emptied ancestors) and
    /// takes the slot's place under the slot's parent.
    pub fn splice(&mut self, slot: NodeId, antecedent: NodeId) {
        let parent = match self.parent(slot) {
            Some(parent) => parent,
            None => return,
        };

        self.remove(antecedent);
        self.replace_child(parent, slot, antecedent);
    }
}

impl Index<NodeId> for CTTree {
    type Output = CTNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for CTTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}

impl fmt::Display for CTTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_node(f, self.root)
    }
}

impl CTTree {
    fn fmt_node(&self, f: &mut fmt::Formatter, id: NodeId) -> fmt::Result {
        let node = &self[id];

        write!(f, "({}", node.tag())?;
        for ftag in node.ftags() {
            write!(f, "-{}", ftag)?;
        }
        if let Some(index) = node.co_index() {
            write!(f, "-{}", index)?;
        }
        if let Some(index) = node.gap_index() {
            write!(f, "={}", index)?;
        }

        if let Some(form) = node.form() {
            write!(f, " {}", form)?;
        } else {
            for &child in node.children() {
                write!(f, " ")?;
                self.fmt_node(f, child)?;
            }
        }

        write!(f, ")")
    }
}
