//! Constituency tree nodes.

use std::collections::BTreeSet;
use std::fmt;
use std::mem;

use crate::tag::{CTag, FTag};

/// Index of a node in the arena of its tree.
///
/// Identifiers stay valid for the lifetime of the tree: removing a node
/// detaches it from its parent, but never invalidates indices.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A predicate-argument arc from PropBank annotation: this node is an
/// argument of the predicate headed by `node`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PbArc {
    pub node: NodeId,
    pub label: String,
}

impl PbArc {
    pub fn new(node: NodeId, label: impl Into<String>) -> Self {
        PbArc {
            node,
            label: label.into(),
        }
    }
}

/// A constituency tree node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CTNode {
    tag: CTag,
    ftags: BTreeSet<FTag>,
    form: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    co_index: Option<usize>,
    gap_index: Option<usize>,
    antecedent: Option<NodeId>,
    pub(crate) terminal_id: Option<usize>,
    pub(crate) token_id: Option<usize>,
    roleset: Option<String>,
    pb_heads: Vec<PbArc>,
}

impl CTNode {
    pub(crate) fn phrase(tag: CTag) -> Self {
        CTNode {
            tag,
            ftags: BTreeSet::new(),
            form: None,
            parent: None,
            children: Vec::new(),
            co_index: None,
            gap_index: None,
            antecedent: None,
            terminal_id: None,
            token_id: None,
            roleset: None,
            pb_heads: Vec::new(),
        }
    }

    pub(crate) fn terminal(tag: CTag, form: impl Into<String>) -> Self {
        let mut node = CTNode::phrase(tag);
        node.form = Some(form.into());
        node
    }

    /// Get the constituent tag.
    pub fn tag(&self) -> CTag {
        self.tag
    }

    /// Set the constituent tag, returning the tag that is replaced.
    pub fn set_tag(&mut self, tag: CTag) -> CTag {
        mem::replace(&mut self.tag, tag)
    }

    pub fn is_tag(&self, tag: CTag) -> bool {
        self.tag == tag
    }

    pub fn is_tag_any(&self, tags: &[CTag]) -> bool {
        tags.contains(&self.tag)
    }

    /// Get the function tags of the node.
    pub fn ftags(&self) -> &BTreeSet<FTag> {
        &self.ftags
    }

    pub fn has_ftag(&self, ftag: FTag) -> bool {
        self.ftags.contains(&ftag)
    }

    pub fn has_ftag_any(&self, ftags: &[FTag]) -> bool {
        ftags.iter().any(|t| self.ftags.contains(t))
    }

    pub fn has_no_ftag(&self) -> bool {
        self.ftags.is_empty()
    }

    pub fn add_ftag(&mut self, ftag: FTag) -> bool {
        self.ftags.insert(ftag)
    }

    pub fn add_ftags<I>(&mut self, ftags: I)
    where
        I: IntoIterator<Item = FTag>,
    {
        self.ftags.extend(ftags)
    }

    pub fn remove_ftag(&mut self, ftag: FTag) -> bool {
        self.ftags.remove(&ftag)
    }

    pub fn clear_ftags(&mut self) {
        self.ftags.clear()
    }

    /// Get the word form. Only terminals carry a form.
    pub fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn is_form(&self, form: &str) -> bool {
        self.form() == Some(form)
    }

    pub fn is_form_ignore_case(&self, form: &str) -> bool {
        self.form()
            .map(|f| f.eq_ignore_ascii_case(form))
            .unwrap_or(false)
    }

    pub fn form_starts_with(&self, prefix: &str) -> bool {
        self.form().map(|f| f.starts_with(prefix)).unwrap_or(false)
    }

    /// A node is a terminal iff it carries a word form.
    pub fn is_terminal(&self) -> bool {
        self.form.is_some()
    }

    /// An empty category is a terminal under a `-NONE-` tag.
    pub fn is_empty_category(&self) -> bool {
        self.tag == CTag::None
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Co-index of the node label (`NP-1`).
    pub fn co_index(&self) -> Option<usize> {
        self.co_index
    }

    pub(crate) fn set_co_index(&mut self, index: Option<usize>) {
        self.co_index = index;
    }

    /// Gapping index of the node label (`NP=1`).
    pub fn gap_index(&self) -> Option<usize> {
        self.gap_index
    }

    pub(crate) fn set_gap_index(&mut self, index: Option<usize>) {
        self.gap_index = index;
    }

    /// Co-index group referenced by the word form of an empty category
    /// (`*T*-2` references group 2).
    pub fn ec_index(&self) -> Option<usize> {
        if !self.is_empty_category() {
            return None;
        }

        let form = self.form()?;
        let idx = form.rfind('-')?;
        form[idx + 1..].parse().ok()
    }

    /// The antecedent of an empty category or relativizer, once linked.
    pub fn antecedent(&self) -> Option<NodeId> {
        self.antecedent
    }

    pub fn set_antecedent(&mut self, antecedent: Option<NodeId>) -> Option<NodeId> {
        mem::replace(&mut self.antecedent, antecedent)
    }

    /// Identifier of the terminal within its tree, in surface order.
    pub fn terminal_id(&self) -> Option<usize> {
        self.terminal_id
    }

    /// 0-based token identifier; empty categories do not consume one.
    pub fn token_id(&self) -> Option<usize> {
        self.token_id
    }

    /// PropBank roleset identifier of a predicate node.
    pub fn roleset(&self) -> Option<&str> {
        self.roleset.as_deref()
    }

    pub fn set_roleset(&mut self, roleset: Option<impl Into<String>>) -> Option<String> {
        mem::replace(&mut self.roleset, roleset.map(Into::into))
    }

    pub fn is_pb_head(&self) -> bool {
        self.roleset.is_some()
    }

    /// Predicate-argument arcs attached to this node.
    pub fn pb_heads(&self) -> &[PbArc] {
        &self.pb_heads
    }

    pub fn add_pb_head(&mut self, arc: PbArc) {
        self.pb_heads.push(arc)
    }
}
