//! Constituency-to-dependency conversion.

use std::collections::HashMap;

use cttree::english;
use cttree::node::NodeId;
use cttree::tree::CTTree;
use depgraph::graph::Sentence;

use crate::error::ConvertError;
use crate::head::HeadInfo;
use crate::headrule::HeadRuleMap;

/// Constituency-to-dependency converter.
pub trait ToDependency {
    /// Convert a constituency tree into a dependency sentence.
    ///
    /// Returns `Ok(None)` when the tree collapses to less than two tokens
    /// after empty categories and edited phrases are resolved. Returns an
    /// error when the assembled primary-head graph is cyclic.
    ///
    /// The tree is preprocessed in place: function tags are normalized,
    /// antecedents linked, and empty categories removed or relocated.
    fn to_dependency(&self, tree: &mut CTTree) -> Result<Option<Sentence>, ConvertError>;
}

/// A converter from Penn Treebank constituency trees to Stanford-style
/// dependency graphs.
///
/// The converter holds only the immutable head-rule tables; all state of
/// a single conversion lives in a private per-tree value, so one
/// converter can serve any number of threads.
pub struct Converter {
    rules: HeadRuleMap,
}

impl Converter {
    pub fn new(rules: HeadRuleMap) -> Self {
        Converter { rules }
    }

    /// A converter with the built-in English head rules.
    pub fn english() -> Self {
        Converter::new(HeadRuleMap::english())
    }
}

impl ToDependency for Converter {
    fn to_dependency(&self, tree: &mut CTTree) -> Result<Option<Sentence>, ConvertError> {
        english::preprocess(tree);

        let mut conv = Conversion::new(&self.rules, tree);

        if !conv.map_empty_categories() {
            return Ok(None);
        }

        let root = conv.tree.root();
        conv.find_heads(root);

        conv.assemble()
    }
}

/// State of the conversion of a single tree: the head-info table and the
/// deferred secondary-head obligations.
pub(crate) struct Conversion<'a> {
    pub(crate) rules: &'a HeadRuleMap,
    pub(crate) tree: &'a mut CTTree,
    pub(crate) heads: Vec<Option<HeadInfo>>,
    /// Antecedent to the clauses holding an empty subject bound by it.
    pub(crate) xsubj: HashMap<NodeId, Vec<NodeId>>,
    /// Antecedent to the phrases sharing it through right node raising.
    pub(crate) rnr: HashMap<NodeId, Vec<NodeId>>,
}

impl<'a> Conversion<'a> {
    pub(crate) fn new(rules: &'a HeadRuleMap, tree: &'a mut CTTree) -> Self {
        let len = tree.len();

        Conversion {
            rules,
            tree,
            heads: vec![None; len],
            xsubj: HashMap::new(),
            rnr: HashMap::new(),
        }
    }
}
