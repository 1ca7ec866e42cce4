//! Assembling the dependency sentence.

use std::collections::HashSet;

use cttree::brackets::revert_brackets;
use cttree::english;
use cttree::node::NodeId;
use cttree::tag::CTag;
use depgraph::graph::{DepTriple, Sentence};
use depgraph::label::{Dep2Label, DepLabel};
use depgraph::token::Token;
use itertools::Itertools;
use tracing::debug;

use crate::conv::Conversion;
use crate::error::ConvertError;
use crate::label::{is_marker_tag, SEM_TAGS, SYN_TAGS};

impl<'a> Conversion<'a> {
    /// Build the dependency sentence from the head-annotated tree.
    pub(crate) fn assemble(&mut self) -> Result<Option<Sentence>, ConvertError> {
        let mut sentence = self.init_sentence();
        self.add_dep_heads(&mut sentence)?;

        if sentence.contains_cycle() {
            return Err(ConvertError::Cycle);
        }

        enrich_labels(&mut sentence);
        self.add_secondary_heads(&mut sentence)?;
        self.add_feats(&mut sentence, self.tree.root())?;

        if self.has_propbank(self.tree.root()) {
            self.add_semantic_heads(&mut sentence)?;
        }

        Ok(self.without_edited(sentence))
    }

    fn init_sentence(&self) -> Sentence {
        let mut sentence = Sentence::new();

        for &t in self.tree.tokens() {
            let form = revert_brackets(self.tree[t].form().expect("token without form"));
            let mut token = Token::new(form);
            token.set_pos(Some(self.tree[t].tag().as_str()));
            sentence.push(token);
        }

        sentence
    }

    /// The 1-based token index a constituent maps to: the token of its
    /// representative terminal. `None` for the top node and for nodes
    /// represented by an empty category.
    pub(crate) fn dep_index(&self, node: NodeId) -> Option<usize> {
        if self.tree[node].is_tag(CTag::Top) {
            return None;
        }

        let terminal = if self.tree[node].is_terminal() {
            node
        } else {
            self.heads[node.index()].as_ref()?.terminal_head
        };

        if self.tree[terminal].is_empty_category() {
            return None;
        }

        self.tree[terminal].token_id().map(|id| id + 1)
    }

    /// Add the primary head of every token, plus `REF` arcs to linked
    /// antecedents.
    fn add_dep_heads(&self, sentence: &mut Sentence) -> Result<(), ConvertError> {
        let mut roots = 0;

        for (i, &node) in self.tree.tokens().iter().enumerate() {
            let curr = i + 1;

            // A token detached by empty-category surgery has no head
            // information left; it falls back to the root.
            let info = match self.heads[node.index()].as_ref() {
                Some(info) => info,
                None => {
                    sentence
                        .dep_graph_mut()
                        .add_deprel(DepTriple::new(0, Some(DepLabel::Dep), curr))?;
                    continue;
                }
            };

            let head = self.tree[info.terminal_head]
                .token_id()
                .map(|id| id + 1)
                .unwrap_or(0);

            if curr == head {
                sentence
                    .dep_graph_mut()
                    .add_deprel(DepTriple::new(0, Some(DepLabel::Root), curr))?;
                roots += 1;
            } else {
                let mut label = info.label.unwrap_or(DepLabel::Dep);

                // Subordinating markers directly under a non-complementizer
                // SBAR.
                if is_marker_tag(self.tree[node].tag())
                    && self
                        .tree
                        .parent(node)
                        .map(|p| self.tree[p].is_tag(CTag::Sbar))
                        .unwrap_or(false)
                    && label != DepLabel::Complm
                {
                    label = DepLabel::Mark;
                }

                sentence
                    .dep_graph_mut()
                    .add_deprel(DepTriple::new(head, Some(label), curr))?;
            }

            if let Some(ante) = self.tree[node].antecedent() {
                if let Some(ante) = self.dep_index(ante) {
                    sentence.add_secondary(ante, curr, Dep2Label::Ref)?;
                }
            }
        }

        if roots > 1 {
            debug!(roots, "sentence with multiple roots");
        }

        Ok(())
    }

    /// Discharge the deferred XSUBJ and RNR obligations into secondary
    /// arcs.
    fn add_secondary_heads(&mut self, sentence: &mut Sentence) -> Result<(), ConvertError> {
        let mut xsubj: Vec<(NodeId, Vec<NodeId>)> = self.xsubj.drain().collect();
        xsubj.sort();

        for (curr, clauses) in xsubj {
            if self.has_info(curr) {
                self.add_secondary_heads_aux(sentence, curr, &clauses, Dep2Label::Xsubj)?;
            }
        }

        let mut rnr: Vec<(NodeId, Vec<NodeId>)> = self.rnr.drain().collect();
        rnr.sort();

        for (curr, shared) in rnr {
            let parent = match self.tree.parent(curr) {
                Some(parent) => parent,
                None => continue,
            };

            let is_parent_head = self
                .heads
                .get(parent.index())
                .and_then(|info| info.as_ref())
                .map(|info| info.nonterminal_head == curr)
                .unwrap_or(false);

            if is_parent_head {
                // The antecedent heads its parent: it provides secondary
                // heads to the shared phrases instead of receiving them.
                self.add_secondary_children(sentence, curr, &shared, Dep2Label::Rnr)?;
            } else {
                self.add_secondary_heads_aux(sentence, curr, &shared, Dep2Label::Rnr)?;
            }
        }

        Ok(())
    }

    fn add_secondary_heads_aux(
        &self,
        sentence: &mut Sentence,
        node: NodeId,
        heads: &[NodeId],
        label: Dep2Label,
    ) -> Result<(), ConvertError> {
        if self.tree.is_empty_category_terminal(node) {
            return Ok(());
        }

        let dependent = match self.dep_index(node) {
            Some(dependent) => dependent,
            None => return Ok(()),
        };

        for &chead in heads {
            let head = match self.dep_index(chead) {
                Some(head) => head,
                None => continue,
            };

            let is_dependent = sentence
                .dep_graph()
                .head(dependent)
                .map(|t| t.head() == head)
                .unwrap_or(false);

            if !is_dependent {
                sentence.add_secondary(head, dependent, label)?;
            }

            // A clausal complement with a bound subject is an open
            // complement.
            if label == Dep2Label::Xsubj {
                if let Some(triple) = sentence.dep_graph().head(head) {
                    if triple.relation() == Some(&DepLabel::Ccomp) {
                        sentence.dep_graph_mut().add_deprel(DepTriple::new(
                            triple.head(),
                            Some(DepLabel::Xcomp),
                            head,
                        ))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn add_secondary_children(
        &self,
        sentence: &mut Sentence,
        chead: NodeId,
        nodes: &[NodeId],
        label: Dep2Label,
    ) -> Result<(), ConvertError> {
        let head = match self.dep_index(chead) {
            Some(head) => head,
            None => return Ok(()),
        };

        for &node in nodes {
            if let Some(dependent) = self.dep_index(node) {
                sentence.add_secondary(head, dependent, label)?;
            }
        }

        Ok(())
    }

    /// Add gapping arcs and serialize semantic/syntactic function tags as
    /// token features, walking the tree pre-order.
    fn add_feats(&self, sentence: &mut Sentence, node: NodeId) -> Result<(), ConvertError> {
        if !self.tree.is_empty_category_terminal(node) {
            if let Some(gap) = self.tree[node].gap_index() {
                let parent_gapped = self
                    .tree
                    .parent(node)
                    .and_then(|p| self.tree[p].gap_index())
                    .is_some();

                if !parent_gapped {
                    if let Some(ante) = self.tree.co_indexed(gap) {
                        if let (Some(dependent), Some(head)) =
                            (self.dep_index(node), self.dep_index(ante))
                        {
                            sentence.add_secondary(head, dependent, Dep2Label::Gap)?;
                        }
                    }
                }
            }
        }

        if let Some(feat) = self.function_tag_feats(node, SEM_TAGS) {
            self.put_feat(sentence, node, "sem", feat);
        }

        if let Some(feat) = self.function_tag_feats(node, SYN_TAGS) {
            self.put_feat(sentence, node, "syn", feat);
        }

        for &child in self.tree.children(node) {
            self.add_feats(sentence, child)?;
        }

        Ok(())
    }

    fn function_tag_feats(&self, node: NodeId, tags: &[cttree::tag::FTag]) -> Option<String> {
        let mut found: Vec<&str> = self.tree[node]
            .ftags()
            .iter()
            .filter(|t| tags.contains(*t))
            .map(|t| t.as_str())
            .collect();

        if found.is_empty() {
            return None;
        }

        found.sort_unstable();

        Some(found.iter().join(","))
    }

    fn put_feat(&self, sentence: &mut Sentence, node: NodeId, key: &str, value: String) {
        if let Some(index) = self.dep_index(node) {
            if let Some(token) = sentence[index].token_mut() {
                token.features_mut().insert(key.to_owned(), value);
            }
        }
    }

    /// Drop all tokens under edited phrases and renumber the rest. A
    /// sentence reduced to less than two nodes yields no tree.
    fn without_edited(&self, sentence: Sentence) -> Option<Sentence> {
        let mut pruned = HashSet::new();
        self.collect_edited(self.tree.root(), &mut pruned);

        if pruned.is_empty() {
            return if sentence.len() > 2 { Some(sentence) } else { None };
        }

        let mut out = Sentence::new();
        let mut mapping: Vec<Option<usize>> = vec![None; sentence.len()];
        mapping[0] = Some(0);

        for i in 1..sentence.len() {
            if pruned.contains(&i) {
                continue;
            }

            let token = sentence[i].token().expect("token node").clone();
            mapping[i] = Some(out.push(token));
        }

        for i in 1..sentence.len() {
            let dependent = match mapping[i] {
                Some(dependent) => dependent,
                None => continue,
            };

            if let Some(triple) = sentence.dep_graph().head(i) {
                if let Some(head) = mapping[triple.head()] {
                    out.dep_graph_mut()
                        .add_deprel(DepTriple::new(head, triple.relation().copied(), dependent))
                        .expect("renumbered head in bounds");
                }
            }

            for triple in sentence.secondary_heads(i) {
                if let Some(head) = mapping[triple.head()] {
                    let label = *triple.relation().expect("secondary arc with label");
                    out.add_secondary(head, dependent, label)
                        .expect("renumbered head in bounds");
                }
            }

            for triple in sentence.semantic_heads(i) {
                if let Some(head) = mapping[triple.head()] {
                    let label = triple.relation().expect("semantic arc with label").clone();
                    out.add_semantic(head, dependent, label)
                        .expect("renumbered head in bounds");
                }
            }
        }

        if out.len() > 2 {
            Some(out)
        } else {
            None
        }
    }

    fn collect_edited(&self, node: NodeId, pruned: &mut HashSet<usize>) {
        for &child in self.tree.children(node) {
            if english::is_edited_phrase(self.tree, child) {
                for token in self.tree.tokens_under(child) {
                    if let Some(id) = self.tree[token].token_id() {
                        pruned.insert(id + 1);
                    }
                }
            } else if !self.tree[child].is_terminal() {
                self.collect_edited(child, pruned);
            }
        }
    }
}

/// Enrich labels after primary heads are in place: negation adverbs,
/// passivized subjects, and second objects.
pub(crate) fn enrich_labels(sentence: &mut Sentence) {
    for i in 1..sentence.len() {
        if let Some(triple) = sentence.dep_graph().head(i) {
            if triple.relation() == Some(&DepLabel::Advmod) {
                let negation = sentence[i]
                    .token()
                    .map(|t| english::is_negation(t.form()))
                    .unwrap_or(false);

                if negation {
                    sentence
                        .dep_graph_mut()
                        .add_deprel(DepTriple::new(triple.head(), Some(DepLabel::Neg), i))
                        .expect("relabel in bounds");
                }
            }
        }

        let dependents: Vec<_> = sentence.dep_graph().dependents(i).collect();

        if dependents
            .iter()
            .any(|t| t.relation() == Some(&DepLabel::Auxpass))
        {
            for triple in &dependents {
                if let Some(&label) = triple.relation() {
                    if label == DepLabel::Nsubj || label == DepLabel::Csubj {
                        sentence
                            .dep_graph_mut()
                            .add_deprel(DepTriple::new(
                                i,
                                Some(label.passivized()),
                                triple.dependent(),
                            ))
                            .expect("relabel in bounds");
                    }
                }
            }
        }

        let mut objects: Vec<usize> = dependents
            .iter()
            .filter(|t| t.relation() == Some(&DepLabel::Dobj))
            .map(DepTriple::dependent)
            .collect();

        if objects.len() > 1 {
            objects.sort_unstable();
            sentence
                .dep_graph_mut()
                .add_deprel(DepTriple::new(i, Some(DepLabel::Iobj), objects[0]))
                .expect("relabel in bounds");
        }
    }
}

#[cfg(test)]
mod tests {
    use cttree::tree::CTTree;
    use depgraph::graph::{DepTriple, Sentence};
    use depgraph::label::DepLabel;
    use depgraph::token::Token;

    use crate::conv::Conversion;
    use crate::error::ConvertError;
    use crate::headrule::HeadRuleMap;

    #[test]
    fn cyclic_heads_are_rejected() {
        // Force a cyclic head assignment through the internal state: the
        // two tokens point at each other.
        let mut tree: CTTree = "(TOP (X (XX a) (XX b)))".parse().unwrap();
        let rules = HeadRuleMap::english();
        let mut conv = Conversion::new(&rules, &mut tree);

        let root = conv.tree.root();
        conv.find_heads(root);

        let a = conv.tree.token(0);
        let b = conv.tree.token(1);
        conv.set_dep_head(a, b, DepLabel::Dep);
        conv.set_dep_head(b, a, DepLabel::Dep);

        assert!(matches!(conv.assemble(), Err(ConvertError::Cycle)));
    }

    #[test]
    fn enrich_negation_and_passive() {
        // was(2) <- nsubj window(1), auxpass? no: build manually.
        let mut s: Sentence = vec![
            Token::new("window"),
            Token::new("was"),
            Token::new("broken"),
            Token::new("not"),
        ]
        .into_iter()
        .collect();

        s.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 3))
            .unwrap();
        s.dep_graph_mut()
            .add_deprel(DepTriple::new(3, Some(DepLabel::Nsubj), 1))
            .unwrap();
        s.dep_graph_mut()
            .add_deprel(DepTriple::new(3, Some(DepLabel::Auxpass), 2))
            .unwrap();
        s.dep_graph_mut()
            .add_deprel(DepTriple::new(3, Some(DepLabel::Advmod), 4))
            .unwrap();

        super::enrich_labels(&mut s);

        assert_eq!(
            s.dep_graph().head(1),
            Some(DepTriple::new(3, Some(DepLabel::Nsubjpass), 1))
        );
        assert_eq!(
            s.dep_graph().head(4),
            Some(DepTriple::new(3, Some(DepLabel::Neg), 4))
        );
    }

    #[test]
    fn enrich_double_object() {
        let mut s: Sentence = vec![
            Token::new("gave"),
            Token::new("her"),
            Token::new("books"),
        ]
        .into_iter()
        .collect();

        s.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 1))
            .unwrap();
        s.dep_graph_mut()
            .add_deprel(DepTriple::new(1, Some(DepLabel::Dobj), 2))
            .unwrap();
        s.dep_graph_mut()
            .add_deprel(DepTriple::new(1, Some(DepLabel::Dobj), 3))
            .unwrap();

        super::enrich_labels(&mut s);

        assert_eq!(
            s.dep_graph().head(2),
            Some(DepTriple::new(1, Some(DepLabel::Iobj), 2))
        );
        assert_eq!(
            s.dep_graph().head(3),
            Some(DepTriple::new(1, Some(DepLabel::Dobj), 3))
        );
    }
}
