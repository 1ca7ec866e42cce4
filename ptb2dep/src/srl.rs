//! Projecting PropBank predicate-argument structure onto the dependency
//! sentence.

use std::collections::HashSet;

use cttree::english;
use cttree::node::NodeId;
use cttree::tag::CTag;
use depgraph::graph::Sentence;
use depgraph::label::SrlLabel;

use crate::conv::Conversion;
use crate::error::ConvertError;

impl<'a> Conversion<'a> {
    pub(crate) fn has_propbank(&self, node: NodeId) -> bool {
        if self.tree[node].is_pb_head() || !self.tree[node].pb_heads().is_empty() {
            return true;
        }

        self.tree
            .children(node)
            .iter()
            .any(|&child| self.has_propbank(child))
    }

    pub(crate) fn add_semantic_heads(&self, sentence: &mut Sentence) -> Result<(), ConvertError> {
        self.project_propbank(sentence, self.tree.root())?;
        remove_inherited_arguments(sentence);
        relabel_numbered_arguments(sentence);

        Ok(())
    }

    /// Project the predicate-argument arcs of every annotated node onto
    /// the sentence. A referent argument (a relative pronoun, or a
    /// prepositional phrase holding one) also projects the base label
    /// onto the pronoun's antecedent.
    fn project_propbank(&self, sentence: &mut Sentence, node: NodeId) -> Result<(), ConvertError> {
        if let Some(dependent) = self.dep_index(node) {
            if let Some(roleset) = self.tree[node].roleset() {
                if let Some(token) = sentence[dependent].token_mut() {
                    token
                        .features_mut()
                        .insert("pb".to_owned(), roleset.to_owned());
                }
            }

            for arc in self.tree[node].pb_heads().to_vec() {
                let head = match self.dep_index(arc.node) {
                    Some(head) => head,
                    None => continue,
                };

                let mut label = SrlLabel::short(&arc.label);

                if let Some(referent) = self.referent_argument(node) {
                    if let Some(relativizer) = english::relativizer(self.tree, referent) {
                        if let Some(ante) = self.tree[relativizer].antecedent() {
                            if let Some(ante) = self.dep_index(ante) {
                                if !sentence.is_semantic_argument_of(head, ante) {
                                    sentence.add_semantic(head, ante, label.clone())?;
                                }
                            }
                        }
                    }

                    label = label.referent();
                }

                if dependent != head && !sentence.is_semantic_argument_of(head, dependent) {
                    sentence.add_semantic(head, dependent, label)?;
                }
            }
        }

        for &child in self.tree.children(node) {
            self.project_propbank(sentence, child)?;
        }

        Ok(())
    }

    /// The wh-phrase this argument is realized through, if any.
    fn referent_argument(&self, node: NodeId) -> Option<NodeId> {
        if let Some(wh) = english::wh_phrase(self.tree, node) {
            return Some(wh);
        }

        if self.tree[node].is_tag(CTag::Pp) {
            for &child in self.tree.children(node) {
                if let Some(wh) = english::wh_phrase(self.tree, child) {
                    return Some(wh);
                }
            }
        }

        None
    }
}

/// Drop a semantic arc when an ancestor on the primary-head chain already
/// holds the same (predicate, label) arc: the argument was inherited from
/// a higher node.
fn remove_inherited_arguments(sentence: &mut Sentence) {
    for node in 1..sentence.len() {
        for triple in sentence.semantic_heads(node) {
            let label = triple.relation().expect("semantic arc with label").clone();

            if ancestor_has_argument(sentence, node, triple.head(), &label) {
                sentence.remove_semantic(triple.head(), node, &label);
            }
        }
    }
}

fn ancestor_has_argument(
    sentence: &Sentence,
    node: usize,
    predicate: usize,
    label: &SrlLabel,
) -> bool {
    let mut curr = match sentence.dep_graph().head(node) {
        Some(triple) => triple.head(),
        None => return false,
    };

    while curr != 0 {
        if sentence.is_semantic_argument_with(predicate, curr, label) {
            return true;
        }

        curr = match sentence.dep_graph().head(curr) {
            Some(triple) => triple.head(),
            None => return false,
        };
    }

    false
}

/// A numbered argument label that repeats for the same predicate marks a
/// continuation: the later arc takes a concatenation prefix. Referent and
/// modifier arcs are exempt.
fn relabel_numbered_arguments(sentence: &mut Sentence) {
    let mut seen: HashSet<(usize, String)> = HashSet::new();

    for node in 1..sentence.len() {
        for triple in sentence.semantic_heads(node) {
            let label = triple.relation().expect("semantic arc with label").clone();

            if label.is_referent() || label.is_modifier() {
                continue;
            }

            let key = (triple.head(), label.as_str().to_owned());

            if seen.contains(&key) {
                sentence.remove_semantic(triple.head(), node, &label);
                sentence
                    .add_semantic(triple.head(), node, label.concatenated())
                    .expect("relabel in bounds");
            } else {
                seen.insert(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use depgraph::graph::{DepTriple, Sentence};
    use depgraph::label::{DepLabel, SrlLabel};
    use depgraph::token::Token;

    #[test]
    fn inherited_arguments_are_removed() {
        let mut s: Sentence = vec![Token::new("men"), Token::new("who"), Token::new("came")]
            .into_iter()
            .collect();

        s.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some(DepLabel::Root), 1))
            .unwrap();
        s.dep_graph_mut()
            .add_deprel(DepTriple::new(3, Some(DepLabel::Nsubj), 2))
            .unwrap();
        s.dep_graph_mut()
            .add_deprel(DepTriple::new(1, Some(DepLabel::Rcmod), 3))
            .unwrap();

        // Both the pronoun and its governor carry A0 of "came"; the
        // pronoun's head chain passes through the governor, so its arc is
        // inherited.
        s.add_semantic(3, 1, SrlLabel::new("A0")).unwrap();
        s.add_semantic(3, 2, SrlLabel::new("A0")).unwrap();

        super::remove_inherited_arguments(&mut s);

        assert!(s.is_semantic_argument_of(3, 1));
        assert!(s.semantic_heads(2).is_empty());
    }

    #[test]
    fn duplicate_numbered_arguments_are_concatenated() {
        let mut s: Sentence = vec![Token::new("a"), Token::new("b"), Token::new("ran")]
            .into_iter()
            .collect();

        // No primary arcs: the duplicates are not in an ancestor
        // relation.
        s.add_semantic(3, 1, SrlLabel::new("A0")).unwrap();
        s.add_semantic(3, 2, SrlLabel::new("A0")).unwrap();

        super::relabel_numbered_arguments(&mut s);

        let first: Vec<String> = s
            .semantic_heads(1)
            .into_iter()
            .map(|t| t.relation().unwrap().as_str().to_owned())
            .collect();
        let second: Vec<String> = s
            .semantic_heads(2)
            .into_iter()
            .map(|t| t.relation().unwrap().as_str().to_owned())
            .collect();

        assert_eq!(first, vec!["A0".to_owned()]);
        assert_eq!(second, vec!["C-A0".to_owned()]);
    }

    #[test]
    fn referent_and_modifier_arcs_are_not_relabeled() {
        let mut s: Sentence = vec![Token::new("a"), Token::new("b")].into_iter().collect();

        s.add_semantic(2, 1, SrlLabel::new("AM-TMP")).unwrap();
        s.add_semantic(2, 1, SrlLabel::new("R-A0")).unwrap();
        s.add_semantic(1, 2, SrlLabel::new("AM-TMP")).unwrap();

        super::relabel_numbered_arguments(&mut s);

        let labels: Vec<String> = s
            .semantic_heads(1)
            .into_iter()
            .map(|t| t.relation().unwrap().as_str().to_owned())
            .collect();
        assert_eq!(labels, vec!["AM-TMP".to_owned(), "R-A0".to_owned()]);
    }
}
