//! The dependency labeling cascade.
//!
//! A label is picked by an ordered list of rules; the first rule that
//! yields a label wins. The order is part of the contract: reordering the
//! rules changes the output.

use cttree::english;
use cttree::node::NodeId;
use cttree::tag::{CTag, FTag};
use depgraph::label::DepLabel;

use crate::conv::Conversion;

pub(crate) const SEM_TAGS: &[FTag] = &[
    FTag::Bnf,
    FTag::Dir,
    FTag::Ext,
    FTag::Loc,
    FTag::Mnr,
    FTag::Prp,
    FTag::Tmp,
    FTag::Voc,
];

pub(crate) const SYN_TAGS: &[FTag] = &[
    FTag::Adv,
    FTag::Clf,
    FTag::Clr,
    FTag::Dtv,
    FTag::Nom,
    FTag::Prd,
    FTag::Put,
    FTag::Tpc,
];

const ADVCL_CLAUSE: &[CTag] = &[CTag::S, CTag::Sbar, CTag::Sinv];
const NPADVMOD_PHRASE: &[CTag] = &[CTag::Nml, CTag::Np, CTag::Qp];
const CCOMP_CLAUSE: &[CTag] = &[CTag::S, CTag::Sq, CTag::Sinv, CTag::Sbarq];
const NFMOD_PARENT: &[CTag] = &[CTag::Nml, CTag::Np, CTag::Whnp];
const COMP_PARENT_VERBAL: &[CTag] = &[CTag::Vp, CTag::Sinv, CTag::Sq];
const COMP_PARENT_ADJECTIVAL: &[CTag] = &[CTag::Adjp, CTag::Advp];
const NMOD_PARENT: &[CTag] = &[CTag::Nml, CTag::Np, CTag::Nx, CTag::Whnp];
const POSS_PARENT: &[CTag] = &[CTag::Np, CTag::Nml, CTag::Whnp, CTag::Qp, CTag::Adjp];
const META: &[CTag] = &[
    CTag::Edited,
    CTag::Embed,
    CTag::Lst,
    CTag::Meta,
    CTag::Code,
    CTag::Caption,
    CTag::Cit,
    CTag::Heading,
    CTag::Title,
];
const MARKER: &[CTag] = &[CTag::In, CTag::To, CTag::Dt];
const POSSESSIVE: &[CTag] = &[CTag::Prps, CTag::Wps];
const INTERJECTION: &[CTag] = &[CTag::Intj, CTag::Uh];
const PARTICLE: &[CTag] = &[CTag::Prt, CTag::Rp];
const NUMERIC: &[CTag] = &[CTag::Cd, CTag::Qp];
const DETERMINER: &[CTag] = &[CTag::Dt, CTag::Wdt, CTag::Wp];
const AUXILIARY: &[CTag] = &[CTag::Md, CTag::To];
const NOMINAL_MOD: &[CTag] = &[CTag::Nml, CTag::Np, CTag::Fw];
const ADJT_PHRASE: &[CTag] = &[CTag::Adjp, CTag::Whadjp];
const PREP_PHRASE: &[CTag] = &[CTag::Pp, CTag::Whpp];
const ADVB_PHRASE: &[CTag] = &[CTag::Adjp, CTag::Advp, CTag::Pp];
const PREPOSITION: &[CTag] = &[CTag::In, CTag::To];
const PARTICIPIAL: &[CTag] = &[CTag::Vbg, CTag::Vbn];

pub(crate) fn is_marker_tag(tag: CTag) -> bool {
    MARKER.contains(&tag)
}

/// One rule of the cascade.
pub(crate) struct LabelRule {
    pub(crate) name: &'static str,
    pub(crate) apply: fn(&mut Conversion, NodeId, NodeId, NodeId) -> Option<DepLabel>,
}

/// The cascade, in decision order.
pub(crate) const CASCADE: &[LabelRule] = &[
    LabelRule {
        name: "adverbial",
        apply: rule_adverbial,
    },
    LabelRule {
        name: "subject",
        apply: rule_subject,
    },
    LabelRule {
        name: "coordination",
        apply: rule_ucp,
    },
    LabelRule {
        name: "verbal-complement",
        apply: rule_verbal_complement,
    },
    LabelRule {
        name: "adjectival-complement",
        apply: rule_adjectival_complement,
    },
    LabelRule {
        name: "noun-modifying-clause",
        apply: rule_noun_modifying_clause,
    },
    LabelRule {
        name: "possessive",
        apply: rule_possessive,
    },
    LabelRule {
        name: "simple",
        apply: rule_simple,
    },
    LabelRule {
        name: "preposition-object",
        apply: rule_preposition_object,
    },
    LabelRule {
        name: "clausal-adjunct",
        apply: rule_clausal_adjunct,
    },
    LabelRule {
        name: "clausal-complement",
        apply: rule_clausal_complement,
    },
    LabelRule {
        name: "quantifier",
        apply: rule_quantifier,
    },
    LabelRule {
        name: "noun-modifier",
        apply: rule_noun_modifier,
    },
    LabelRule {
        name: "head-chain",
        apply: rule_head_chain,
    },
    LabelRule {
        name: "adverbial-phrase",
        apply: rule_adverbial_phrase,
    },
    LabelRule {
        name: "tentative",
        apply: rule_tentative,
    },
];

impl<'a> Conversion<'a> {
    /// The dependency label for child `c` of parent `p` whose chosen head
    /// is `head`.
    pub(crate) fn dep_label(&mut self, c: NodeId, p: NodeId, head: NodeId) -> DepLabel {
        for rule in CASCADE {
            if let Some(label) = (rule.apply)(self, c, p, head) {
                return label;
            }
        }

        DepLabel::Dep
    }

    // ============================= Helpers =============================

    pub(crate) fn has_adverbial_tag(&self, node: NodeId) -> bool {
        self.tree[node].has_ftag(FTag::Adv) || self.tree[node].has_ftag_any(SEM_TAGS)
    }

    pub(crate) fn is_intj(&self, node: NodeId) -> bool {
        self.tree[node].is_tag_any(INTERJECTION)
    }

    pub(crate) fn is_meta(&self, node: NodeId) -> bool {
        self.tree[node].is_tag_any(META)
    }

    fn is_prn(&self, node: NodeId) -> bool {
        self.tree[node].is_tag(CTag::Prn)
    }

    fn is_prt(&self, node: NodeId) -> bool {
        self.tree[node].is_tag_any(PARTICLE)
    }

    fn is_hyph(&self, node: NodeId) -> bool {
        self.tree[node].is_tag(CTag::Hyph)
    }

    fn is_amod(&self, node: NodeId) -> bool {
        self.tree[node].is_tag_any(ADJT_PHRASE) || self.tree[node].tag().is_adjective()
    }

    fn is_acomp(&self, node: NodeId) -> bool {
        self.tree[node].is_tag(CTag::Adjp)
    }

    fn is_adv(&self, c: NodeId) -> bool {
        if !self.tree[c].is_tag(CTag::Advp) && !self.tree[c].tag().is_adverb() {
            return false;
        }

        // A trailing adverb of a preposition is part of the preposition
        // group, not an adverbial.
        if let Some(parent) = self.tree.parent(c) {
            if self.tree[parent].is_tag_any(PREP_PHRASE)
                && self.tree.right_sibling(c).is_none()
                && self
                    .tree
                    .left_sibling(c)
                    .map(|sib| self.tree[sib].is_tag_any(PREPOSITION))
                    .unwrap_or(false)
            {
                return false;
            }
        }

        true
    }

    fn is_oprd(&self, c: NodeId) -> bool {
        if self.tree[c].has_ftag(FTag::Oprd) {
            return true;
        }

        if self.tree[c].is_tag(CTag::S)
            && !self
                .tree
                .contains_child(c, |t, n| t[n].is_tag(CTag::Vp))
            && self
                .tree
                .contains_child(c, |t, n| t[n].has_ftag(FTag::Prd))
        {
            return self
                .tree
                .first_child(c, |t, n| t[n].has_ftag(FTag::Sbj))
                .map(|sbj| self.tree.is_empty_category_terminal(sbj))
                .unwrap_or(false);
        }

        false
    }

    fn is_poss(&self, c: NodeId, p: NodeId) -> bool {
        if self.tree[c].is_tag_any(POSSESSIVE) {
            return true;
        }

        if self.tree[p].is_tag_any(POSS_PARENT) {
            return self
                .tree
                .contains_child(c, |t, n| t[n].is_tag(CTag::Pos));
        }

        false
    }

    pub(crate) fn is_xcomp(&self, c: NodeId) -> bool {
        if self.tree[c].is_tag(CTag::S) {
            let sbj = self.tree.first_child(c, |t, n| t[n].has_ftag(FTag::Sbj));

            if self
                .tree
                .contains_child(c, |t, n| t[n].is_tag(CTag::Vp))
                && sbj
                    .map(|sbj| self.tree.is_empty_category_terminal(sbj))
                    .unwrap_or(true)
            {
                return true;
            }
        } else if self.tree[c].has_ftag(FTag::Rcmod) {
            if let Some(s) = self.tree.first_child(c, |t, n| t[n].is_tag(CTag::S)) {
                return self.is_xcomp(s);
            }
        }

        false
    }

    fn is_ccomp(&mut self, c: NodeId) -> bool {
        if self.tree[c].is_tag_any(CCOMP_CLAUSE) {
            return true;
        }

        if !self.tree[c].is_tag(CTag::Sbar) {
            return false;
        }

        if let Some(comp) = self
            .tree
            .first_child(c, |t, n| t[n].is_tag(CTag::None))
        {
            if self.tree[comp].is_form("0") {
                return true;
            }
        }

        if let Some(comp) = self
            .tree
            .first_child(c, |t, n| t[n].is_tag_any(&[CTag::In, CTag::Dt]))
        {
            if is_complementizer_form(self.tree[comp].form().unwrap_or("")) {
                self.seed_label(comp, DepLabel::Complm);
                return true;
            }
        }

        self.tree[c].has_ftag(FTag::Rcmod)
            || self
                .tree
                .contains_child(c, |t, n| t[n].tag().is_wh_phrase())
    }

    fn is_nfmod(&self, c: NodeId) -> bool {
        self.is_xcomp(c) || self.tree[c].is_tag(CTag::Vp)
    }

    fn is_inf_mod(&self, c: NodeId) -> bool {
        let vp = if self.tree[c].is_tag(CTag::Vp) {
            Some(c)
        } else {
            self.tree
                .first_descendant(c, |t, n| t[n].is_tag(CTag::Vp))
        };

        let mut vp = match vp {
            Some(vp) => vp,
            None => return false,
        };

        let mut vc = self.tree.first_child(vp, |t, n| t[n].is_tag(CTag::Vp));

        while let Some(v) = vc {
            vp = v;

            if self
                .tree
                .left_nearest_sibling(vp, |t, n| t[n].is_tag(CTag::To))
                .is_some()
            {
                return true;
            }

            vc = self.tree.first_child(vp, |t, n| t[n].is_tag(CTag::Vp));
        }

        self.tree
            .contains_child(vp, |t, n| t[n].is_tag(CTag::To))
    }

    fn is_rcmod(&self, c: NodeId) -> bool {
        self.tree[c].is_tag(CTag::Rrc)
            || self.tree[c].has_ftag(FTag::Rcmod)
            || (self.tree[c].is_tag(CTag::Sbar)
                && self
                    .tree
                    .contains_child(c, |t, n| t[n].tag().is_wh_phrase()))
    }

    fn subject_label(&self, c: NodeId, d: NodeId) -> Option<DepLabel> {
        if self.tree[c].has_ftag(FTag::Sbj) {
            if english::is_clause(self.tree, c) {
                Some(DepLabel::Csubj)
            } else if self.tree[d].is_tag(CTag::Ex) {
                Some(DepLabel::Expl)
            } else {
                Some(DepLabel::Nsubj)
            }
        } else if self.tree[c].has_ftag(FTag::Lgs) {
            Some(DepLabel::Agent)
        } else {
            None
        }
    }

    fn object_label(&self, c: NodeId) -> Option<DepLabel> {
        if self.tree[c].is_tag_any(english::NP_NML) {
            if self.tree[c].has_ftag(FTag::Prd) {
                Some(DepLabel::Attr)
            } else {
                Some(DepLabel::Dobj)
            }
        } else {
            None
        }
    }

    pub(crate) fn aux_label(&self, c: NodeId) -> Option<DepLabel> {
        if self.tree[c].is_tag_any(AUXILIARY) {
            return Some(DepLabel::Aux);
        }

        if !self.tree[c].tag().is_verb() {
            return None;
        }

        let vp = self
            .tree
            .right_nearest_sibling(c, |t, n| t[n].is_tag(CTag::Vp))?;

        if english::is_passive_auxiliary(self.tree[c].form().unwrap_or("")) {
            if self
                .tree
                .contains_child(vp, |t, n| t[n].is_tag_any(english::VBD_VBN))
            {
                return Some(DepLabel::Auxpass);
            }

            if !self
                .tree
                .contains_child(vp, |t, n| t[n].tag().is_verb())
            {
                if let Some(vp2) = self.tree.first_child(vp, |t, n| t[n].is_tag(CTag::Vp)) {
                    if self
                        .tree
                        .contains_child(vp2, |t, n| t[n].is_tag_any(english::VBD_VBN))
                    {
                        return Some(DepLabel::Auxpass);
                    }
                }
            }
        }

        Some(DepLabel::Aux)
    }

    fn nmod_label(&self, c: NodeId) -> DepLabel {
        let node = &self.tree[c];

        if node.is_tag_any(PARTICIPIAL) {
            DepLabel::Amod
        } else if node.is_tag_any(DETERMINER) {
            DepLabel::Det
        } else if node.is_tag_any(NOMINAL_MOD) || node.tag().is_noun() {
            DepLabel::Nn
        } else if node.is_tag_any(NUMERIC) {
            DepLabel::Num
        } else if node.is_tag(CTag::Pos) {
            DepLabel::Possessive
        } else if node.is_tag(CTag::Pdt) {
            DepLabel::Predet
        } else {
            DepLabel::Nmod
        }
    }

    fn pmod_label(&self, c: NodeId, d: NodeId) -> DepLabel {
        if self.tree[c].is_tag_any(english::NP_NML) || self.tree[d].tag().is_relativizer() {
            DepLabel::Pobj
        } else {
            DepLabel::Pcomp
        }
    }

    fn simple_label(&self, c: NodeId) -> Option<DepLabel> {
        if self.is_hyph(c) {
            return Some(DepLabel::Hyph);
        }

        if self.is_amod(c) {
            return Some(DepLabel::Amod);
        }

        if self.tree[c].is_tag_any(PREP_PHRASE) {
            return Some(DepLabel::Prep);
        }

        if english::is_correlative_conjunction(self.tree, c) {
            return Some(DepLabel::Preconj);
        }

        if english::is_conjunction(self.tree, c) {
            return Some(DepLabel::Cc);
        }

        if self.is_prt(c) {
            return Some(DepLabel::Prt);
        }

        self.special_label(c)
    }

    pub(crate) fn special_label(&self, c: NodeId) -> Option<DepLabel> {
        let d = self.info(c).terminal_head;

        if english::is_punctuation(self.tree, c) || english::is_punctuation(self.tree, d) {
            return Some(DepLabel::Punct);
        }

        if self.is_intj(c) || self.is_intj(d) {
            return Some(DepLabel::Intj);
        }

        if self.is_meta(c) {
            return Some(DepLabel::Meta);
        }

        if self.is_prn(c) {
            return Some(DepLabel::Parataxis);
        }

        if self.is_adv(c) {
            return Some(DepLabel::Advmod);
        }

        None
    }
}

// ============================= Cascade rules =============================

fn rule_adverbial(conv: &mut Conversion, c: NodeId, _p: NodeId, _h: NodeId) -> Option<DepLabel> {
    if !conv.has_adverbial_tag(c) {
        return None;
    }

    if conv.tree[c].is_tag_any(ADVCL_CLAUSE) {
        return Some(DepLabel::Advcl);
    }

    if conv.tree[c].is_tag_any(NPADVMOD_PHRASE) {
        return Some(DepLabel::Npadvmod);
    }

    None
}

fn rule_subject(conv: &mut Conversion, c: NodeId, _p: NodeId, _h: NodeId) -> Option<DepLabel> {
    let d = conv.info(c).terminal_head;
    conv.subject_label(c, d)
}

/// A coordination of unlike phrases takes the label of its head conjunct,
/// with the function tags of both merged (set union, no overwrite).
fn rule_ucp(conv: &mut Conversion, c: NodeId, p: NodeId, h: NodeId) -> Option<DepLabel> {
    if !conv.tree[c].is_tag(CTag::Ucp) {
        return None;
    }

    let head_conjunct = conv.info(c).nonterminal_head;
    let ftags: Vec<FTag> = conv.tree[c].ftags().iter().copied().collect();
    conv.tree[head_conjunct].add_ftags(ftags);

    Some(conv.dep_label(head_conjunct, p, h))
}

fn rule_verbal_complement(
    conv: &mut Conversion,
    c: NodeId,
    p: NodeId,
    _h: NodeId,
) -> Option<DepLabel> {
    if !conv.tree[p].is_tag_any(COMP_PARENT_VERBAL) {
        return None;
    }

    if conv.is_acomp(c) {
        return Some(DepLabel::Acomp);
    }

    if let Some(label) = conv.object_label(c) {
        return Some(label);
    }

    if conv.is_oprd(c) {
        return Some(DepLabel::Oprd);
    }

    if conv.is_xcomp(c) {
        return Some(DepLabel::Xcomp);
    }

    if conv.is_ccomp(c) {
        return Some(DepLabel::Ccomp);
    }

    conv.aux_label(c)
}

fn rule_adjectival_complement(
    conv: &mut Conversion,
    c: NodeId,
    p: NodeId,
    _h: NodeId,
) -> Option<DepLabel> {
    if !conv.tree[p].is_tag_any(COMP_PARENT_ADJECTIVAL) {
        return None;
    }

    if conv.is_xcomp(c) {
        return Some(DepLabel::Xcomp);
    }

    if conv.is_ccomp(c) {
        return Some(DepLabel::Ccomp);
    }

    None
}

fn rule_noun_modifying_clause(
    conv: &mut Conversion,
    c: NodeId,
    p: NodeId,
    _h: NodeId,
) -> Option<DepLabel> {
    if !conv.tree[p].is_tag_any(NFMOD_PARENT) {
        return None;
    }

    if conv.is_nfmod(c) {
        return if conv.is_inf_mod(c) {
            Some(DepLabel::Infmod)
        } else {
            Some(DepLabel::Partmod)
        };
    }

    if conv.is_rcmod(c) {
        return Some(DepLabel::Rcmod);
    }

    if conv.is_ccomp(c) {
        return Some(DepLabel::Ccomp);
    }

    None
}

fn rule_possessive(conv: &mut Conversion, c: NodeId, p: NodeId, _h: NodeId) -> Option<DepLabel> {
    if conv.is_poss(c, p) {
        Some(DepLabel::Poss)
    } else {
        None
    }
}

fn rule_simple(conv: &mut Conversion, c: NodeId, _p: NodeId, _h: NodeId) -> Option<DepLabel> {
    conv.simple_label(c)
}

fn rule_preposition_object(
    conv: &mut Conversion,
    c: NodeId,
    p: NodeId,
    h: NodeId,
) -> Option<DepLabel> {
    if !conv.tree[p].is_tag_any(PREP_PHRASE) {
        return None;
    }

    let d = conv.info(c).terminal_head;
    let head_parent = conv.tree.parent(h);
    let child_parent = conv.tree.parent(c);

    if head_parent.is_some() && head_parent == child_parent {
        // The head and the child are siblings: objects follow their
        // preposition.
        let parent = head_parent.expect("checked parent");
        let children = conv.tree.children(parent);
        let hi = children.iter().position(|&n| n == h);
        let ci = children.iter().position(|&n| n == c);

        if let (Some(hi), Some(ci)) = (hi, ci) {
            if hi < ci {
                return Some(conv.pmod_label(c, d));
            }
        }
    } else {
        // Coordinated prepositions: compare surface order.
        let ht = conv
            .tree
            .first_terminal(h)
            .and_then(|t| conv.tree[t].terminal_id());
        let ct = conv
            .tree
            .first_terminal(c)
            .and_then(|t| conv.tree[t].terminal_id());

        if let (Some(ht), Some(ct)) = (ht, ct) {
            if ht < ct {
                return Some(conv.pmod_label(c, d));
            }
        }
    }

    None
}

fn rule_clausal_adjunct(conv: &mut Conversion, c: NodeId, p: NodeId, _h: NodeId) -> Option<DepLabel> {
    if conv.tree[c].is_tag(CTag::Sbar)
        || conv.is_xcomp(c)
        || (conv.tree[p].is_tag(CTag::Pp) && english::is_clause(conv.tree, c))
    {
        Some(DepLabel::Advcl)
    } else {
        None
    }
}

fn rule_clausal_complement(
    conv: &mut Conversion,
    c: NodeId,
    _p: NodeId,
    _h: NodeId,
) -> Option<DepLabel> {
    if conv.tree[c].is_tag_any(CCOMP_CLAUSE) {
        Some(DepLabel::Ccomp)
    } else {
        None
    }
}

fn rule_quantifier(conv: &mut Conversion, c: NodeId, p: NodeId, _h: NodeId) -> Option<DepLabel> {
    if !conv.tree[p].is_tag(CTag::Qp) {
        return None;
    }

    if conv.tree[c].is_tag(CTag::Cd) {
        Some(DepLabel::Number)
    } else {
        Some(DepLabel::Quantmod)
    }
}

fn rule_noun_modifier(conv: &mut Conversion, c: NodeId, p: NodeId, h: NodeId) -> Option<DepLabel> {
    if conv.tree[p].is_tag_any(NMOD_PARENT) || conv.tree[h].tag().is_noun() {
        Some(conv.nmod_label(c))
    } else {
        None
    }
}

fn rule_head_chain(conv: &mut Conversion, c: NodeId, _p: NodeId, _h: NodeId) -> Option<DepLabel> {
    let chain_head = conv.info(c).nonterminal_head;
    let d = conv.info(c).terminal_head;

    if let Some(label) = conv.simple_label(chain_head) {
        return Some(label);
    }

    if conv.tree[d].is_tag(CTag::In) {
        return Some(DepLabel::Prep);
    }

    if conv.tree[d].tag().is_adverb() {
        return Some(DepLabel::Advmod);
    }

    None
}

fn rule_adverbial_phrase(
    conv: &mut Conversion,
    c: NodeId,
    p: NodeId,
    h: NodeId,
) -> Option<DepLabel> {
    if !(conv.tree[p].is_tag_any(ADVB_PHRASE)
        || conv.tree[h].tag().is_adjective()
        || conv.tree[h].tag().is_adverb())
    {
        return None;
    }

    if conv.tree[c].is_tag_any(NPADVMOD_PHRASE) || conv.tree[c].tag().is_noun() {
        Some(DepLabel::Npadvmod)
    } else {
        Some(DepLabel::Advmod)
    }
}

/// Labels seeded earlier (hyphen compounds, complementizers) surface when
/// nothing else matched.
fn rule_tentative(conv: &mut Conversion, c: NodeId, _p: NodeId, _h: NodeId) -> Option<DepLabel> {
    let d = conv.info(c).terminal_head;
    conv.seeded_label(d)
}

fn is_complementizer_form(form: &str) -> bool {
    matches!(form.to_lowercase().as_str(), "that" | "if" | "whether")
}

#[cfg(test)]
mod tests {
    use super::CASCADE;

    #[test]
    fn cascade_order_is_fixed() {
        let names: Vec<_> = CASCADE.iter().map(|rule| rule.name).collect();

        assert_eq!(
            names,
            vec![
                "adverbial",
                "subject",
                "coordination",
                "verbal-complement",
                "adjectival-complement",
                "noun-modifying-clause",
                "possessive",
                "simple",
                "preposition-object",
                "clausal-adjunct",
                "clausal-complement",
                "quantifier",
                "noun-modifier",
                "head-chain",
                "adverbial-phrase",
                "tentative",
            ]
        );
    }
}
