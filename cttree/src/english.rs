//! English-specific tag classes, word classes and tree preprocessing.
//!
//! Preprocessing fixes inconsistent function tags and links reduced
//! passive empty categories and relativizers to their antecedents.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::node::NodeId;
use crate::tag::{CTag, FTag};
use crate::tree::CTTree;

pub const NP_NML: &[CTag] = &[CTag::Np, CTag::Nml];
pub const VBD_VBN: &[CTag] = &[CTag::Vbd, CTag::Vbn];
pub const VP_RRC_UCP: &[CTag] = &[CTag::Vp, CTag::Rrc, CTag::Ucp];

const LGS_PHRASE: &[CTag] = &[CTag::Pp, CTag::Sbar];
const MAIN_CLAUSE: &[CTag] = &[CTag::S, CTag::Sq, CTag::Sinv];
const EDITED_PHRASE: &[CTag] = &[CTag::Edited, CTag::Embed];
const NOMINAL_PHRASE: &[CTag] = &[CTag::Np, CTag::Nml, CTag::Nx, CTag::Nac];
const WH_LINK: &[CTag] = &[CTag::Whnp, CTag::Whpp, CTag::Whadvp];
const SEPARATOR: &[CTag] = &[CTag::Comma, CTag::Colon];
const CONJUNCTION: &[CTag] = &[CTag::Cc, CTag::Conjp];

lazy_static! {
    static ref PASSIVE_AUX: HashSet<&'static str> = [
        "be", "been", "being", "am", "is", "was", "are", "were", "'m", "'s", "'re", "become",
        "becomes", "became", "becoming", "get", "gets", "got", "gotten", "getting",
    ]
    .iter()
    .cloned()
    .collect();
    static ref NEGATION: HashSet<&'static str> =
        ["never", "not", "n't", "'nt", "no"].iter().cloned().collect();
    static ref RELATIVIZER: HashSet<&'static str> = [
        "how",
        "however",
        "that",
        "what",
        "whatever",
        "whatsoever",
        "when",
        "whenever",
        "where",
        "whereby",
        "wherein",
        "whereupon",
        "wherever",
        "which",
        "whichever",
        "whither",
        "who",
        "whoever",
        "whom",
        "whose",
        "why",
    ]
    .iter()
    .cloned()
    .collect();
    static ref LINKING_RELATIVIZER: HashSet<&'static str> = [
        "0", "that", "when", "where", "whereby", "wherein", "whereupon", "which", "who", "whom",
        "whose",
    ]
    .iter()
    .cloned()
    .collect();
    static ref CORRELATIVE_CONJUNCTION: HashSet<&'static str> =
        ["either", "neither", "whether", "both"].iter().cloned().collect();
}

// ======================== Word classes ========================

/// Inflections of *be*, *become* and *get*.
pub fn is_passive_auxiliary(form: &str) -> bool {
    PASSIVE_AUX.contains(form.to_lowercase().as_str())
}

pub fn is_negation(form: &str) -> bool {
    NEGATION.contains(form.to_lowercase().as_str())
}

pub fn is_relativizer_form(form: &str) -> bool {
    RELATIVIZER.contains(form.to_lowercase().as_str())
}

pub fn is_linking_relativizer(form: &str) -> bool {
    LINKING_RELATIVIZER.contains(form.to_lowercase().as_str())
}

pub fn is_correlative_conjunction_form(form: &str) -> bool {
    CORRELATIVE_CONJUNCTION.contains(form.to_lowercase().as_str())
}

// ======================== Tag classes ========================

pub fn is_clause(tree: &CTTree, id: NodeId) -> bool {
    is_main_clause(tree, id) || is_subordinate_clause(tree, id)
}

/// `S|SQ|SINV`.
pub fn is_main_clause(tree: &CTTree, id: NodeId) -> bool {
    tree[id].is_tag_any(MAIN_CLAUSE)
}

pub fn is_subordinate_clause(tree: &CTTree, id: NodeId) -> bool {
    matches!(tree[id].tag(), CTag::Sbar | CTag::Sbarq)
}

pub fn is_nominal_phrase(tree: &CTTree, id: NodeId) -> bool {
    tree[id].is_tag_any(NOMINAL_PHRASE)
}

pub fn is_wh_phrase(tree: &CTTree, id: NodeId) -> bool {
    tree[id].tag().is_wh_phrase()
}

/// Wh-phrases that can link to an antecedent: `WHNP|WHPP|WHADVP`.
pub fn is_wh_phrase_link(tree: &CTTree, id: NodeId) -> bool {
    tree[id].is_tag_any(WH_LINK)
}

pub fn is_conjunction(tree: &CTTree, id: NodeId) -> bool {
    tree[id].is_tag_any(CONJUNCTION)
}

pub fn is_separator(tree: &CTTree, id: NodeId) -> bool {
    tree[id].is_tag_any(SEPARATOR)
}

pub fn is_coordinator(tree: &CTTree, id: NodeId) -> bool {
    is_conjunction(tree, id) || is_separator(tree, id)
}

pub fn is_punctuation(tree: &CTTree, id: NodeId) -> bool {
    tree[id].tag().is_punctuation()
}

pub fn is_correlative_conjunction(tree: &CTTree, id: NodeId) -> bool {
    if tree[id].is_tag(CTag::Cc) {
        tree[id]
            .form()
            .map(is_correlative_conjunction_form)
            .unwrap_or(false)
    } else if tree[id].is_tag(CTag::Conjp) {
        tree.forms_under(id).to_lowercase() == "not only"
    } else {
        false
    }
}

/// *Et cetera* conjuncts close a coordination without a conjunction.
pub fn is_etc(tree: &CTTree, id: NodeId) -> bool {
    if tree[id].has_ftag(FTag::Etc) {
        return true;
    }

    tree.first_terminal(id)
        .map(|t| tree[t].is_form_ignore_case("etc."))
        .unwrap_or(false)
}

pub fn is_edited_phrase(tree: &CTTree, id: NodeId) -> bool {
    chained(tree, id, |t, n| t[n].is_tag(CTag::Edited)).is_some()
}

/// Discontinuous empty categories: `*ICH*`, `*PPA*`, `*RNR*`.
pub fn is_discontinuous(tree: &CTTree, id: NodeId) -> bool {
    tree[id].form_starts_with("*ICH*") || tree[id].form_starts_with("*PPA*") || is_rnr(tree, id)
}

pub fn is_rnr(tree: &CTTree, id: NodeId) -> bool {
    tree[id].form_starts_with("*RNR*")
}

/// Match the node itself, or follow a chain of only children to the first
/// matching node.
pub fn chained<P>(tree: &CTTree, id: NodeId, pred: P) -> Option<NodeId>
where
    P: Fn(&CTTree, NodeId) -> bool,
{
    let mut curr = id;

    loop {
        if pred(tree, curr) {
            return Some(curr);
        }

        match tree.children(curr) {
            [only] => curr = *only,
            _ => return None,
        }
    }
}

/// The wh-phrase at this node, possibly behind a chain of only children.
pub fn wh_phrase(tree: &CTTree, id: NodeId) -> Option<NodeId> {
    chained(tree, id, is_wh_phrase)
}

/// The first relativizer terminal under a wh-phrase.
pub fn relativizer(tree: &CTTree, id: NodeId) -> Option<NodeId> {
    if !is_wh_phrase(tree, id) {
        return None;
    }

    let terminals = tree.terminals_under(id);

    if tree.is_empty_category_terminal(id) {
        return terminals.first().copied();
    }

    if let Some(&term) = terminals
        .iter()
        .find(|&&t| tree[t].tag().is_relativizer())
    {
        return Some(term);
    }

    terminals
        .iter()
        .find(|&&t| tree[t].form().map(is_relativizer_form).unwrap_or(false))
        .copied()
}

// ======================== Coordination ========================

/// Whether `siblings` (a slice of children of `parent`) contain a
/// coordination structure.
pub fn contains_coordination(tree: &CTTree, parent: NodeId, siblings: &[NodeId]) -> bool {
    if tree[parent].is_tag(CTag::Ucp) {
        return true;
    }

    if tree[parent].is_tag_any(NP_NML) && contains_etc(tree, siblings) {
        return true;
    }

    siblings.iter().any(|&c| is_conjunction(tree, c))
}

fn contains_etc(tree: &CTTree, siblings: &[NodeId]) -> bool {
    for &child in siblings.iter().skip(1).rev() {
        if is_punctuation(tree, child) {
            continue;
        }

        return is_etc(tree, child);
    }

    false
}

// ======================== Preprocessing ========================

/// Fix inconsistent function tags and link the antecedents of reduced
/// passive nulls and relativizers.
pub fn preprocess(tree: &mut CTTree) {
    fix_function_tags(tree);
    link_reduced_passive_nulls(tree);
    link_relativizers(tree);
}

/// Fix inconsistent function tags in the tree.
pub fn fix_function_tags(tree: &mut CTTree) {
    fix_function_tags_aux(tree, tree.root());
}

fn fix_function_tags_aux(tree: &mut CTTree, id: NodeId) {
    let _ = fix_sbj(tree, id) || fix_lgs(tree, id) || fix_clf(tree, id);

    for child in tree.children(id).to_vec() {
        fix_function_tags_aux(tree, child);
    }
}

/// A lone `SBJ` child passes the tag, and its constituent tag, up to its
/// parent.
fn fix_sbj(tree: &mut CTTree, id: NodeId) -> bool {
    if !tree[id].has_ftag(FTag::Sbj) {
        return false;
    }

    let parent = match tree.parent(id) {
        Some(parent) => parent,
        None => return false,
    };

    if tree.children(parent).len() != 1
        || tree[parent].is_tag_any(EDITED_PHRASE)
        || !tree[parent].has_no_ftag()
    {
        return false;
    }

    tree[id].remove_ftag(FTag::Sbj);
    tree[parent].add_ftag(FTag::Sbj);
    let tag = tree[id].tag();
    tree[parent].set_tag(tag);

    true
}

/// `LGS` belongs on the prepositional phrase, not inside it.
fn fix_lgs(tree: &mut CTTree, id: NodeId) -> bool {
    if !tree[id].has_ftag(FTag::Lgs) || tree[id].is_tag(CTag::Pp) {
        return false;
    }

    let parent = match tree.parent(id) {
        Some(parent) => parent,
        None => return false,
    };

    if !tree[parent].is_tag_any(LGS_PHRASE) {
        return false;
    }

    tree[id].remove_ftag(FTag::Lgs);
    tree[parent].add_ftag(FTag::Lgs);

    true
}

/// `CLF` on a main clause moves to the first subordinate-clause
/// descendant (or is dropped when there is none).
fn fix_clf(tree: &mut CTTree, id: NodeId) -> bool {
    if !tree[id].has_ftag(FTag::Clf) || !is_main_clause(tree, id) {
        return false;
    }

    let desc = tree.first_descendant(id, is_subordinate_clause);
    tree[id].remove_ftag(FTag::Clf);

    match desc {
        Some(desc) => {
            tree[desc].add_ftag(FTag::Clf);
            true
        }
        None => false,
    }
}

// ======================== Passive nulls ========================

/// Find reduced passive empty categories (`*`) and link them to their
/// antecedents. Most but not all antecedents are found; parenthetical
/// phrases and topicalization can defeat the search.
pub fn link_reduced_passive_nulls(tree: &mut CTTree) {
    link_reduced_passive_nulls_aux(tree, tree.root());
}

fn link_reduced_passive_nulls_aux(tree: &mut CTTree, curr: NodeId) {
    if is_passive_empty_category(tree, curr) && tree[curr].is_form("*") {
        link_reduced_passive_null(tree, curr);
    }

    for child in tree.children(curr).to_vec() {
        link_reduced_passive_nulls_aux(tree, child);
    }
}

fn link_reduced_passive_null(tree: &mut CTTree, curr: NodeId) {
    let mut parent = match tree.parent(curr) {
        Some(parent) => parent,
        None => return,
    };

    // When the verb phrase of the participle is itself a trace, follow the
    // trace group to the filler site.
    if let Some(index) = tree.parent(parent).and_then(|gp| tree[gp].co_index()) {
        if let Some(&first) = tree.ec_group(index).first() {
            parent = first;
        }
    }

    let vp = match tree.highest_chained_ancestor(parent, |t, n| t[n].is_tag_any(VP_RRC_UCP)) {
        Some(vp) => vp,
        None => return,
    };
    let vp_parent = match tree.parent(vp) {
        Some(vp_parent) => vp_parent,
        None => return,
    };

    if tree[vp_parent].is_tag_any(NP_NML) || tree[vp_parent].has_ftag(FTag::Nom) {
        let ante = tree
            .left_nearest_sibling(vp, |t, n| t[n].is_tag_any(NP_NML))
            .or_else(|| tree.left_nearest_sibling(vp, |t, n| t[n].tag().is_noun()))
            .or_else(|| tree.left_nearest_sibling(vp, |t, n| t[n].is_tag(CTag::Qp)))
            .or_else(|| tree.left_nearest_sibling(vp, |t, n| t[n].has_ftag(FTag::Nom)));
        tree[curr].set_antecedent(ante);
    } else if is_clause(tree, vp_parent) {
        let subject = |t: &CTTree, n: NodeId| t[n].is_tag(CTag::Np) && t[n].has_ftag(FTag::Sbj);
        let ante = tree
            .left_nearest_sibling(vp, subject)
            // Topicalized verb phrase: the subject follows.
            .or_else(|| tree.right_nearest_sibling(vp, subject));
        tree[curr].set_antecedent(ante);
    }
}

/// A passive null: `*` or `*-n` under an unlabeled object `NP` of a `VP`,
/// right of a `VBD|VBN`.
pub fn is_passive_empty_category(tree: &CTTree, id: NodeId) -> bool {
    if !tree[id].is_empty_category() || !is_passive_null_form(tree[id].form().unwrap_or("")) {
        return false;
    }

    let parent = match tree.parent(id) {
        Some(parent) => parent,
        None => return false,
    };

    if !tree[parent].is_tag(CTag::Np) || !tree[parent].has_no_ftag() {
        return false;
    }

    match tree.parent(parent) {
        Some(gp) if tree[gp].is_tag(CTag::Vp) => (),
        _ => return false,
    }

    tree.left_sibling(parent)
        .map(|sib| tree[sib].is_tag_any(VBD_VBN))
        .unwrap_or(false)
}

/// `*` or `*-n`.
pub fn is_passive_null_form(form: &str) -> bool {
    if form == "*" {
        return true;
    }

    match form.strip_prefix("*-") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

// ======================== Relativizers ========================

/// Find relativizers and link them to their antecedents. Relativizers
/// under predicate phrases are linked only when the wh-phrase type agrees
/// with the antecedent phrase type.
pub fn link_relativizers(tree: &mut CTTree) {
    link_relativizers_aux(tree, tree.root());
}

fn link_relativizers_aux(tree: &mut CTTree, curr: NodeId) {
    if is_wh_phrase_link(tree, curr) {
        link_relativizer(tree, curr);
        return;
    }

    for child in tree.children(curr).to_vec() {
        link_relativizers_aux(tree, child);
    }
}

fn link_relativizer(tree: &mut CTTree, curr: NodeId) {
    let comp = match relativizer(tree, curr) {
        Some(comp) => comp,
        None => return,
    };
    let mut sbar = match tree.highest_chained_ancestor(curr, |t, n| t[n].is_tag(CTag::Sbar)) {
        Some(sbar) => sbar,
        None => return,
    };

    if tree[sbar].has_ftag(FTag::Nom)
        || !is_linking_relativizer(tree[comp].form().unwrap_or(""))
    {
        return;
    }

    // A co-indexed SBAR is a trace of the real clause site; a UCP parent
    // stands for the whole coordination.
    if let Some(index) = tree[sbar].co_index() {
        for &ec in tree.ec_group(index) {
            if tree[ec].form_starts_with("*ICH*") {
                if let Some(p) = tree.parent(ec) {
                    if tree[p].is_tag(CTag::Sbar) {
                        sbar = p;
                        break;
                    }
                }
            }
        }
    } else if let Some(p) = tree.parent(sbar) {
        if tree[p].is_tag(CTag::Ucp) {
            sbar = p;
        }
    }

    let sbar_parent = match tree.parent(sbar) {
        Some(p) => p,
        None => return,
    };

    match tree[sbar_parent].tag() {
        CTag::Np => {
            if let Some(ante) = tree.left_nearest_sibling(sbar, |t, n| t[n].is_tag(CTag::Np)) {
                tree[comp].set_antecedent(Some(ante));
            }
        }
        CTag::Advp => {
            if let Some(ante) = tree.left_nearest_sibling(sbar, |t, n| t[n].is_tag(CTag::Advp)) {
                tree[comp].set_antecedent(Some(ante));
            }
        }
        CTag::Vp => {
            if let Some(ante) = tree.left_nearest_sibling(sbar, |t, n| t[n].has_ftag(FTag::Prd)) {
                if tree[sbar].has_ftag(FTag::Clf)
                    || (tree[curr].is_tag(CTag::Whnp) && tree[ante].is_tag(CTag::Np))
                    || (tree[curr].is_tag(CTag::Whpp) && tree[ante].is_tag(CTag::Pp))
                    || (tree[curr].is_tag(CTag::Whadvp) && tree[ante].is_tag(CTag::Advp))
                {
                    tree[comp].set_antecedent(Some(ante));
                }
            }
        }
        _ => (),
    }

    let ante = chase_antecedent(tree, tree[comp].antecedent());
    tree[comp].set_antecedent(ante);
}

/// Follow a chain of empty-category antecedents to the ultimate non-empty
/// antecedent. Bounded by the arena size, so cyclic co-indexation cannot
/// loop; a cycle resolves to `None`.
pub fn chase_antecedent(tree: &CTTree, mut ante: Option<NodeId>) -> Option<NodeId> {
    let mut steps = tree.len();

    while let Some(a) = ante {
        if !tree.is_empty_category_terminal(a) {
            break;
        }

        if steps == 0 {
            return None;
        }
        steps -= 1;

        ante = tree.first_terminal(a).and_then(|t| tree[t].antecedent());
    }

    ante
}
