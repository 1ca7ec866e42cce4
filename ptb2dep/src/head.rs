//! Head finding.

use cttree::english;
use cttree::node::NodeId;
use cttree::tag::CTag;
use depgraph::label::DepLabel;
use tracing::warn;

use crate::conv::Conversion;
use crate::headrule::{self, HeadRule};

const HEAD_FLAGS: i32 = 4;

/// Per-node head information.
///
/// For a terminal, `terminal_head` starts out as the terminal itself and
/// is redirected to the governing terminal when the terminal is attached;
/// a terminal that still points at itself when the tree is assembled
/// becomes a root. For a phrase, `terminal_head` is the representative
/// terminal reached through the chain of head children, frozen when the
/// head child is chosen.
#[derive(Clone, Debug)]
pub(crate) struct HeadInfo {
    pub(crate) terminal_head: NodeId,
    pub(crate) nonterminal_head: NodeId,
    pub(crate) label: Option<DepLabel>,
    pub(crate) has_head: bool,
}

impl HeadInfo {
    fn terminal(id: NodeId) -> Self {
        HeadInfo {
            terminal_head: id,
            nonterminal_head: id,
            label: None,
            has_head: false,
        }
    }

    fn phrase(head_child: NodeId, terminal_head: NodeId) -> Self {
        HeadInfo {
            terminal_head,
            nonterminal_head: head_child,
            label: None,
            has_head: false,
        }
    }
}

impl<'a> Conversion<'a> {
    pub(crate) fn info(&self, id: NodeId) -> &HeadInfo {
        self.heads[id.index()]
            .as_ref()
            .expect("node without head info")
    }

    fn info_mut(&mut self, id: NodeId) -> &mut HeadInfo {
        self.heads[id.index()]
            .as_mut()
            .expect("node without head info")
    }

    pub(crate) fn has_info(&self, id: NodeId) -> bool {
        self.heads[id.index()].is_some()
    }

    pub(crate) fn has_head(&self, id: NodeId) -> bool {
        self.heads[id.index()]
            .as_ref()
            .map(|info| info.has_head)
            .unwrap_or(false)
    }

    /// The representative terminal of a node: the node itself for
    /// terminals, the frozen terminal head for phrases.
    pub(crate) fn rep_terminal(&self, id: NodeId) -> NodeId {
        if self.tree[id].is_terminal() {
            id
        } else {
            self.info(id).terminal_head
        }
    }

    /// Attach `child` to `head`: the dependency is recorded on the
    /// child's representative terminal.
    pub(crate) fn set_dep_head(&mut self, child: NodeId, head: NodeId, label: DepLabel) {
        let child_terminal = self.rep_terminal(child);
        let head_terminal = self.rep_terminal(head);

        let info = self.info_mut(child_terminal);
        info.terminal_head = head_terminal;
        info.label = Some(label);

        self.info_mut(child).has_head = true;
    }

    /// Tentatively label a node without attaching it. The label surfaces
    /// through the final fallback of the labeling cascade.
    pub(crate) fn seed_label(&mut self, id: NodeId, label: DepLabel) {
        self.info_mut(id).label = Some(label);
    }

    pub(crate) fn seeded_label(&self, id: NodeId) -> Option<DepLabel> {
        self.heads[id.index()].as_ref().and_then(|info| info.label)
    }

    // ============================= Find heads =============================

    /// Assign head information to `curr` and all its descendants,
    /// bottom-up.
    pub(crate) fn find_heads(&mut self, curr: NodeId) {
        // Terminals become the heads of themselves.
        if self.tree[curr].is_terminal() {
            self.heads[curr.index()] = Some(HeadInfo::terminal(curr));
            return;
        }

        for child in self.tree.children(curr).to_vec() {
            self.find_heads(child);
        }

        // Stop at the top node.
        if self.tree[curr].is_tag(CTag::Top) {
            return;
        }

        // Only one child.
        if let [only] = self.tree.children(curr) {
            let only = *only;
            let info = HeadInfo::phrase(only, self.rep_terminal(only));
            self.heads[curr.index()] = Some(info);
            return;
        }

        let tag = self.tree[curr].tag();
        let rule = match self.rules.get(tag) {
            Some(rule) => rule,
            None => {
                warn!(tag = %tag, "no head rule, using the default rule");
                self.rules.default_rule()
            }
        };

        self.find_heads_aux(rule, curr);
    }

    fn find_heads_aux(&mut self, rule: &HeadRule, curr: NodeId) {
        if self.find_heads_coordination(rule, curr) {
            return;
        }

        self.find_hyphens(curr);
        self.find_heads_apposition(curr);
        self.find_heads_small_clause(curr);

        let children = self.tree.children(curr).to_vec();
        let head = self.get_head(rule, curr, &children);

        if self.info(head).label.is_some() {
            self.info_mut(head).label = None;
        }

        let info = HeadInfo::phrase(head, self.rep_terminal(head));
        self.heads[curr.index()] = Some(info);
    }

    /// If the node contains a coordination structure, find the head of
    /// each conjunct and link the conjunct heads to the head of the first
    /// conjunct.
    fn find_heads_coordination(&mut self, rule: &HeadRule, curr: NodeId) -> bool {
        let children = self.tree.children(curr).to_vec();
        let size = children.len();

        // Skip pre-conjunctions and punctuation.
        let mut s_id = 0;
        while s_id < size {
            let node = children[s_id];
            if !english::is_punctuation(self.tree, node)
                && !english::is_conjunction(self.tree, node)
                && !self.tree.is_empty_category_terminal(node)
            {
                break;
            }
            s_id += 1;
        }

        if !english::contains_coordination(self.tree, curr, &children[s_id..]) {
            return false;
        }

        // Find conjuncts.
        let pattern = self.conjunct_pattern(curr, &children[s_id..]);
        let mut prev_head: Option<NodeId> = None;
        let mut main_head: Option<NodeId> = None;
        let mut is_found = false;
        let mut b_id = s_id;

        for e_id in s_id..size {
            let node = children[e_id];

            if english::is_coordinator(self.tree, node) {
                if is_found {
                    let curr_head =
                        self.find_heads_coordination_aux(rule, curr, &children[b_id..e_id], prev_head);
                    let label = self.dep_label(node, curr, curr_head);
                    self.set_dep_head(node, curr_head, label);
                    prev_head = Some(curr_head);

                    if main_head.is_none() {
                        main_head = Some(curr_head);
                    }
                    is_found = false;

                    b_id = e_id + 1;
                } else if let Some(prev) = prev_head {
                    for &n in &children[b_id..=e_id] {
                        let label = self.dep_label(n, curr, prev);
                        self.set_dep_head(n, prev, label);
                    }

                    b_id = e_id + 1;
                }
            } else if self.is_conjunct(node, curr, pattern) {
                is_found = true;
            }
        }

        let main_head = match main_head {
            Some(main_head) => main_head,
            None => return false,
        };

        if size > b_id {
            self.find_heads_coordination_aux(rule, curr, &children[b_id..size], prev_head);
        }

        let info = HeadInfo::phrase(main_head, self.rep_terminal(main_head));
        self.heads[curr.index()] = Some(info);

        true
    }

    fn find_heads_coordination_aux(
        &mut self,
        rule: &HeadRule,
        curr: NodeId,
        conjunct: &[NodeId],
        last_head: Option<NodeId>,
    ) -> NodeId {
        let curr_head = if conjunct.len() == 1 {
            conjunct[0]
        } else {
            self.get_head(rule, curr, conjunct)
        };

        if let Some(last_head) = last_head {
            let label = if self.is_intj(curr_head) {
                DepLabel::Intj
            } else if english::is_punctuation(self.tree, curr_head) {
                DepLabel::Punct
            } else {
                DepLabel::Conj
            };

            self.set_dep_head(curr_head, last_head, label);
        }

        curr_head
    }

    fn conjunct_pattern(&self, curr: NodeId, children: &[NodeId]) -> Option<&'static [CTag]> {
        let tags = headrule::conjunct_pattern(self.tree[curr].tag())?;

        if children.iter().any(|&c| tags.contains(&self.tree[c].tag())) {
            Some(tags)
        } else {
            None
        }
    }

    /// Whether a child qualifies as a conjunct under its parent. A `None`
    /// pattern accepts everything without a special label.
    fn is_conjunct(&self, child: NodeId, parent: NodeId, pattern: Option<&[CTag]>) -> bool {
        if self.tree[parent].is_tag(CTag::Sbar)
            && self.tree[child].is_tag_any(&[CTag::In, CTag::Dt])
        {
            return false;
        }

        let tags = match pattern {
            None => return self.special_label(child).is_none(),
            Some(tags) => tags,
        };

        if tags.contains(&self.tree[child].tag()) {
            if self.tree[parent].is_tag(CTag::Vp) && self.aux_label(child).is_some() {
                return false;
            }

            if english::is_main_clause(self.tree, parent)
                && self.tree[child].is_tag(CTag::S)
                && self.has_adverbial_tag(child)
            {
                return false;
            }

            true
        } else if self.tree[parent].is_tag(CTag::Np) {
            self.tree[child].has_ftag(cttree::tag::FTag::Nom)
        } else {
            false
        }
    }

    fn find_hyphens(&mut self, curr: NodeId) -> bool {
        let children = self.tree.children(curr).to_vec();
        let is_vp = self.tree[curr].is_tag(CTag::Vp);
        let mut is_found = false;

        let mut i = 0;
        while i + 2 < children.len() {
            let (prev, hyph, next) = (children[i], children[i + 1], children[i + 2]);

            if self.tree[hyph].is_tag(CTag::Hyph) {
                if is_vp {
                    self.seed_label(prev, DepLabel::Hmod);
                    self.seed_label(hyph, DepLabel::Hyph);
                    self.seed_label(next, DepLabel::Hmod);
                } else {
                    self.set_dep_head(prev, next, DepLabel::Hmod);
                    self.set_dep_head(hyph, next, DepLabel::Hyph);
                }

                is_found = true;
                i += 1;
            }

            i += 1;
        }

        is_found
    }

    /// Later noun-phrase siblings of the first eligible noun-phrase child
    /// become appositive dependents of it.
    fn find_heads_apposition(&mut self, curr: NodeId) -> bool {
        if !self.tree[curr].is_tag_any(english::NP_NML)
            || self
                .tree
                .contains_child(curr, |t, n| t[n].tag().is_noun())
        {
            return false;
        }

        let mut fst = self
            .tree
            .first_child(curr, |t, n| t[n].is_tag_any(english::NP_NML));
        while let Some(f) = fst {
            if self.tree.contains_child(f, |t, n| t[n].is_tag(CTag::Pos)) {
                fst = self
                    .tree
                    .right_nearest_sibling(f, |t, n| t[n].is_tag_any(english::NP_NML));
            } else {
                break;
            }
        }

        let fst = match fst {
            Some(f) if !self.has_head(f) => f,
            _ => return false,
        };

        let mut has_appo = false;
        let mut snd = self.tree.right_sibling(fst);

        while let Some(s) = snd {
            snd = self.tree.right_sibling(s);

            if self.has_head(s) {
                continue;
            }

            let is_appo = (self.tree[s].is_tag_any(english::NP_NML)
                && !self.has_adverbial_tag(s))
                || self.tree[s].has_ftag_any(&[cttree::tag::FTag::Hln, cttree::tag::FTag::Ttl])
                || (self.tree[s].is_tag(CTag::Rrc)
                    && self.tree.contains_child(s, |t, n| {
                        t[n].is_tag(CTag::Np) && t[n].has_ftag(cttree::tag::FTag::Prd)
                    }));

            if is_appo {
                self.set_dep_head(s, fst, DepLabel::Appos);
                has_appo = true;
            }
        }

        has_appo
    }

    /// A subjectless-verb small clause under a question inversion: the
    /// subject attaches to the inverted verb and the clause takes over
    /// its predicate's category.
    fn find_heads_small_clause(&mut self, node: NodeId) -> bool {
        let parent = match self.tree.parent(node) {
            Some(parent) => parent,
            None => return false,
        };

        if !self.tree[node].is_tag(CTag::S)
            || self
                .tree
                .contains_child(node, |t, n| t[n].is_tag(CTag::Vp))
        {
            return false;
        }

        let sbj = self
            .tree
            .first_child(node, |t, n| t[n].has_ftag(cttree::tag::FTag::Sbj));
        let prd = self
            .tree
            .first_child(node, |t, n| t[n].has_ftag(cttree::tag::FTag::Prd));

        let (sbj, prd) = match (sbj, prd) {
            (Some(sbj), Some(prd)) => (sbj, prd),
            _ => return false,
        };

        if self.tree[parent].is_tag(CTag::Sq) {
            if let Some(vb) = self
                .tree
                .first_child(parent, |t, n| t[n].tag().is_verb())
            {
                let label = self.dep_label(sbj, parent, vb);
                self.set_dep_head(sbj, vb, label);
                let prd_tag = self.tree[prd].tag();
                self.tree[node].set_tag(prd_tag);
                self.tree[node].add_ftag(cttree::tag::FTag::Prd);
            }
        }

        true
    }

    /// Select the head among `nodes` by the head rule; every other node
    /// becomes a dependent of the head.
    fn get_head(&mut self, rule: &HeadRule, parent: NodeId, nodes: &[NodeId]) -> NodeId {
        let head = match self.default_head(nodes) {
            Some(head) => head,
            None => self.rule_head(rule, nodes),
        };

        for &node in nodes {
            if node != head && !self.has_head(node) {
                let label = self.dep_label(node, parent, head);
                self.set_dep_head(node, head, label);
            }
        }

        head
    }

    /// The only child that is not an empty category, if there is exactly
    /// one.
    fn default_head(&self, nodes: &[NodeId]) -> Option<NodeId> {
        let mut head = None;

        for &node in nodes {
            if !self.tree.is_empty_category_terminal(node) {
                if head.is_some() {
                    return None;
                }
                head = Some(node);
            }
        }

        head
    }

    fn rule_head(&self, rule: &HeadRule, nodes: &[NodeId]) -> NodeId {
        let mut ordered = nodes.to_vec();
        if rule.is_right_to_left() {
            ordered.reverse();
        }

        let flags: Vec<i32> = ordered.iter().map(|&n| self.head_flag(n)).collect();

        for flag in 0..HEAD_FLAGS {
            for tagset in rule.groups() {
                for (i, &child) in ordered.iter().enumerate() {
                    if flags[i] == flag && tagset.matches(self.tree[child].tag()) {
                        return child;
                    }
                }
            }
        }

        // Structural fallback: head finding never fails.
        ordered
            .iter()
            .zip(&flags)
            .find(|(_, &flag)| flag >= 0)
            .map(|(&child, _)| child)
            .unwrap_or(ordered[0])
    }

    /// Demotion flag of a head candidate: already-attached nodes are
    /// excluded, adverbials, meta nodes and empty/punctuation nodes are
    /// tried late.
    fn head_flag(&self, child: NodeId) -> i32 {
        if self.has_head(child) {
            return -1;
        }

        if self.has_adverbial_tag(child) {
            return 1;
        }

        if self.is_meta(child) {
            return 2;
        }

        if self.tree.is_empty_category_terminal(child)
            || english::is_punctuation(self.tree, child)
        {
            return 3;
        }

        0
    }
}
