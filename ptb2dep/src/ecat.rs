//! Empty-category resolution.
//!
//! Empty categories are removed, relocated or spliced with their
//! antecedents before head finding. XSUBJ and RNR obligations that can
//! only be discharged on the dependency tree are deferred into the
//! conversion state.

use cttree::english;
use cttree::node::NodeId;
use cttree::tag::{CTag, FTag};

use crate::conv::Conversion;

impl<'a> Conversion<'a> {
    /// Remove or relocate the empty categories of the tree.
    ///
    /// Returns `false` when the tree has no nodes left afterwards.
    pub(crate) fn map_empty_categories(&mut self) -> bool {
        for ec in self.tree.terminals().to_vec() {
            if !self.tree[ec].is_empty_category() {
                continue;
            }

            if self.tree[ec].parent().is_none() {
                continue;
            }

            let form = self.tree[ec].form().unwrap_or("").to_owned();

            if form.starts_with("*PRO*") {
                self.map_pro(ec);
            } else if form.starts_with("*T*") {
                self.map_trace(ec);
            } else if english::is_passive_null_form(&form) {
                self.map_passive_null(ec);
            } else if form == "0" {
                // Zero complementizers stay in place.
                continue;
            } else if english::is_discontinuous(self.tree, ec) {
                self.map_discontinuous(ec);
            } else {
                self.tree.remove(ec);
            }
        }

        !self.tree.children(self.tree.root()).is_empty()
    }

    fn map_pro(&mut self, ec: NodeId) {
        let np = match self.tree.parent(ec) {
            Some(np) => np,
            None => return,
        };

        let vp = self
            .tree
            .parent(np)
            .and_then(|gp| {
                self.tree
                    .first_lowest_chained_descendant(gp, |t, n| t[n].is_tag(CTag::Vp))
            });

        match vp {
            // Small clauses.
            None => self.relocate_prd(np, ec),
            Some(_) => {
                // A controlled relative-clause subject is a trace when the
                // wh antecedent has no other trace site.
                if let Some(ante) = self.tree[ec].antecedent() {
                    if english::is_wh_phrase(self.tree, ante)
                        && self.tree[ante]
                            .co_index()
                            .map(|index| self.tree.ec_group(index).len() == 1)
                            .unwrap_or(false)
                    {
                        self.map_trace(ec);
                    }
                }

                self.add_xsubject(ec);
            }
        }
    }

    fn map_trace(&mut self, ec: NodeId) {
        let ante = match self.tree[ec].antecedent() {
            Some(ante) if !self.tree.is_descendant_of(ec, ante) => ante,
            _ => {
                self.tree.remove(ec);
                return;
            }
        };

        if self.tree[ante].has_ftag(FTag::Tpc) {
            if self.tree[ante].has_ftag(FTag::Sbj) {
                self.tree.remove(ec);
            } else {
                // Splice the topicalized antecedent into the trace
                // position.
                let parent = match self.tree.parent(ec) {
                    Some(parent) => parent,
                    None => return,
                };
                self.tree.detach(ec);
                self.tree.splice(parent, ante);
            }
        } else {
            // Relative clauses.
            if let Some(sbar) = self
                .tree
                .highest_chained_ancestor(ante, |t, n| t[n].is_tag(CTag::Sbar))
            {
                self.tree[sbar].add_ftag(FTag::Rcmod);
            }

            self.tree.splice(ec, ante);
        }
    }

    fn map_passive_null(&mut self, ec: NodeId) {
        let np = match self.tree.parent(ec) {
            Some(np) => np,
            None => return,
        };

        if !self.tree[np].has_ftag(FTag::Sbj) {
            return;
        }

        if self
            .tree
            .right_nearest_sibling(np, |t, n| t[n].is_tag(CTag::Vp))
            .is_none()
        {
            // Small clauses.
            self.relocate_prd(np, ec);
        } else {
            self.add_xsubject(ec);
        }
    }

    fn map_discontinuous(&mut self, ec: NodeId) {
        let parent = match self.tree.parent(ec) {
            Some(parent) => parent,
            None => return,
        };

        // An ICH trace with a left wh-phrase sibling was already handled
        // by the relativizer link.
        if self.tree[ec].form_starts_with("*ICH*")
            && self
                .tree
                .left_nearest_sibling(parent, english::is_wh_phrase)
                .is_some()
        {
            self.tree.remove(ec);
            return;
        }

        let ante = match self.tree[ec].antecedent() {
            Some(ante) if !self.tree.is_descendant_of(ec, ante) => ante,
            _ => {
                self.tree.remove(ec);
                return;
            }
        };

        let group: Vec<NodeId> = match self.tree[ante].co_index() {
            Some(index) => self.tree.ec_group(index).to_vec(),
            None => {
                self.tree.remove(ec);
                return;
            }
        };

        if group.is_empty() {
            self.tree.remove(ec);
            return;
        }

        let is_rnr = english::is_rnr(self.tree, ec);
        let mut shared = Vec::new();

        // Keep the group member nearest the antecedent; the others are
        // deleted (for RNR, their grandparents share the antecedent).
        let ante_tid = self
            .tree
            .first_terminal(ante)
            .and_then(|t| self.tree[t].terminal_id())
            .unwrap_or(usize::MAX);
        let ec_tid = self.tree[ec].terminal_id().unwrap_or(0);

        let survivor = if ec_tid < ante_tid {
            for &node in &group[..group.len() - 1] {
                if is_rnr {
                    if let Some(gp) = self
                        .tree
                        .parent(node)
                        .and_then(|p| self.tree.parent(p))
                    {
                        shared.push(gp);
                    }
                }
                self.tree.remove(node);
            }
            group[group.len() - 1]
        } else {
            for &node in &group[1..] {
                if is_rnr {
                    if let Some(gp) = self
                        .tree
                        .parent(node)
                        .and_then(|p| self.tree.parent(p))
                    {
                        shared.push(gp);
                    }
                }
                self.tree.remove(node);
            }
            group[0]
        };

        if is_rnr && !shared.is_empty() {
            self.rnr.insert(ante, shared);
        }

        let parent = match self.tree.parent(survivor) {
            Some(parent) => parent,
            None => return,
        };
        self.tree.detach(survivor);
        self.tree.splice(parent, ante);
    }

    /// On losing its empty subject, a small clause adopts a raised
    /// predicate marking when its predicate can carry it.
    fn relocate_prd(&mut self, np: NodeId, ec: NodeId) {
        if let Some(s) = self.tree.parent(np) {
            let has_prd = self
                .tree
                .contains_child(s, |t, n| t[n].has_ftag(FTag::Prd));

            if has_prd
                && (self.tree[s].has_no_ftag() || self.tree[s].has_ftag(FTag::Clr))
            {
                self.tree[s].clear_ftags();
                self.tree[s].add_ftag(FTag::Oprd);
            }
        }

        self.tree.remove(ec);
    }

    /// Register the clause of an empty subject against its ultimate
    /// antecedent; the antecedent later receives an XSUBJ arc from every
    /// registered clause head.
    fn add_xsubject(&mut self, ec: NodeId) {
        let mut ante = self.tree[ec].antecedent();
        let mut steps = self.tree.len();

        while let Some(a) = ante {
            if !self.tree.is_empty_category_terminal(a) {
                break;
            }

            if english::is_wh_phrase(self.tree, a) {
                return;
            }

            if steps == 0 {
                return;
            }
            steps -= 1;

            ante = self
                .tree
                .first_terminal(a)
                .and_then(|t| self.tree[t].antecedent());
        }

        if let Some(ante) = ante {
            if let Some(s) = self
                .tree
                .nearest_ancestor(ec, |t, n| t[n].is_tag(CTag::S))
            {
                self.xsubj.entry(ante).or_insert_with(Vec::new).push(s);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cttree::english;
    use cttree::tag::{CTag, FTag};
    use cttree::tree::CTTree;

    use crate::conv::Conversion;
    use crate::headrule::HeadRuleMap;

    fn resolve(tree: &mut CTTree) -> bool {
        english::preprocess(tree);
        let rules = HeadRuleMap::english();
        let mut conv = Conversion::new(&rules, tree);
        let has_nodes = conv.map_empty_categories();
        has_nodes
    }

    #[test]
    fn trace_splices_wh_antecedent() {
        let mut tree: CTTree = "(TOP (NP (NP (NN book)) (SBAR (WHNP-1 (WDT that)) \
                                (S (NP-SBJ (PRP I)) (VP (VBD bought) (NP (-NONE- *T*-1)))))))"
            .parse()
            .unwrap();

        assert!(resolve(&mut tree));

        let np = tree.children(tree.root())[0];
        let sbar = tree.children(np)[1];

        // The SBAR is marked as a relative clause and has lost the wh
        // phrase to the object position.
        assert!(tree[sbar].has_ftag(FTag::Rcmod));
        let s = tree.children(sbar)[0];
        assert_eq!(tree[s].tag(), CTag::S);

        let vp = tree.children(s)[1];
        let obj = tree.children(vp)[1];
        let whnp = tree.children(obj)[0];
        assert_eq!(tree[whnp].tag(), CTag::Whnp);
    }

    #[test]
    fn unlinked_trace_is_removed() {
        let mut tree: CTTree = "(TOP (S (NP-SBJ (PRP it)) (VP (VBD rained) (NP (-NONE- *T*-9)))))"
            .parse()
            .unwrap();

        assert!(resolve(&mut tree));

        let s = tree.children(tree.root())[0];
        let vp = tree.children(s)[1];

        // The trace and its emptied NP are gone.
        assert_eq!(tree.children(vp).len(), 1);
    }

    #[test]
    fn control_subject_defers_xsubj() {
        let mut tree: CTTree = "(TOP (S (NP-SBJ-1 (NNP John)) (VP (VBZ wants) \
                                (S (NP-SBJ (-NONE- *-1)) (VP (TO to) (VP (VB swim)))))))"
            .parse()
            .unwrap();

        english::preprocess(&mut tree);
        let rules = HeadRuleMap::english();
        let mut conv = Conversion::new(&rules, &mut tree);
        assert!(conv.map_empty_categories());

        let s = conv.tree.children(conv.tree.root())[0];
        let john_np = conv.tree.children(s)[0];
        let vp = conv.tree.children(s)[1];
        let inner_s = conv.tree.children(vp)[1];

        assert_eq!(conv.xsubj.get(&john_np), Some(&vec![inner_s]));
    }

    #[test]
    fn unmatched_empty_categories_are_removed() {
        let mut tree: CTTree = "(TOP (S (NP-SBJ (-NONE- *U*)) (VP (VBD rained))))"
            .parse()
            .unwrap();

        assert!(resolve(&mut tree));

        let s = tree.children(tree.root())[0];
        assert_eq!(tree.children(s).len(), 1);
    }

    #[test]
    fn zero_complementizer_stays() {
        let mut tree: CTTree = "(TOP (S (NP-SBJ (PRP I)) (VP (VBP think) \
                                (SBAR (-NONE- 0) (S (NP-SBJ (PRP he)) (VP (VBD left)))))))"
            .parse()
            .unwrap();

        assert!(resolve(&mut tree));

        let s = tree.children(tree.root())[0];
        let vp = tree.children(s)[1];
        let sbar = tree.children(vp)[1];
        assert_eq!(tree.children(sbar).len(), 2);
    }

    #[test]
    fn tree_of_only_empty_categories_collapses() {
        let mut tree: CTTree = "(TOP (S (NP (-NONE- *U*)) (VP (-NONE- *?*))))"
            .parse()
            .unwrap();

        assert!(!resolve(&mut tree));
    }
}
