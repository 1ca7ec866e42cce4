//! Head rules and coordination patterns.

use std::collections::HashMap;

use cttree::tag::CTag;
use lazy_static::lazy_static;

use CTag::*;

pub const NNX: &[CTag] = &[Nn, Nns, Nnp, Nnps];
pub const VBX: &[CTag] = &[Vb, Vbd, Vbg, Vbn, Vbp, Vbz];
pub const JJX: &[CTag] = &[Jj, Jjr, Jjs];
pub const RBX: &[CTag] = &[Rb, Rbr, Rbs];

/// Search direction of a head rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

/// One priority group of a head rule: a set of constituent tags, or a
/// wildcard.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagSet {
    Of(&'static [CTag]),
    Any,
}

impl TagSet {
    pub fn matches(&self, tag: CTag) -> bool {
        match self {
            TagSet::Of(tags) => tags.contains(&tag),
            TagSet::Any => true,
        }
    }
}

/// An ordered head rule: priority groups are tried in order, scanning the
/// children in the rule direction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeadRule {
    direction: Direction,
    groups: Vec<TagSet>,
}

impl HeadRule {
    pub fn new(direction: Direction, groups: Vec<TagSet>) -> Self {
        HeadRule { direction, groups }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_right_to_left(&self) -> bool {
        self.direction == Direction::RightToLeft
    }

    pub fn groups(&self) -> &[TagSet] {
        &self.groups
    }
}

/// Head rules per constituent tag, with a wildcard default rule for tags
/// without an entry.
#[derive(Clone, Debug)]
pub struct HeadRuleMap {
    rules: HashMap<CTag, HeadRule>,
    default: HeadRule,
}

impl HeadRuleMap {
    pub fn new(rules: HashMap<CTag, HeadRule>) -> Self {
        HeadRuleMap {
            rules,
            default: HeadRule::new(Direction::RightToLeft, vec![TagSet::Any]),
        }
    }

    /// The built-in English head rules.
    pub fn english() -> Self {
        let mut rules = HashMap::new();

        let mut rule = |tag: CTag, direction: Direction, groups: &[&'static [CTag]]| {
            let mut sets: Vec<TagSet> = groups.iter().map(|&g| TagSet::Of(g)).collect();
            sets.push(TagSet::Any);
            rules.insert(tag, HeadRule::new(direction, sets));
        };

        use Direction::*;

        rule(
            Adjp,
            RightToLeft,
            &[
                &[Jj, Jjr, Jjs, Vbn, Vbg],
                &[Adjp],
                &[Nn, Nns, Nnp, Nnps, Nml, Np],
                RBX,
                &[Qp],
                &[In, Fw],
            ],
        );
        rule(
            Advp,
            RightToLeft,
            &[
                &[Rb, Rbr, Rbs, Wrb],
                &[Advp],
                &[In, To],
                JJX,
                &[Nn, Nns, Nnp, Nnps, Nml, Np],
            ],
        );
        rule(Caption, RightToLeft, &[&[Nn, Nns, Nnp, Nnps, Np, Nml]]);
        rule(Cit, RightToLeft, &[&[Nn, Nns, Nnp, Nnps, Np, Nml]]);
        rule(Conjp, LeftToRight, &[&[Cc], RBX, &[In, To]]);
        rule(Edited, RightToLeft, &[]);
        rule(Embed, RightToLeft, &[]);
        rule(
            Frag,
            RightToLeft,
            &[
                &[Nn, Nns, Nnp, Nnps, Np, Nml],
                &[Vp, S, Sbar],
                &[Jj, Jjr, Jjs, Adjp],
                &[Pp],
                &[Rb, Rbr, Rbs, Advp],
            ],
        );
        rule(Heading, RightToLeft, &[&[Nn, Nns, Nnp, Nnps, Np, Nml]]);
        rule(Intj, RightToLeft, &[&[Uh], &[Intj]]);
        rule(Lst, RightToLeft, &[&[Ls, Cd]]);
        rule(Meta, RightToLeft, &[]);
        rule(
            Nac,
            RightToLeft,
            &[
                &[Nn, Nns, Nnp, Nnps, Nml, Np, Nx],
                &[Ex, Prp],
                &[Cd, Qp],
                &[Jj, Jjr, Jjs, Adjp, Fw],
            ],
        );
        let nominal: &[&'static [CTag]] = &[
            &[Nn, Nns, Nnp, Nnps, Nml, Nx],
            &[Prp, Ex],
            &[Np],
            &[Cd, Qp],
            &[Jj, Jjr, Jjs, Adjp],
            &[Fw],
        ];
        rule(Nml, RightToLeft, nominal);
        rule(Np, RightToLeft, nominal);
        rule(
            Nx,
            RightToLeft,
            &[&[Nn, Nns, Nnp, Nnps, Nx, Nml], &[Np]],
        );
        rule(
            Pp,
            LeftToRight,
            &[&[In, To], &[Vbg, Vbn], &[Rp], &[Pp], &[Fw]],
        );
        rule(
            Prn,
            RightToLeft,
            &[
                &[S, Sinv, Sq, Sbar],
                &[Np, Nml],
                &[Vp],
                &[Pp],
                &[Adjp],
                &[Advp],
            ],
        );
        rule(Prt, RightToLeft, &[&[Rp], &[Prt], &[In]]);
        rule(
            Qp,
            RightToLeft,
            &[
                &[Cd],
                &[Qp],
                &[Nn, Nns, Nnp, Nnps, Nml],
                &[Dollar],
                JJX,
                &[Dt, Pdt],
                RBX,
            ],
        );
        rule(
            Rrc,
            RightToLeft,
            &[&[Vp], &[Adjp], &[Np, Nml], &[Pp], &[Advp]],
        );
        rule(
            S,
            RightToLeft,
            &[
                &[Vp],
                &[S],
                &[Sbar, Sbarq, Sinv, Sq],
                &[Adjp, Jj, Jjr, Jjs],
                &[Np, Nml],
                &[Ucp],
                &[Pp],
            ],
        );
        rule(
            Sbar,
            RightToLeft,
            &[&[S], &[Sq, Sinv, Sbar, Sbarq], &[Frag, X], &[Vp]],
        );
        rule(
            Sbarq,
            RightToLeft,
            &[&[Sq, S, Sinv, Sbarq], &[Frag], &[Vp]],
        );
        rule(
            Sinv,
            RightToLeft,
            &[
                &[Vp],
                &[Vb, Vbd, Vbg, Vbn, Vbp, Vbz, Md],
                &[S, Sinv],
                &[Adjp],
                &[Np, Nml],
            ],
        );
        rule(
            Sq,
            RightToLeft,
            &[&[Vp], &[Vb, Vbd, Vbg, Vbn, Vbp, Vbz, Md], &[Sq], &[S]],
        );
        rule(Title, RightToLeft, &[&[Nn, Nns, Nnp, Nnps, Np, Nml]]);
        rule(Ucp, RightToLeft, &[]);
        rule(
            Vp,
            LeftToRight,
            &[
                &[Vp],
                VBX,
                &[Md],
                &[Adjp],
                &[Nn, Nns, Nnp, Nnps, Np, Nml],
                JJX,
            ],
        );
        rule(
            Whadjp,
            RightToLeft,
            &[&[Jj, Jjr, Jjs, Vbn, Vbg], &[Whadjp, Adjp]],
        );
        rule(
            Whadvp,
            RightToLeft,
            &[&[Wrb], RBX, &[Whadvp, Advp], &[In]],
        );
        rule(
            Whnp,
            RightToLeft,
            &[
                &[Wdt, Wp, Wps],
                &[Nn, Nns, Nnp, Nnps, Nml, Np, Nx],
                &[Whnp],
                &[Cd, Qp],
                &[Jj, Jjr, Jjs, Adjp],
            ],
        );
        rule(Whpp, LeftToRight, &[&[In, To], &[Whpp, Pp]]);
        rule(X, RightToLeft, &[]);

        HeadRuleMap::new(rules)
    }

    pub fn get(&self, tag: CTag) -> Option<&HeadRule> {
        self.rules.get(&tag)
    }

    /// The wildcard fallback rule for tags without an entry.
    pub fn default_rule(&self) -> &HeadRule {
        &self.default
    }
}

lazy_static! {
    /// Conjunct patterns: the constituent tags that may act as conjuncts
    /// under a given phrase tag. Phrases without an entry accept any
    /// conjunct.
    static ref CONJUNCT_PATTERNS: HashMap<CTag, &'static [CTag]> = {
        let mut patterns: HashMap<CTag, &'static [CTag]> = HashMap::new();

        patterns.insert(Adjp, &[Adjp, Jj, Jjr, Jjs, Vbn, Vbg]);
        patterns.insert(Advp, &[Advp, Rb, Rbr, Rbs]);
        patterns.insert(Intj, &[Intj, Uh]);
        patterns.insert(Pp, &[Pp, In, Vbg]);
        patterns.insert(Prt, &[Prt, Rp]);
        patterns.insert(Nac, &[Np]);
        patterns.insert(Nml, &[Np, Nml, Nn, Nns, Nnp, Nnps, Prp]);
        patterns.insert(Np, &[Np, Nml, Nn, Nns, Nnp, Nnps, Prp]);
        patterns.insert(Nx, &[Nx]);
        patterns.insert(Vp, &[Vp, Vb, Vbd, Vbg, Vbn, Vbp, Vbz]);
        patterns.insert(S, &[S, Sinv, Sq, Sbarq]);
        patterns.insert(Sbar, &[Sbar, Sbarq]);
        patterns.insert(Sbarq, &[Sbar, Sbarq]);
        patterns.insert(Sinv, &[S, Sinv]);
        patterns.insert(Sq, &[S, Sq, Sbarq]);
        patterns.insert(Whnp, &[Nn, Nns, Nnp, Nnps, Wp]);
        patterns.insert(Whadjp, &[Jj, Jjr, Jjs, Vbn, Vbg]);
        patterns.insert(Whadvp, &[Rb, Rbr, Rbs, Wrb, In]);

        patterns
    };
}

/// The conjunct pattern for a phrase tag; `None` accepts any conjunct.
pub(crate) fn conjunct_pattern(tag: CTag) -> Option<&'static [CTag]> {
    CONJUNCT_PATTERNS.get(&tag).copied()
}

#[cfg(test)]
mod tests {
    use super::{Direction, HeadRuleMap, TagSet};
    use cttree::tag::CTag;

    #[test]
    fn english_rules() {
        let rules = HeadRuleMap::english();

        let vp = rules.get(CTag::Vp).unwrap();
        assert_eq!(vp.direction(), Direction::LeftToRight);
        assert!(vp.groups()[0].matches(CTag::Vp));
        assert!(!vp.groups()[0].matches(CTag::Vbd));
        assert!(vp.groups()[1].matches(CTag::Vbd));

        let s = rules.get(CTag::S).unwrap();
        assert!(s.is_right_to_left());
        assert!(s.groups()[0].matches(CTag::Vp));

        // Every rule falls back to a wildcard group.
        for &tag in &[CTag::Np, CTag::Vp, CTag::S, CTag::Ucp] {
            let last = rules.get(tag).unwrap().groups().last().unwrap();
            assert_eq!(last, &TagSet::Any);
        }

        assert!(rules.get(CTag::Nn).is_none());
        assert_eq!(rules.default_rule().direction(), Direction::RightToLeft);
    }

    #[test]
    fn conjunct_patterns() {
        let np = super::conjunct_pattern(CTag::Np).unwrap();
        assert!(np.contains(&CTag::Nml));
        assert!(!np.contains(&CTag::Pp));
        assert_eq!(super::conjunct_pattern(CTag::Frag), None);
    }
}
