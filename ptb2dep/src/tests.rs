use cttree::node::PbArc;
use cttree::tree::CTTree;
use depgraph::graph::Sentence;
use depgraph::label::{Dep2Label, DepLabel};

use crate::conv::{Converter, ToDependency};

fn convert(text: &str) -> Option<Sentence> {
    let mut tree: CTTree = text.parse().unwrap();
    Converter::english()
        .to_dependency(&mut tree)
        .expect("conversion failed")
}

fn head(sentence: &Sentence, dependent: usize) -> (usize, DepLabel) {
    let triple = sentence
        .dep_graph()
        .head(dependent)
        .expect("token without head");
    (triple.head(), *triple.relation().expect("unlabeled arc"))
}

#[test]
fn simple_transitive_clause() {
    let s = convert("(TOP (S (NP-SBJ (NNP John)) (VP (VBD saw) (NP (NNP Mary)))))").unwrap();

    assert_eq!(s.len(), 4);
    assert_eq!(head(&s, 1), (2, DepLabel::Nsubj));
    assert_eq!(head(&s, 2), (0, DepLabel::Root));
    assert_eq!(head(&s, 3), (2, DepLabel::Dobj));
}

#[test]
fn root_is_unique() {
    let s = convert("(TOP (S (NP-SBJ (NNP John)) (VP (VBD saw) (NP (NNP Mary)))))").unwrap();

    let roots = (1..s.len())
        .filter(|&i| head(&s, i).1 == DepLabel::Root)
        .count();
    assert_eq!(roots, 1);
}

#[test]
fn coordination() {
    let s = convert("(TOP (NP (NP (NNP Tom)) (CC and) (NP (NNP Jerry))))").unwrap();

    assert_eq!(head(&s, 1), (0, DepLabel::Root));
    assert_eq!(head(&s, 2), (1, DepLabel::Cc));
    assert_eq!(head(&s, 3), (1, DepLabel::Conj));
}

#[test]
fn coordination_with_etc() {
    let s = convert(
        "(TOP (NP (NP (NNS stocks)) (, ,) (NP (NNS bonds)) (, ,) (NP (FW etc.))))",
    )
    .unwrap();

    assert_eq!(head(&s, 1), (0, DepLabel::Root));
    assert_eq!(head(&s, 2), (1, DepLabel::Punct));
    assert_eq!(head(&s, 3), (1, DepLabel::Conj));
    assert_eq!(head(&s, 4), (3, DepLabel::Punct));
    assert_eq!(head(&s, 5), (3, DepLabel::Conj));
}

#[test]
fn relative_clause_trace() {
    let s = convert(
        "(TOP (NP (NP (NN book)) (SBAR (WHNP-1 (WDT that)) \
         (S (NP-SBJ (PRP I)) (VP (VBD bought) (NP (-NONE- *T*-1)))))))",
    )
    .unwrap();

    // book(1) that(2) I(3) bought(4); the trace does not surface.
    assert_eq!(s.len(), 5);
    assert_eq!(head(&s, 1), (0, DepLabel::Root));
    assert_eq!(head(&s, 2), (4, DepLabel::Dobj));
    assert_eq!(head(&s, 3), (4, DepLabel::Nsubj));
    assert_eq!(head(&s, 4), (1, DepLabel::Rcmod));

    // The relativizer references its antecedent.
    assert!(s.has_secondary(1, 2, Dep2Label::Ref));
}

#[test]
fn control_verb_xsubj() {
    let s = convert(
        "(TOP (S (NP-SBJ-1 (NNP John)) (VP (VBZ wants) \
         (S (NP-SBJ (-NONE- *-1)) (VP (TO to) (VP (VB swim)))))))",
    )
    .unwrap();

    assert_eq!(head(&s, 1), (2, DepLabel::Nsubj));
    assert_eq!(head(&s, 2), (0, DepLabel::Root));
    assert_eq!(head(&s, 3), (4, DepLabel::Aux));
    assert_eq!(head(&s, 4), (2, DepLabel::Xcomp));

    // The controller is a second subject of the embedded clause.
    assert!(s.has_secondary(4, 1, Dep2Label::Xsubj));
}

#[test]
fn passive_auxiliary() {
    let s = convert(
        "(TOP (S (NP-SBJ-1 (NN window)) (VP (VBD was) (VP (VBN broken) (NP (-NONE- *-1))))))",
    )
    .unwrap();

    assert_eq!(head(&s, 1), (3, DepLabel::Nsubjpass));
    assert_eq!(head(&s, 2), (3, DepLabel::Auxpass));
    assert_eq!(head(&s, 3), (0, DepLabel::Root));
}

#[test]
fn complementizer_and_marker() {
    let s = convert(
        "(TOP (S (NP-SBJ (PRP I)) (VP (VBP think) \
         (SBAR (IN that) (S (NP-SBJ (PRP he)) (VP (VBD left)))))))",
    )
    .unwrap();

    assert_eq!(head(&s, 2), (0, DepLabel::Root));
    assert_eq!(head(&s, 3), (5, DepLabel::Complm));
    assert_eq!(head(&s, 5), (2, DepLabel::Ccomp));

    let s = convert(
        "(TOP (S (NP-SBJ (PRP I)) (VP (VBD left) \
         (SBAR (IN because) (S (NP-SBJ (PRP he)) (VP (VBD stayed)))))))",
    )
    .unwrap();

    assert_eq!(head(&s, 3), (5, DepLabel::Mark));
    assert_eq!(head(&s, 5), (2, DepLabel::Advcl));
}

#[test]
fn apposition() {
    let s = convert(
        "(TOP (NP (NP (NNP Clinton)) (, ,) (NP (DT the) (NN president)) (, ,)))",
    )
    .unwrap();

    assert_eq!(head(&s, 1), (0, DepLabel::Root));
    assert_eq!(head(&s, 2), (1, DepLabel::Punct));
    assert_eq!(head(&s, 3), (4, DepLabel::Det));
    assert_eq!(head(&s, 4), (1, DepLabel::Appos));
}

#[test]
fn hyphenated_compound() {
    let s = convert("(TOP (NP (NN state) (HYPH -) (NN run) (NNS schools)))").unwrap();

    assert_eq!(head(&s, 1), (3, DepLabel::Hmod));
    assert_eq!(head(&s, 2), (3, DepLabel::Hyph));
    assert_eq!(head(&s, 3), (4, DepLabel::Nn));
    assert_eq!(head(&s, 4), (0, DepLabel::Root));
}

#[test]
fn prepositional_phrase() {
    let s = convert(
        "(TOP (S (NP-SBJ (PRP she)) (VP (VBD slept) (PP (IN in) (NP (DT the) (NN barn))))))",
    )
    .unwrap();

    assert_eq!(head(&s, 3), (2, DepLabel::Prep));
    assert_eq!(head(&s, 5), (3, DepLabel::Pobj));
}

#[test]
fn unlike_coordination_takes_head_conjunct_label() {
    let s = convert(
        "(TOP (S (NP-SBJ (PRP it)) (VP (VBZ is) \
         (UCP-PRD (ADJP (JJ cheap)) (CC and) (NP (DT a) (NN bargain))))))",
    )
    .unwrap();

    // The coordination of unlike phrases labels as its adjectival head
    // conjunct would.
    assert_eq!(head(&s, 3), (2, DepLabel::Acomp));
    assert_eq!(head(&s, 4), (3, DepLabel::Cc));
    assert_eq!(head(&s, 6), (3, DepLabel::Conj));
}

#[test]
fn semantic_function_tags_as_features() {
    let s = convert("(TOP (S (NP-SBJ (PRP I)) (VP (VBD slept) (NP-TMP (NN yesterday)))))")
        .unwrap();

    assert_eq!(head(&s, 3), (2, DepLabel::Npadvmod));
    assert_eq!(
        s[3].token().unwrap().features().get("sem").map(String::as_str),
        Some("TMP")
    );
    // The subject phrase carries no auxiliary features.
    assert_eq!(s[1].token().unwrap().features().get("sem"), None);
}

#[test]
fn edited_phrases_are_pruned() {
    let s = convert(
        "(TOP (S (EDITED (NP (NN uh))) (NP-SBJ (PRP I)) (VP (VBD left))))",
    )
    .unwrap();

    // Three input tokens, two surviving tokens, contiguous ids.
    assert_eq!(s.len(), 3);
    assert_eq!(s[1].token().unwrap().form(), "I");
    assert_eq!(s[2].token().unwrap().form(), "left");
    assert_eq!(head(&s, 1), (2, DepLabel::Nsubj));
    assert_eq!(head(&s, 2), (0, DepLabel::Root));

    // No arcs point at removed tokens.
    for i in 1..s.len() {
        assert!(head(&s, i).0 < s.len());
        assert!(s.secondary_heads(i).iter().all(|t| t.head() < s.len()));
    }
}

#[test]
fn collapsed_trees_yield_no_sentence() {
    assert!(convert("(TOP (NP (-NONE- *U*)))").is_none());
    assert!(convert("(TOP (NP (NN cat)))").is_none());
}

#[test]
fn conversion_is_deterministic() {
    let text = "(TOP (NP (NP (NN book)) (SBAR (WHNP-1 (WDT that)) \
                (S (NP-SBJ (PRP I)) (VP (VBD bought) (NP (-NONE- *T*-1)))))))";

    let first = convert(text).unwrap();
    let second = convert(text).unwrap();

    assert_eq!(first, second);
}

#[test]
fn acyclic_output() {
    let texts = [
        "(TOP (S (NP-SBJ (NNP John)) (VP (VBD saw) (NP (NNP Mary)))))",
        "(TOP (NP (NP (NNP Tom)) (CC and) (NP (NNP Jerry))))",
        "(TOP (NP (NP (NN book)) (SBAR (WHNP-1 (WDT that)) \
         (S (NP-SBJ (PRP I)) (VP (VBD bought) (NP (-NONE- *T*-1)))))))",
    ];

    for text in &texts {
        let s = convert(text).unwrap();
        assert!(!s.contains_cycle());
    }
}

#[test]
fn propbank_projection() {
    let mut tree: CTTree =
        "(TOP (S (NP-SBJ (NNP John)) (VP (VBD saw) (NP (NNP Mary)))))"
            .parse()
            .unwrap();

    let s = tree.children(tree.root())[0];
    let subj = tree.children(s)[0];
    let vp = tree.children(s)[1];
    let saw = tree.children(vp)[0];
    let obj = tree.children(vp)[1];

    tree[saw].set_roleset(Some("see.01"));
    tree[subj].add_pb_head(PbArc::new(saw, "ARG0"));
    tree[obj].add_pb_head(PbArc::new(saw, "ARG1"));

    let s = Converter::english().to_dependency(&mut tree).unwrap().unwrap();

    assert_eq!(
        s[2].token().unwrap().features().get("pb").map(String::as_str),
        Some("see.01")
    );

    let subj_arcs = s.semantic_heads(1);
    assert_eq!(subj_arcs.len(), 1);
    assert_eq!(subj_arcs[0].head(), 2);
    assert_eq!(subj_arcs[0].relation().unwrap().as_str(), "A0");

    let obj_arcs = s.semantic_heads(3);
    assert_eq!(obj_arcs[0].relation().unwrap().as_str(), "A1");
}

#[test]
fn propbank_referent_argument() {
    let mut tree: CTTree = "(TOP (NP (NP (NN book)) (SBAR (WHNP-1 (WDT that)) \
                            (S (NP-SBJ (PRP I)) (VP (VBD bought) (NP (-NONE- *T*-1)))))))"
        .parse()
        .unwrap();

    let np = tree.children(tree.root())[0];
    let sbar = tree.children(np)[1];
    let s_node = tree.children(sbar)[1];
    let vp = tree.children(s_node)[1];
    let bought = tree.children(vp)[0];
    let obj = tree.children(vp)[1];

    tree[bought].set_roleset(Some("buy.01"));
    tree[obj].add_pb_head(PbArc::new(bought, "ARG1"));

    let s = Converter::english().to_dependency(&mut tree).unwrap().unwrap();

    // book(1) receives the base label, the relativizer the referent
    // label.
    let book_arcs = s.semantic_heads(1);
    assert_eq!(book_arcs.len(), 1);
    assert_eq!(book_arcs[0].head(), 4);
    assert_eq!(book_arcs[0].relation().unwrap().as_str(), "A1");

    let that_arcs = s.semantic_heads(2);
    assert_eq!(that_arcs.len(), 1);
    assert_eq!(that_arcs[0].relation().unwrap().as_str(), "R-A1");
}

#[test]
fn unknown_constituent_tags_fall_back() {
    // FOO is outside the tag inventory; the default rule still yields a
    // head.
    let s = convert("(TOP (FOO (NN cat) (NN dog)))").unwrap();

    assert_eq!(s.len(), 3);
    let roots = (1..s.len())
        .filter(|&i| head(&s, i).1 == DepLabel::Root)
        .count();
    assert_eq!(roots, 1);
}

#[test]
fn small_clause_under_inversion() {
    let s = convert(
        "(TOP (SQ (VBZ is) (S (NP-SBJ (DT this) (NN plan)) (ADJP-PRD (JJ wise)))))",
    )
    .unwrap();

    // The small-clause subject attaches to the inverted verb.
    assert_eq!(head(&s, 3), (1, DepLabel::Nsubj));
    assert_eq!(head(&s, 1), (0, DepLabel::Root));
}

#[test]
fn gapping_secondary_head() {
    let s = convert(
        "(TOP (S (S (NP-SBJ (NNP John)) (VP-1 (VBD ate) (NP (NNS apples)))) \
         (CC and) (S (NP-SBJ (NNP Mary)) (VP=1 (NP (NNS pears))))))",
    )
    .unwrap();

    // The gapped verb phrase references its antecedent.
    let gapped: Vec<_> = (1..s.len())
        .filter(|&i| {
            s.secondary_heads(i)
                .iter()
                .any(|t| t.relation() == Some(&Dep2Label::Gap))
        })
        .collect();
    assert_eq!(gapped.len(), 1);
    assert!(s.has_secondary(2, gapped[0], Dep2Label::Gap));
}
