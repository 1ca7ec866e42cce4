//! Constituent and function tags.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

macro_rules! tag_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $repr:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// All tags of this vocabulary.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Get the treebank notation of the tag.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $repr),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// Constituent tag: a syntactic category for phrases, a part-of-speech
    /// tag for terminals.
    CTag {
        // Clauses and phrases.
        Adjp => "ADJP",
        Advp => "ADVP",
        Caption => "CAPTION",
        Cit => "CIT",
        Conjp => "CONJP",
        Edited => "EDITED",
        Embed => "EMBED",
        Frag => "FRAG",
        Heading => "HEADING",
        Intj => "INTJ",
        Lst => "LST",
        Meta => "META",
        Nac => "NAC",
        Nml => "NML",
        Np => "NP",
        Nx => "NX",
        Pp => "PP",
        Prn => "PRN",
        Prt => "PRT",
        Qp => "QP",
        Rrc => "RRC",
        S => "S",
        Sbar => "SBAR",
        Sbarq => "SBARQ",
        Sinv => "SINV",
        Sq => "SQ",
        Title => "TITLE",
        Top => "TOP",
        Ucp => "UCP",
        Vp => "VP",
        Whadjp => "WHADJP",
        Whadvp => "WHADVP",
        Whnp => "WHNP",
        Whpp => "WHPP",
        X => "X",

        // Parts of speech.
        Add => "ADD",
        Afx => "AFX",
        Cc => "CC",
        Cd => "CD",
        Code => "CODE",
        Dt => "DT",
        Ex => "EX",
        Fw => "FW",
        Gw => "GW",
        In => "IN",
        Jj => "JJ",
        Jjr => "JJR",
        Jjs => "JJS",
        Ls => "LS",
        Md => "MD",
        Nn => "NN",
        Nns => "NNS",
        Nnp => "NNP",
        Nnps => "NNPS",
        Pdt => "PDT",
        Pos => "POS",
        Prp => "PRP",
        Prps => "PRP$",
        Rb => "RB",
        Rbr => "RBR",
        Rbs => "RBS",
        Rp => "RP",
        Sym => "SYM",
        To => "TO",
        Uh => "UH",
        Vb => "VB",
        Vbd => "VBD",
        Vbg => "VBG",
        Vbn => "VBN",
        Vbp => "VBP",
        Vbz => "VBZ",
        Wdt => "WDT",
        Wp => "WP",
        Wps => "WP$",
        Wrb => "WRB",
        Xx => "XX",

        // Punctuation and symbols.
        Colon => ":",
        Comma => ",",
        Dollar => "$",
        Hyph => "HYPH",
        Lrb => "-LRB-",
        Nfp => "NFP",
        Period => ".",
        Pound => "#",
        Quote => "''",
        Rrb => "-RRB-",
        Tick => "``",

        // Empty categories.
        None => "-NONE-",

        // Anything not in the inventory above.
        Unknown => "UNKNOWN",
    }
}

tag_enum! {
    /// Function tag.
    ///
    /// Besides the treebank inventory, `Rcmod` and `Oprd` mark relocated
    /// relative clauses and raised predicates during conversion.
    FTag {
        Adv => "ADV",
        Bnf => "BNF",
        Clf => "CLF",
        Clr => "CLR",
        Dir => "DIR",
        Dtv => "DTV",
        Etc => "ETC",
        Ext => "EXT",
        Hln => "HLN",
        Imp => "IMP",
        Lgs => "LGS",
        Loc => "LOC",
        Mnr => "MNR",
        Nom => "NOM",
        Prd => "PRD",
        Prp => "PRP",
        Put => "PUT",
        Sbj => "SBJ",
        Sez => "SEZ",
        Tmp => "TMP",
        Tpc => "TPC",
        Ttl => "TTL",
        Unf => "UNF",
        Voc => "VOC",
        Rcmod => "rcmod",
        Oprd => "oprd",
    }
}

lazy_static! {
    static ref CTAGS: HashMap<&'static str, CTag> =
        CTag::ALL.iter().map(|&t| (t.as_str(), t)).collect();
    static ref FTAGS: HashMap<&'static str, FTag> =
        FTag::ALL.iter().map(|&t| (t.as_str(), t)).collect();
}

impl CTag {
    /// Parse a constituent tag, falling back to `CTag::Unknown`.
    pub fn parse(tag: &str) -> CTag {
        CTAGS.get(tag).copied().unwrap_or(CTag::Unknown)
    }

    pub fn is_noun(self) -> bool {
        matches!(self, CTag::Nn | CTag::Nns | CTag::Nnp | CTag::Nnps)
    }

    pub fn is_verb(self) -> bool {
        matches!(
            self,
            CTag::Vb | CTag::Vbd | CTag::Vbg | CTag::Vbn | CTag::Vbp | CTag::Vbz
        )
    }

    pub fn is_adjective(self) -> bool {
        matches!(self, CTag::Jj | CTag::Jjr | CTag::Jjs)
    }

    pub fn is_adverb(self) -> bool {
        matches!(self, CTag::Rb | CTag::Rbr | CTag::Rbs)
    }

    /// Wh-pronouns, wh-determiners and wh-adverbs.
    pub fn is_relativizer(self) -> bool {
        matches!(self, CTag::Wdt | CTag::Wp | CTag::Wps | CTag::Wrb)
    }

    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            CTag::Colon
                | CTag::Comma
                | CTag::Hyph
                | CTag::Lrb
                | CTag::Nfp
                | CTag::Period
                | CTag::Quote
                | CTag::Rrb
                | CTag::Sym
                | CTag::Tick
        )
    }

    /// Wh-phrases: `WHNP|WHPP|WHADJP|WHADVP`.
    pub fn is_wh_phrase(self) -> bool {
        matches!(
            self,
            CTag::Whadjp | CTag::Whadvp | CTag::Whnp | CTag::Whpp
        )
    }
}

impl FTag {
    /// Parse a function tag. Tags outside the inventory yield `None`.
    pub fn parse(tag: &str) -> Option<FTag> {
        FTAGS.get(tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{CTag, FTag};

    #[test]
    fn parse_display_round_trip() {
        for &tag in CTag::ALL {
            assert_eq!(CTag::parse(tag.as_str()), tag);
        }

        for &tag in FTag::ALL {
            assert_eq!(FTag::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn unknown_tags() {
        assert_eq!(CTag::parse("NP"), CTag::Np);
        assert_eq!(CTag::parse("PRP$"), CTag::Prps);
        assert_eq!(CTag::parse("BOGUS"), CTag::Unknown);
        assert_eq!(FTag::parse("BOGUS"), None);
    }

    #[test]
    fn tag_classes() {
        assert!(CTag::Nnps.is_noun());
        assert!(CTag::Vbg.is_verb());
        assert!(CTag::Jjr.is_adjective());
        assert!(CTag::Rbs.is_adverb());
        assert!(CTag::Wdt.is_relativizer());
        assert!(CTag::Tick.is_punctuation());
        assert!(CTag::Whpp.is_wh_phrase());
        assert!(!CTag::Np.is_noun());
    }
}
