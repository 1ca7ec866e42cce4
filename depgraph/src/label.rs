//! Dependency and semantic-role label vocabularies.

use std::fmt;

macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $repr:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
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

label_enum! {
    /// Label of a primary dependency arc.
    DepLabel {
        Acomp => "acomp",
        Advcl => "advcl",
        Advmod => "advmod",
        Agent => "agent",
        Amod => "amod",
        Appos => "appos",
        Attr => "attr",
        Aux => "aux",
        Auxpass => "auxpass",
        Cc => "cc",
        Ccomp => "ccomp",
        Complm => "complm",
        Conj => "conj",
        Csubj => "csubj",
        Csubjpass => "csubjpass",
        Dep => "dep",
        Det => "det",
        Dobj => "dobj",
        Expl => "expl",
        Hmod => "hmod",
        Hyph => "hyph",
        Infmod => "infmod",
        Intj => "intj",
        Iobj => "iobj",
        Mark => "mark",
        Meta => "meta",
        Neg => "neg",
        Nmod => "nmod",
        Nn => "nn",
        Npadvmod => "npadvmod",
        Nsubj => "nsubj",
        Nsubjpass => "nsubjpass",
        Num => "num",
        Number => "number",
        Oprd => "oprd",
        Parataxis => "parataxis",
        Partmod => "partmod",
        Pcomp => "pcomp",
        Pobj => "pobj",
        Poss => "poss",
        Possessive => "possessive",
        Preconj => "preconj",
        Predet => "predet",
        Prep => "prep",
        Prt => "prt",
        Punct => "punct",
        Quantmod => "quantmod",
        Rcmod => "rcmod",
        Root => "root",
        Xcomp => "xcomp",
    }
}

impl DepLabel {
    /// The passive counterpart of a subject label; other labels are
    /// unchanged.
    pub fn passivized(self) -> DepLabel {
        match self {
            DepLabel::Nsubj => DepLabel::Nsubjpass,
            DepLabel::Csubj => DepLabel::Csubjpass,
            label => label,
        }
    }
}

label_enum! {
    /// Label of a secondary dependency arc.
    Dep2Label {
        Xsubj => "xsubj",
        Rnr => "rnr",
        Ref => "ref",
        Gap => "gap",
    }
}

/// Label of a semantic (predicate-argument) arc.
///
/// PropBank labels in short form (`A0`, `AM-TMP`), optionally carrying a
/// referent (`R-`) or concatenation (`C-`) prefix.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SrlLabel(String);

const PREFIX_REFERENT: &str = "R-";
const PREFIX_CONCATENATION: &str = "C-";

impl SrlLabel {
    pub fn new(label: impl Into<String>) -> Self {
        SrlLabel(label.into())
    }

    /// Construct a label from its long form (`ARG0` to `A0`, `ARGM-TMP` to
    /// `AM-TMP`).
    pub fn short(label: &str) -> Self {
        match label.strip_prefix("ARG") {
            Some(rest) => SrlLabel(format!("A{}", rest)),
            None => SrlLabel(label.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The label without referent/concatenation prefixes.
    pub fn base(&self) -> &str {
        self.0
            .strip_prefix(PREFIX_REFERENT)
            .or_else(|| self.0.strip_prefix(PREFIX_CONCATENATION))
            .unwrap_or(&self.0)
    }

    pub fn is_referent(&self) -> bool {
        self.0.starts_with(PREFIX_REFERENT)
    }

    pub fn is_concatenated(&self) -> bool {
        self.0.starts_with(PREFIX_CONCATENATION)
    }

    /// Adjunct-like modifier arguments (`AM-*`).
    pub fn is_modifier(&self) -> bool {
        self.base().starts_with("AM")
    }

    /// Numbered arguments (`A0`, `A1`, ...).
    pub fn is_numbered(&self) -> bool {
        let base = self.base();
        let mut chars = base.chars();
        chars.next() == Some('A') && chars.next().map(|c| c.is_ascii_digit()).unwrap_or(false)
    }

    pub fn referent(&self) -> SrlLabel {
        SrlLabel(format!("{}{}", PREFIX_REFERENT, self.0))
    }

    pub fn concatenated(&self) -> SrlLabel {
        SrlLabel(format!("{}{}", PREFIX_CONCATENATION, self.0))
    }
}

impl fmt::Display for SrlLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SrlLabel {
    fn from(label: &str) -> Self {
        SrlLabel::new(label)
    }
}

#[cfg(test)]
mod tests {
    use super::{Dep2Label, DepLabel, SrlLabel};

    #[test]
    fn display() {
        assert_eq!(DepLabel::Nsubj.to_string(), "nsubj");
        assert_eq!(Dep2Label::Xsubj.to_string(), "xsubj");
    }

    #[test]
    fn passivized() {
        assert_eq!(DepLabel::Nsubj.passivized(), DepLabel::Nsubjpass);
        assert_eq!(DepLabel::Csubj.passivized(), DepLabel::Csubjpass);
        assert_eq!(DepLabel::Dobj.passivized(), DepLabel::Dobj);
    }

    #[test]
    fn srl_short_form() {
        assert_eq!(SrlLabel::short("ARG0").as_str(), "A0");
        assert_eq!(SrlLabel::short("ARGM-TMP").as_str(), "AM-TMP");
        assert_eq!(SrlLabel::short("rel").as_str(), "rel");
    }

    #[test]
    fn srl_prefixes() {
        let label = SrlLabel::short("ARG1");
        assert!(label.is_numbered());
        assert!(!label.is_modifier());

        let referent = label.referent();
        assert!(referent.is_referent());
        assert_eq!(referent.as_str(), "R-A1");
        assert_eq!(referent.base(), "A1");

        let concat = label.concatenated();
        assert!(concat.is_concatenated());
        assert_eq!(concat.base(), "A1");

        let tmp = SrlLabel::short("ARGM-TMP");
        assert!(tmp.is_modifier());
        assert!(!tmp.is_numbered());
    }
}
