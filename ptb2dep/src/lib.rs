//! Conversion of Penn Treebank constituency trees into Stanford-style
//! dependency graphs.
//!
//! The entry point is [`Converter`], which holds the immutable head-rule
//! tables and converts one tree at a time through the [`ToDependency`]
//! trait. Trees are converted independently; a `Converter` can be shared
//! between threads.

mod error;
pub use crate::error::ConvertError;

mod headrule;
pub use crate::headrule::{Direction, HeadRule, HeadRuleMap, TagSet};

mod conv;
pub use crate::conv::{Converter, ToDependency};

mod dep;
mod ecat;
mod head;
mod label;
mod srl;

#[cfg(test)]
mod tests;
