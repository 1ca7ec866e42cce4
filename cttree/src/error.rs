use std::io;

use thiserror::Error;

/// Bracketed-tree reading error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadError {
    /// Error in file IO.
    #[error("error reading treebank")]
    Io(#[from] io::Error),

    /// Brackets do not balance.
    #[error("unbalanced brackets: {value:?}")]
    Unbalanced { value: String },

    /// A token that the bracket grammar does not allow at this point.
    #[error("unexpected token: {value:?}")]
    UnexpectedToken { value: String },

    /// The input holds no tree.
    #[error("empty tree")]
    Empty,
}
