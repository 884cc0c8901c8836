//! Error types for HCL parsing and value access.

use thiserror::Error;

/// Errors produced while parsing HCL text or accessing a [`Value`].
///
/// Two channels share this type: `Syntax` is a data error reported by
/// [`parse`] (the input text is at fault), while the remaining variants are
/// programmer errors reported by typed accessors and path operations. Both
/// kinds are meant to be propagated with `?` rather than handled locally.
///
/// [`Value`]: crate::Value
/// [`parse`]: crate::parse
#[derive(Error, Debug)]
pub enum Error {
    /// The input text is not valid HCL. The line number is 1-based and
    /// points at where the lexer stood when the first error was recorded.
    #[error("parse error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A typed accessor was called on a value of an incompatible variant.
    #[error("type error: value is {actual} but {expected} was requested")]
    Type {
        expected: &'static str,
        actual: &'static str,
    },

    /// A `get` lookup named a key that is not present.
    #[error("key {0:?} was not found")]
    KeyNotFound(String),

    /// A `get_index` lookup went past the end of a list.
    #[error("index {index} out of bounds for list of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// A dotted path did not tokenise to keys separated by periods.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// Reading an input file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The underlying formatter failed while writing HCL text.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

/// Convenience alias used throughout hcl-core.
pub type Result<T> = std::result::Result<T, Error>;
