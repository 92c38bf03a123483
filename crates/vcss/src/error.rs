//! Error types for stylesheet, value and media-query analysis.
//!
//! The public transforms in [`crate::mask`] and [`crate::pixels`] never return
//! these errors; they fall back to the unchanged input. The parsers in
//! [`crate::parser`] report them so callers can decide for themselves.

use thiserror::Error;

/// Errors that can occur while analysing CSS source text.
///
/// Offsets are byte offsets into the text that was being analysed.
///
/// # Examples
///
/// ```rust
/// use vcss::parser::parse_stylesheet;
/// use vcss::VcssError;
///
/// let result = parse_stylesheet("a { color: red;");
/// assert_eq!(result.unwrap_err(), VcssError::UnclosedBlock(2));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VcssError {
    /// A `{` block was never closed.
    #[error("unclosed block starting at offset {0}")]
    UnclosedBlock(usize),

    /// A quoted string ran to the end of input.
    #[error("unclosed string starting at offset {0}")]
    UnclosedString(usize),

    /// A `/*` comment ran to the end of input.
    #[error("unclosed comment starting at offset {0}")]
    UnclosedComment(usize),

    /// A `}` appeared with no open block.
    #[error("unexpected `}}` at offset {0}")]
    UnexpectedCloseBrace(usize),

    /// Parentheses in a media query did not balance.
    #[error("unbalanced parentheses at offset {0}")]
    UnbalancedParens(usize),

    /// Any other syntax the parsers cannot make sense of.
    #[error("CSS syntax error: {0}")]
    InvalidSyntax(String),
}

pub type Result<T> = std::result::Result<T, VcssError>;
