//! Media query list parsing.
//!
//! The prelude of a `@media` rule (for example
//! `screen and (min-width: 40em), print`) is tokenized and grouped into
//! queries. Parenthesized conditions and functions become [`MediaBlock`]s so
//! nesting like `not ((a) and (b))` is preserved.
//!
//! Only the structure needed to locate length terms is recovered; no attempt
//! is made to validate feature names or range syntax.

use crate::error::{Result, VcssError};
use crate::parser::Walk;
use crate::parser::stylesheet::is_closed_string;
use crate::parser::units::unit;
use cssparser::{ParseError, ParseErrorKind, Parser, ParserInput, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaTokenKind<'a> {
    Whitespace,
    Comment,
    Ident,
    String,
    Number(f64),
    Percentage(f64),
    Dimension { value: f64, unit: &'a str },
    /// An identifier immediately followed by `(`, e.g. `calc(`.
    Function(&'a str),
    Colon,
    Comma,
    OpenParen,
    CloseParen,
    /// Any other single character: `<`, `>`, `=`, `/`...
    Delim(char),
    /// Hashes, urls, brackets and anything else media queries do not use.
    Other,
}

/// A token of a media query prelude with its byte span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaToken<'a> {
    pub kind: MediaTokenKind<'a>,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl MediaToken<'_> {
    /// Returns the magnitude and unit of a dimension token.
    pub fn dimension(&self) -> Option<(f64, &str)> {
        match self.kind {
            MediaTokenKind::Dimension { value, unit } => Some((value, unit)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaComponent<'a> {
    Token(MediaToken<'a>),
    Block(MediaBlock<'a>),
}

/// A parenthesized group: `(min-width: 40em)`, `calc(...)` or `((a) and (b))`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock<'a> {
    /// Either an [`MediaTokenKind::OpenParen`] or a [`MediaTokenKind::Function`].
    pub open: MediaToken<'a>,
    pub components: Vec<MediaComponent<'a>>,
    pub close: MediaToken<'a>,
}

/// One comma-separated query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaQuery<'a> {
    pub components: Vec<MediaComponent<'a>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaQueryList<'a> {
    pub queries: Vec<MediaQuery<'a>>,
}

impl<'a> MediaQueryList<'a> {
    /// Visits every token depth first, in source order.
    ///
    /// For blocks the visitor sees the opening token; returning
    /// [`Walk::SkipChildren`] skips the block's contents.
    pub fn walk<F>(&self, visitor: &mut F)
    where
        F: FnMut(&MediaToken<'a>) -> Walk,
    {
        for query in &self.queries {
            walk_components(&query.components, visitor);
        }
    }
}

fn walk_components<'a, F>(components: &[MediaComponent<'a>], visitor: &mut F)
where
    F: FnMut(&MediaToken<'a>) -> Walk,
{
    for component in components {
        match component {
            MediaComponent::Token(token) => {
                if visitor(token) == Walk::SkipSiblings {
                    break;
                }
            }
            MediaComponent::Block(block) => match visitor(&block.open) {
                Walk::Continue => walk_components(&block.components, visitor),
                Walk::SkipChildren => {}
                Walk::SkipSiblings => break,
            },
        }
    }
}

/// Parses a media query prelude.
///
/// ```rust
/// use vcss::parser::media::parse_media_query_list;
///
/// let list = parse_media_query_list("screen and (min-width: 40em), print").unwrap();
/// assert_eq!(list.queries.len(), 2);
/// ```
pub fn parse_media_query_list(input: &str) -> Result<MediaQueryList<'_>> {
    let tokens = tokenize(input)?;
    MediaParser { tokens, pos: 0 }.parse_list()
}

struct MediaParser<'a> {
    tokens: Vec<MediaToken<'a>>,
    pos: usize,
}

impl<'a> MediaParser<'a> {
    fn next(&mut self) -> Option<MediaToken<'a>> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    fn parse_list(mut self) -> Result<MediaQueryList<'a>> {
        let mut list = MediaQueryList::default();
        if self.tokens.is_empty() {
            return Ok(list);
        }

        let mut current = MediaQuery::default();
        while let Some(token) = self.next() {
            match token.kind {
                MediaTokenKind::Comma => list.queries.push(std::mem::take(&mut current)),
                MediaTokenKind::CloseParen => return Err(VcssError::UnbalancedParens(token.start)),
                MediaTokenKind::OpenParen | MediaTokenKind::Function(_) => {
                    let block = self.parse_block(token)?;
                    current.components.push(MediaComponent::Block(block));
                }
                _ => current.components.push(MediaComponent::Token(token)),
            }
        }
        list.queries.push(current);

        Ok(list)
    }

    fn parse_block(&mut self, open: MediaToken<'a>) -> Result<MediaBlock<'a>> {
        let mut components = Vec::new();
        loop {
            let Some(token) = self.next() else {
                return Err(VcssError::UnbalancedParens(open.start));
            };
            match token.kind {
                MediaTokenKind::CloseParen => {
                    return Ok(MediaBlock {
                        open,
                        components,
                        close: token,
                    });
                }
                MediaTokenKind::OpenParen | MediaTokenKind::Function(_) => {
                    let block = self.parse_block(token)?;
                    components.push(MediaComponent::Block(block));
                }
                _ => components.push(MediaComponent::Token(token)),
            }
        }
    }
}

/// Splits a media query prelude into tokens.
///
/// Parentheses and functions are flattened: their contents follow the
/// opening token and are followed by a [`MediaTokenKind::CloseParen`] when
/// the prelude closes them.
pub fn tokenize(input: &str) -> Result<Vec<MediaToken<'_>>> {
    let mut parser_input = ParserInput::new(input);
    let mut parser = Parser::new(&mut parser_input);
    let mut tokens = Vec::new();
    collect_tokens(&mut parser, &mut tokens)?;
    Ok(tokens)
}

fn collect_tokens<'i>(input: &mut Parser<'i, '_>, tokens: &mut Vec<MediaToken<'i>>) -> Result<()> {
    loop {
        let start = input.position();
        let Ok(token) = input.next_including_whitespace_and_comments().cloned() else {
            return Ok(());
        };
        let text = input.slice_from(start);
        let offset = start.byte_index();

        let kind = match token {
            Token::WhiteSpace(_) => MediaTokenKind::Whitespace,
            Token::Comment(_) if text.len() < 4 || !text.ends_with("*/") => {
                return Err(VcssError::UnclosedComment(offset));
            }
            Token::Comment(_) => MediaTokenKind::Comment,
            Token::QuotedString(_) if is_closed_string(text) => MediaTokenKind::String,
            Token::QuotedString(_) | Token::BadString(_) => {
                return Err(VcssError::UnclosedString(offset));
            }
            Token::Ident(_) => MediaTokenKind::Ident,
            Token::Number { .. } => MediaTokenKind::Number(number(text)?),
            Token::Percentage { .. } => {
                MediaTokenKind::Percentage(number(text.trim_end_matches('%'))?)
            }
            Token::Dimension { .. } => {
                let dimension = unit(text).ok_or_else(|| {
                    VcssError::InvalidSyntax(format!("invalid dimension {text:?}"))
                })?;
                MediaTokenKind::Dimension {
                    value: dimension.value,
                    unit: dimension.unit,
                }
            }
            Token::Function(_) => MediaTokenKind::Function(&text[..text.len() - 1]),
            Token::ParenthesisBlock => MediaTokenKind::OpenParen,
            Token::CloseParenthesis => MediaTokenKind::CloseParen,
            Token::Colon => MediaTokenKind::Colon,
            Token::Comma => MediaTokenKind::Comma,
            Token::Delim(c) => MediaTokenKind::Delim(c),
            _ => MediaTokenKind::Other,
        };

        tokens.push(MediaToken {
            kind,
            text,
            start: offset,
            end: input.position().byte_index(),
        });

        if matches!(kind, MediaTokenKind::OpenParen | MediaTokenKind::Function(_)) {
            let contents_end = input
                .parse_nested_block(|input| match collect_tokens(input, tokens) {
                    Ok(()) => Ok(input.position()),
                    Err(error) => Err(input.new_custom_error(error)),
                })
                .map_err(block_error)?;

            if input.position() != contents_end {
                tokens.push(MediaToken {
                    kind: MediaTokenKind::CloseParen,
                    text: input.slice_from(contents_end),
                    start: contents_end.byte_index(),
                    end: input.position().byte_index(),
                });
            }
        }
    }
}

fn number(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|e| VcssError::InvalidSyntax(format!("{text}: {e}")))
}

fn block_error(error: ParseError<'_, VcssError>) -> VcssError {
    match error.kind {
        ParseErrorKind::Custom(error) => error,
        ParseErrorKind::Basic(kind) => VcssError::InvalidSyntax(format!("{kind:?}")),
    }
}
