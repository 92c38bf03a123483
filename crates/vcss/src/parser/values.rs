//! Declaration value tokenizer.
//!
//! Turns a declaration value such as `calc(1rem + 2px) / 2` into a tree of
//! [`ValueNode`]s. Every node records where it starts and ends in the value,
//! so callers can point back into the text they parsed.
//!
//! ## Node kinds
//!
//! - Words: `1rem`, `solid`, `#fff`, `+`
//! - Strings: `"a"`, `'b'` (the node value excludes the quotes)
//! - Divisions: `,`, `/`, `:`
//! - Spaces and comments
//! - Functions: `calc(...)`, `var(...)`, and bare parentheses (empty name)
//! - Unicode ranges: `U+0025-00FF`
//!
//! The tokenizer is tolerant. Unclosed strings, comments and functions run
//! to the end of the value instead of failing.

use crate::parser::Walk;
use crate::parser::stylesheet::is_closed_string;
use crate::parser::units::{Dimension, unit};
use cssparser::{ParseError, Parser, ParserInput, Token, UnicodeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Word,
    String,
    Div,
    Space,
    Comment,
    Function,
    UnicodeRange,
}

/// A single node of a parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode<'a> {
    pub kind: ValueKind,
    /// Word text, string contents, comment contents, divider, or function name.
    pub value: &'a str,
    /// Byte offset of the first character of the node.
    pub source_index: usize,
    /// Byte offset just past the last character of the node.
    pub source_end_index: usize,
    /// Arguments of a function node. Empty for every other kind.
    pub nodes: Vec<ValueNode<'a>>,
}

impl<'a> ValueNode<'a> {
    fn leaf(kind: ValueKind, value: &'a str, source_index: usize, source_end_index: usize) -> Self {
        Self {
            kind,
            value,
            source_index,
            source_end_index,
            nodes: Vec::new(),
        }
    }

    /// Splits a word node into number and unit.
    pub fn dimension(&self) -> Option<Dimension<'a>> {
        match self.kind {
            ValueKind::Word => unit(self.value),
            _ => None,
        }
    }
}

/// A fully tokenized declaration value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedValue<'a> {
    pub nodes: Vec<ValueNode<'a>>,
}

impl<'a> ParsedValue<'a> {
    pub fn parse(input: &'a str) -> Self {
        let mut input = ParserInput::new(input);
        let mut parser = Parser::new(&mut input);
        Self {
            nodes: value_nodes(&mut parser),
        }
    }

    /// Visits every node depth first, in source order.
    pub fn walk<F>(&self, visitor: &mut F)
    where
        F: FnMut(&ValueNode<'a>) -> Walk,
    {
        walk(&self.nodes, visitor);
    }
}

/// Parses a declaration value into nodes.
///
/// ```rust
/// use vcss::parser::values::{parse_value, ValueKind};
///
/// let parsed = parse_value("calc(1rem + 2px)");
/// assert_eq!(parsed.nodes.len(), 1);
/// assert_eq!(parsed.nodes[0].kind, ValueKind::Function);
/// assert_eq!(parsed.nodes[0].nodes[0].value, "1rem");
/// ```
pub fn parse_value(input: &str) -> ParsedValue<'_> {
    ParsedValue::parse(input)
}

/// Visits `nodes` depth first.
///
/// [`Walk::SkipChildren`] keeps the visitor out of a function's arguments;
/// [`Walk::SkipSiblings`] abandons the rest of the current level.
pub fn walk<'a, F>(nodes: &[ValueNode<'a>], visitor: &mut F)
where
    F: FnMut(&ValueNode<'a>) -> Walk,
{
    for node in nodes {
        match visitor(node) {
            Walk::Continue => walk(&node.nodes, visitor),
            Walk::SkipChildren => {}
            Walk::SkipSiblings => break,
        }
    }
}

/// Turns the tokens of `input` into nodes until the input, or the enclosing
/// block, runs out.
fn value_nodes<'i>(input: &mut Parser<'i, '_>) -> Vec<ValueNode<'i>> {
    let mut nodes = Vec::new();

    loop {
        let state = input.state();
        let start = state.position();
        let Ok(token) = input.next_including_whitespace_and_comments().cloned() else {
            break;
        };
        let text = input.slice_from(start);
        let (from, to) = (start.byte_index(), input.position().byte_index());

        let node = match token {
            Token::WhiteSpace(_) => ValueNode::leaf(ValueKind::Space, text, from, to),
            Token::Comment(_) => {
                let inner = &text[2..];
                let inner = inner.strip_suffix("*/").unwrap_or(inner);
                ValueNode::leaf(ValueKind::Comment, inner, from, to)
            }
            Token::QuotedString(_) | Token::BadString(_) => {
                let contents = if is_closed_string(text) {
                    &text[1..text.len() - 1]
                } else {
                    &text[1..]
                };
                ValueNode::leaf(ValueKind::String, contents, from, to)
            }
            Token::Comma | Token::Colon | Token::Delim('/') => {
                ValueNode::leaf(ValueKind::Div, text, from, to)
            }
            Token::Function(_) => function(input, &text[..text.len() - 1], from),
            Token::ParenthesisBlock => function(input, "", from),
            Token::SquareBracketBlock | Token::CurlyBracketBlock => {
                let _ = input.parse_nested_block(|input| {
                    while input.next_including_whitespace_and_comments().is_ok() {}
                    Ok::<_, ParseError<'i, ()>>(())
                });
                let block = input.slice_from(start);
                ValueNode::leaf(ValueKind::Word, block, from, from + block.len())
            }
            Token::UnquotedUrl(_) | Token::BadUrl(_) => url(text, from),
            Token::Ident(ref name) if name.eq_ignore_ascii_case("u") => {
                input.reset(&state);
                let kind = match input.try_parse(UnicodeRange::parse) {
                    Ok(_) => ValueKind::UnicodeRange,
                    Err(_) => {
                        let _ = input.next_including_whitespace_and_comments();
                        ValueKind::Word
                    }
                };
                let word = input.slice_from(start);
                ValueNode::leaf(kind, word, from, from + word.len())
            }
            // numbers, dimensions, idents, hashes and stray delimiters
            _ => ValueNode::leaf(ValueKind::Word, text, from, to),
        };
        nodes.push(node);
    }

    nodes
}

/// Parses the arguments of a function whose opening token was just read.
fn function<'i>(input: &mut Parser<'i, '_>, name: &'i str, start: usize) -> ValueNode<'i> {
    let nodes = input
        .parse_nested_block(|input| Ok::<_, ParseError<'i, ()>>(value_nodes(input)))
        .unwrap_or_default();

    ValueNode {
        kind: ValueKind::Function,
        value: name,
        source_index: start,
        source_end_index: input.position().byte_index(),
        nodes,
    }
}

/// Unquoted `url(...)` contents are one raw word.
fn url(text: &str, start: usize) -> ValueNode<'_> {
    let open = text.find('(').unwrap_or(text.len() - 1);
    let close = if text.ends_with(')') { text.len() - 1 } else { text.len() };
    let raw = &text[(open + 1).min(close)..close];
    let word = raw.trim();
    let word_start = start + open + 1 + (raw.len() - raw.trim_start().len());

    let nodes = if word.is_empty() {
        Vec::new()
    } else {
        vec![ValueNode::leaf(
            ValueKind::Word,
            word,
            word_start,
            word_start + word.len(),
        )]
    };

    ValueNode {
        kind: ValueKind::Function,
        value: &text[..open],
        source_index: start,
        source_end_index: start + text.len(),
        nodes,
    }
}
