//! CSS analysis used by the annotator.
//!
//! - [`stylesheet`]: splits a stylesheet into at-rules, rules and declarations
//! - [`values`]: declaration value tokenizer
//! - [`media`]: media query list parser
//! - [`units`]: number and unit splitting
//!
//! The annotator in [`crate::pixels`] only talks to the value and media
//! tokenizers through [`ValueWalker`] and [`MediaQueryWalker`], so a
//! different tokenizer can be plugged in without touching it.
//!
//! ## Example
//!
//! ```rust
//! use vcss::parser::{parse_stylesheet, Node};
//!
//! let sheet = parse_stylesheet("a { margin: 1rem; }").unwrap();
//! let Node::Rule(rule) = &sheet.nodes[0] else { panic!("expected a rule") };
//! let Node::Declaration(decl) = &rule.nodes[0] else { panic!("expected a declaration") };
//! assert_eq!(decl.prop, "margin");
//! assert_eq!(decl.value, "1rem");
//! assert_eq!(decl.value_start, 12);
//! ```

pub mod media;
pub mod stylesheet;
pub mod units;
pub mod values;

pub use crate::parser::media::{
    MediaBlock, MediaComponent, MediaQuery, MediaQueryList, MediaToken, MediaTokenKind,
    parse_media_query_list,
};
pub use crate::parser::stylesheet::{AtRule, Declaration, Node, Rule, StyleSheet, parse_stylesheet};
pub use crate::parser::units::{Dimension, unit};
pub use crate::parser::values::{ParsedValue, ValueKind, ValueNode, parse_value};

use crate::error::Result;

/// What a visitor wants the traversal to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Walk {
    /// Descend into the node's children, then carry on with its siblings.
    #[default]
    Continue,
    /// Do not descend into this node.
    SkipChildren,
    /// Stop visiting the remaining siblings at this level.
    SkipSiblings,
}

/// A tokenizer for declaration values that can be walked depth first.
pub trait ValueWalker {
    fn walk_value<'a>(
        &self,
        value: &'a str,
        visitor: &mut dyn FnMut(&ValueNode<'a>) -> Walk,
    ) -> Result<()>;
}

/// A media query parser whose tokens can be walked depth first.
pub trait MediaQueryWalker {
    fn walk_media<'a>(
        &self,
        prelude: &'a str,
        visitor: &mut dyn FnMut(&MediaToken<'a>) -> Walk,
    ) -> Result<()>;
}

/// Walks values with [`values::parse_value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValueWalker;

impl ValueWalker for DefaultValueWalker {
    fn walk_value<'a>(
        &self,
        value: &'a str,
        visitor: &mut dyn FnMut(&ValueNode<'a>) -> Walk,
    ) -> Result<()> {
        parse_value(value).walk(&mut |node| visitor(node));
        Ok(())
    }
}

/// Walks media queries with [`media::parse_media_query_list`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMediaWalker;

impl MediaQueryWalker for DefaultMediaWalker {
    fn walk_media<'a>(
        &self,
        prelude: &'a str,
        visitor: &mut dyn FnMut(&MediaToken<'a>) -> Walk,
    ) -> Result<()> {
        parse_media_query_list(prelude)?.walk(&mut |token| visitor(token));
        Ok(())
    }
}
