//! Structural stylesheet parsing.
//!
//! Splits a stylesheet into at-rules, style rules and declarations with
//! `cssparser`, recording where each piece starts in the source. Selectors,
//! at-rule preludes and declaration values are kept as raw slices; they are
//! only tokenized further when a caller asks for it. Comments between rules
//! and declarations are skipped.
//!
//! `cssparser` recovers from almost anything. On top of it this module
//! rejects what a strict stylesheet parser would: blocks that run to the end
//! of input, stray `}`, unclosed strings and comments inside declaration
//! values, and statements that are neither rules nor declarations.

use crate::error::{Result, VcssError};
use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError, ParseErrorKind,
    Parser, ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
    StyleSheetParser, Token,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    AtRule(AtRule<'a>),
    Rule(Rule<'a>),
    Declaration(Declaration<'a>),
}

impl<'a> Node<'a> {
    /// Byte offset of the first character of the node.
    pub fn start(&self) -> usize {
        match self {
            Node::AtRule(at_rule) => at_rule.start,
            Node::Rule(rule) => rule.start,
            Node::Declaration(decl) => decl.start,
        }
    }

    pub fn children(&self) -> &[Node<'a>] {
        match self {
            Node::AtRule(at_rule) => at_rule.nodes.as_deref().unwrap_or_default(),
            Node::Rule(rule) => &rule.nodes,
            Node::Declaration(_) => &[],
        }
    }
}

/// `@name params { ... }` or `@name params;`
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule<'a> {
    /// Name without the `@`, as written.
    pub name: &'a str,
    /// Offset of the `@`.
    pub start: usize,
    /// Prelude with surrounding whitespace removed.
    pub params: &'a str,
    /// Offset of the first character of `params`.
    pub params_start: usize,
    /// `None` for statement at-rules such as `@import`.
    pub nodes: Option<Vec<Node<'a>>>,
}

impl AtRule<'_> {
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule<'a> {
    pub selector: &'a str,
    pub start: usize,
    pub nodes: Vec<Node<'a>>,
}

/// `prop: value !important`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration<'a> {
    pub prop: &'a str,
    pub start: usize,
    /// Raw value without `!important` and trailing whitespace.
    pub value: &'a str,
    /// Offset of the first character of `value`.
    pub value_start: usize,
    pub important: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet<'a> {
    pub nodes: Vec<Node<'a>>,
}

impl<'a> StyleSheet<'a> {
    /// Visits every node depth first, in document order.
    pub fn walk<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Node<'a>),
    {
        walk_nodes(&self.nodes, visitor);
    }
}

fn walk_nodes<'a, F>(nodes: &[Node<'a>], visitor: &mut F)
where
    F: FnMut(&Node<'a>),
{
    for node in nodes {
        visitor(node);
        walk_nodes(node.children(), visitor);
    }
}

/// Parses `source` into a [`StyleSheet`].
pub fn parse_stylesheet(source: &str) -> Result<StyleSheet<'_>> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    let mut sheet_parser = SheetParser { source };

    let mut nodes = Vec::new();
    for item in StyleSheetParser::new(&mut parser, &mut sheet_parser) {
        match item {
            Ok(node) => nodes.push(node),
            Err((error, item)) => return Err(item_error(source, error, item)),
        }
    }

    Ok(StyleSheet { nodes })
}

/// Prelude of an at-rule, recorded before its block is parsed.
struct AtPrelude<'i> {
    keyword_end: usize,
    params: &'i str,
    params_start: usize,
}

/// One parser for both the top level and rule bodies.
struct SheetParser<'i> {
    source: &'i str,
}

impl<'i> SheetParser<'i> {
    fn at_rule(
        &self,
        prelude: AtPrelude<'i>,
        start: &ParserState,
        nodes: Option<Vec<Node<'i>>>,
    ) -> Node<'i> {
        let start = start.position().byte_index();
        Node::AtRule(AtRule {
            name: &self.source[start + 1..prelude.keyword_end],
            start,
            params: prelude.params,
            params_start: prelude.params_start,
            nodes,
        })
    }

    /// Parses the contents of a `{}` block, failing when the block was never
    /// closed.
    fn block_contents<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Vec<Node<'i>>, ParseError<'i, VcssError>> {
        let open = input.position().byte_index() - 1;

        let mut nodes = Vec::new();
        for item in RuleBodyParser::new(input, self) {
            nodes.push(item.map_err(|(error, _)| error)?);
        }

        // A closed block stops before its `}`
        if input.position().byte_index() == self.source.len() {
            return Err(input.new_custom_error(VcssError::UnclosedBlock(open)));
        }
        Ok(nodes)
    }
}

impl<'i> QualifiedRuleParser<'i> for SheetParser<'i> {
    type Prelude = &'i str;
    type QualifiedRule = Node<'i>;
    type Error = VcssError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<&'i str, ParseError<'i, VcssError>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(input.slice_from(start).trim_end())
    }

    fn parse_block<'t>(
        &mut self,
        selector: &'i str,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Node<'i>, ParseError<'i, VcssError>> {
        let nodes = self.block_contents(input)?;
        Ok(Node::Rule(Rule {
            selector,
            start: start.position().byte_index(),
            nodes,
        }))
    }
}

impl<'i> AtRuleParser<'i> for SheetParser<'i> {
    type Prelude = AtPrelude<'i>;
    type AtRule = Node<'i>;
    type Error = VcssError;

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<AtPrelude<'i>, ParseError<'i, VcssError>> {
        let keyword_end = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}

        let raw = input.slice_from(keyword_end);
        let leading = raw.len() - raw.trim_start().len();
        Ok(AtPrelude {
            keyword_end: keyword_end.byte_index(),
            params: raw.trim(),
            params_start: keyword_end.byte_index() + leading,
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: AtPrelude<'i>,
        start: &ParserState,
    ) -> std::result::Result<Node<'i>, ()> {
        Ok(self.at_rule(prelude, start, None))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: AtPrelude<'i>,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Node<'i>, ParseError<'i, VcssError>> {
        let nodes = self.block_contents(input)?;
        Ok(self.at_rule(prelude, start, Some(nodes)))
    }
}

impl<'i> DeclarationParser<'i> for SheetParser<'i> {
    type Declaration = Node<'i>;
    type Error = VcssError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        declaration_start: &ParserState,
    ) -> std::result::Result<Node<'i>, ParseError<'i, VcssError>> {
        let start = declaration_start.position().byte_index();
        let colon = input.position().byte_index() - 1;

        input.skip_whitespace();
        let value_start = input.position();
        loop {
            let token_start = input.position().byte_index();
            let Ok(token) = input.next_including_whitespace_and_comments().cloned() else {
                break;
            };
            let text = input.slice_from(value_start);
            let text = &text[token_start - value_start.byte_index()..];
            match token {
                // `a:hover { ... }` is a nested rule, not a declaration
                Token::CurlyBracketBlock if !name.starts_with("--") => {
                    return Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid));
                }
                Token::QuotedString(_) if !is_closed_string(text) => {
                    return Err(input.new_custom_error(VcssError::UnclosedString(token_start)));
                }
                Token::BadString(_) => {
                    return Err(input.new_custom_error(VcssError::UnclosedString(token_start)));
                }
                Token::Comment(_) if !text.ends_with("*/") || text.len() < 4 => {
                    return Err(input.new_custom_error(VcssError::UnclosedComment(token_start)));
                }
                _ => {}
            }
        }

        let (value, important) = split_important(input.slice_from(value_start).trim_end());
        Ok(Node::Declaration(Declaration {
            prop: self.source[start..colon].trim_end(),
            start,
            value,
            value_start: value_start.byte_index(),
            important,
        }))
    }
}

impl<'i> RuleBodyItemParser<'i, Node<'i>, VcssError> for SheetParser<'i> {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        true
    }
}

/// Whether a quoted string token ends with its opening quote.
pub(crate) fn is_closed_string(text: &str) -> bool {
    match text.as_bytes() {
        [open, body @ .., close] if open == close => {
            body.iter().rev().take_while(|&&b| b == b'\\').count() % 2 == 0
        }
        _ => false,
    }
}

fn split_important(raw: &str) -> (&str, bool) {
    match raw.len().checked_sub("!important".len()) {
        Some(split) if raw.get(split..).is_some_and(|s| s.eq_ignore_ascii_case("!important")) => {
            (raw[..split].trim_end(), true)
        }
        _ => (raw, false),
    }
}

/// Turns the error of a failed top-level item into a [`VcssError`].
///
/// `item` is the source slice `cssparser` reports for the failed item and
/// always lies within `source`.
fn item_error(source: &str, error: ParseError<'_, VcssError>, item: &str) -> VcssError {
    let offset = (item.as_ptr() as usize).saturating_sub(source.as_ptr() as usize);

    match error.kind {
        ParseErrorKind::Custom(error) => error,
        ParseErrorKind::Basic(_) if item.trim_start().starts_with('}') => {
            VcssError::UnexpectedCloseBrace(offset + item.len() - item.trim_start().len())
        }
        ParseErrorKind::Basic(kind) => {
            VcssError::InvalidSyntax(format!("{kind:?} in statement at offset {offset}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declarations<'a>(sheet: &StyleSheet<'a>) -> Vec<Declaration<'a>> {
        let mut found = Vec::new();
        sheet.walk(&mut |node| {
            if let Node::Declaration(decl) = node {
                found.push(decl.clone());
            }
        });
        found
    }

    #[test]
    fn rule_with_declarations() {
        let css = "a { color: red; margin : 1rem 2rem }";
        let sheet = parse_stylesheet(css).unwrap();
        assert_eq!(sheet.nodes.len(), 1);

        let decls = declarations(&sheet);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].prop, "color");
        assert_eq!(decls[0].value, "red");
        assert_eq!(decls[1].prop, "margin");
        assert_eq!(decls[1].value, "1rem 2rem");
        assert_eq!(&css[decls[1].value_start..decls[1].value_start + 9], "1rem 2rem");
    }

    #[test]
    fn important_is_split_off() {
        let sheet = parse_stylesheet("a { top: 1rem  !IMPORTANT; }").unwrap();
        let decls = declarations(&sheet);
        assert_eq!(decls[0].value, "1rem");
        assert!(decls[0].important);
    }

    #[test]
    fn at_rule_params() {
        let css = "@media  screen and (min-width: 40em)  { a { b: c } }";
        let sheet = parse_stylesheet(css).unwrap();
        let Node::AtRule(media) = &sheet.nodes[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(media.name, "media");
        assert_eq!(media.params, "screen and (min-width: 40em)");
        assert_eq!(media.params_start, 8);
        assert_eq!(media.nodes.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn statement_at_rules() {
        let sheet = parse_stylesheet("@import url(a.css);\n@tailwind base;").unwrap();
        let names: Vec<&str> = sheet
            .nodes
            .iter()
            .filter_map(|n| match n {
                Node::AtRule(at) => Some(at.name),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["import", "tailwind"]);
    }

    #[test]
    fn at_rule_name_before_paren() {
        let sheet = parse_stylesheet("@media(_) { }").unwrap();
        let Node::AtRule(at) = &sheet.nodes[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(at.name, "media");
        assert_eq!(at.params, "(_)");
    }

    #[test]
    fn apply_inside_a_rule() {
        let sheet = parse_stylesheet(".btn { @apply font-bold; top: 0 }").unwrap();
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected rule");
        };
        assert!(matches!(&rule.nodes[0], Node::AtRule(at) if at.name == "apply"));
        assert!(matches!(&rule.nodes[1], Node::Declaration(d) if d.prop == "top"));
    }

    #[test]
    fn strings_and_comments_do_not_end_statements() {
        let css = r#"a { content: "};{"; /* } */ b: url(x;y) }"#;
        let sheet = parse_stylesheet(css).unwrap();
        let decls = declarations(&sheet);
        assert_eq!(decls[0].value, r#""};{""#);
        assert_eq!(decls[1].value, "url(x;y)");
    }

    #[test]
    fn quotes_inside_unquoted_urls() {
        let css = ".a { background: url(it's.png); margin: 1rem }";
        let decls = declarations(&parse_stylesheet(css).unwrap());
        assert_eq!(decls[0].value, "url(it's.png)");
        assert_eq!(decls[1].value, "1rem");
    }

    #[test]
    fn nested_rules_and_document_order() {
        let css = "@media print { a { x: 1 } } b { y: 2; &:hover { z: 3 } a:focus { w: 4 } }";
        let sheet = parse_stylesheet(css).unwrap();
        let mut starts = Vec::new();
        sheet.walk(&mut |node| starts.push(node.start()));
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
        assert_eq!(declarations(&sheet).len(), 4);
    }

    #[test]
    fn selector_colons_are_rules() {
        let sheet = parse_stylesheet("a:hover { color: red }").unwrap();
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected rule");
        };
        assert_eq!(rule.selector, "a:hover");
    }

    #[test]
    fn structural_errors() {
        assert_eq!(parse_stylesheet("a {"), Err(VcssError::UnclosedBlock(2)));
        assert_eq!(parse_stylesheet("a { } }"), Err(VcssError::UnexpectedCloseBrace(6)));
        assert_eq!(
            parse_stylesheet("a { content: 'x }"),
            Err(VcssError::UnclosedString(13))
        );
        assert_eq!(
            parse_stylesheet("a { top: 1rem /* x"),
            Err(VcssError::UnclosedComment(14))
        );
        assert!(matches!(
            parse_stylesheet("a { color }"),
            Err(VcssError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn empty_and_comments_only() {
        assert!(parse_stylesheet("").unwrap().nodes.is_empty());
        assert!(parse_stylesheet(" \n\t/* note */ ").unwrap().nodes.is_empty());
    }

    #[test]
    fn closed_strings() {
        assert!(is_closed_string("'a'"));
        assert!(is_closed_string(r#""""#));
        assert!(!is_closed_string("'"));
        assert!(!is_closed_string("'a"));
        assert!(!is_closed_string(r"'a\'"));
        assert!(is_closed_string(r"'a\\'"));
    }
}
