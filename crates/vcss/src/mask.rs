//! Masking of non-standard at-rules.
//!
//! Tailwind-flavoured stylesheets use at-rules a generic CSS engine does not
//! understand:
//!
//! ```css
//! @screen md { ... }
//! @variants hover, focus { ... }
//! @responsive { ... }
//! @layer components { ... }
//! ```
//!
//! [`mask`] rewrites the keyword and prelude of each into the neutral
//! `@media(_)` followed by padding and the original `{`. The padding keeps
//! the text geometry intact so ranges reported against the masked text are
//! valid against the original:
//!
//! - single-line prelude: the substitute has the same length, so anything
//!   after the `{` keeps its column
//! - multi-line prelude: every line break is reproduced and the `{` lands on
//!   the same line and column
//!
//! Lengths are counted in UTF-16 code units, the unit editors use for
//! columns.
//!
//! The patterns are scanned without regard for strings or comments, so an
//! `@screen x {` inside a comment is rewritten too.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// The at-rule every recognized keyword is rewritten to.
pub const PLACEHOLDER: &str = "@media(_)";

/// A recognized non-standard at-rule.
#[derive(Debug)]
pub struct MaskRule {
    /// The at-keyword including `@`.
    pub keyword: &'static str,
    /// Length difference between the keyword and [`PLACEHOLDER`], added to
    /// the prelude length to get the padding of a single-line substitute.
    pub delta: isize,
    pattern: Regex,
}

impl MaskRule {
    fn new(keyword: &'static str, prelude: &str) -> Self {
        let pattern = Regex::new(&format!(r"{}({})\{{", regex::escape(keyword), prelude))
            .unwrap_or_else(|e| panic!("invalid mask pattern for {keyword}: {e}"));
        Self {
            keyword,
            delta: keyword.len() as isize - PLACEHOLDER.len() as isize,
            pattern,
        }
    }

    /// Builds the replacement for a match whose prelude is `prelude`.
    pub fn substitute(&self, prelude: &str) -> String {
        let mut out = String::from(PLACEHOLDER);

        match prelude.rfind('\n') {
            Some(last_break) => {
                for (i, _) in prelude.match_indices('\n') {
                    if i > 0 && prelude.as_bytes()[i - 1] == b'\r' {
                        out.push_str("\r\n");
                    } else {
                        out.push('\n');
                    }
                }
                let last_line = &prelude[last_break + 1..];
                push_spaces(&mut out, utf16_len(last_line));
            }
            None => {
                let padding = utf16_len(prelude) as isize + self.delta;
                push_spaces(&mut out, padding.max(0) as usize);
            }
        }

        out.push('{');
        out
    }

    /// Rewrites every occurrence of this rule in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let prelude = &caps[1];
            log::trace!(
                "masking {} at offset {}",
                self.keyword,
                caps.get(0).map_or(0, |m| m.start())
            );
            self.substitute(prelude)
        })
    }
}

static MASK_RULES: Lazy<[MaskRule; 4]> = Lazy::new(|| {
    [
        MaskRule::new("@screen", r"\s+[^{]+"),
        MaskRule::new("@variants", r"\s+[^{]+"),
        MaskRule::new("@responsive", r"\s*"),
        MaskRule::new("@layer", r"\s+[^{]{2,}"),
    ]
});

/// The recognized at-rules, in the order they are applied.
pub fn mask_rules() -> &'static [MaskRule] {
    MASK_RULES.as_slice()
}

/// Produces the virtual text of `text`.
///
/// Returns the input unchanged (borrowed) when no recognized at-rule is
/// present. Never fails: input without a `{` after the keyword is left for
/// the downstream parser to reject.
///
/// ```rust
/// use vcss::mask::mask;
///
/// let css = "@screen md { .a { color: red } }";
/// assert_eq!(mask(css), "@media(_)  { .a { color: red } }");
/// assert_eq!(mask(css).len(), css.len());
/// ```
pub fn mask(text: &str) -> Cow<'_, str> {
    if !text.contains('@') {
        return Cow::Borrowed(text);
    }

    let mut current = Cow::Borrowed(text);
    for rule in mask_rules() {
        let masked = match rule.apply(&current) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(masked) => masked,
        };
        current = Cow::Owned(masked);
    }
    current
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_follow_keyword_lengths() {
        let deltas: Vec<(&str, isize)> = mask_rules()
            .iter()
            .map(|r| (r.keyword, r.delta))
            .collect();
        assert_eq!(
            deltas,
            vec![
                ("@screen", -2),
                ("@variants", 0),
                ("@responsive", 2),
                ("@layer", -3)
            ]
        );
    }

    #[test]
    fn substitute_keeps_crlf_breaks() {
        let rule = &mask_rules()[1];
        assert_eq!(rule.substitute(" a,\r\n  b "), "@media(_)\r\n    {");
    }

    #[test]
    fn utf16_lengths() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("é"), 1);
        assert_eq!(utf16_len("😀"), 2);
    }
}
