//! Document symbols for masked at-rules.
//!
//! Symbols computed on the virtual document name every masked at-rule
//! `@media (_)`. The original source still holds the real directive, so the
//! name is rebuilt from it: `@screen md`, `@layer components`.

use crate::document::{Range, TextDocument};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Name given to every masked at-rule by symbol providers.
pub const MASKED_SYMBOL_NAME: &str = "@media (_)";

static AT_RULE_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(@[^\s{]+)([^{]*)\{").expect("Invalid at-rule head regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSymbol {
    pub name: String,
    pub range: Range,
}

/// Rebuilds the name of a masked at-rule symbol from `original_text`, the
/// text of the symbol's range in the original document.
///
/// Any other name is returned unchanged, as is a masked name whose original
/// text does not start with an at-rule head.
///
/// ```rust
/// use csslens::symbols::restore_symbol_name;
///
/// assert_eq!(restore_symbol_name("@media (_)", "@screen md {\n}"), "@screen md");
/// assert_eq!(restore_symbol_name(".btn", ".btn {}"), ".btn");
/// ```
pub fn restore_symbol_name<'a>(name: &'a str, original_text: &str) -> Cow<'a, str> {
    if name != MASKED_SYMBOL_NAME {
        return Cow::Borrowed(name);
    }

    let Some(caps) = AT_RULE_HEAD.captures(original_text.trim_start()) else {
        return Cow::Borrowed(name);
    };
    let keyword = &caps[1];
    let prelude = caps[2].trim();
    if prelude.is_empty() {
        Cow::Owned(keyword.to_string())
    } else {
        Cow::Owned(format!("{keyword} {prelude}"))
    }
}

/// Renames masked at-rule symbols in place using `document`'s text.
pub fn restore_symbols(symbols: &mut [DocumentSymbol], document: &TextDocument) {
    for symbol in symbols.iter_mut() {
        if symbol.name != MASKED_SYMBOL_NAME {
            continue;
        }
        let restored = restore_symbol_name(&symbol.name, document.get_text(symbol.range));
        if let Cow::Owned(name) = restored {
            log::trace!("restored symbol {name:?}");
            symbol.name = name;
        }
    }
}
