//! Pixel-equivalent annotations for `rem` and `em` lengths.
//!
//! Given a root font size, every `rem` length in a declaration value and
//! every `rem`/`em` length in a `@media` condition gets a trailing comment
//! with its pixel value:
//!
//! ```css
//! .a { margin: 1rem /* 16px */; }
//! @media (min-width: 40em /* 640px */) { ... }
//! ```
//!
//! Comments carry no meaning for CSS consumers, so the annotated text is
//! still the same stylesheet. It is meant for display (hovers, inline hints)
//! and is never fed back into analysis.
//!
//! Annotation happens in two passes. The first walks the parsed structures
//! and collects [`Annotation`]s against the untouched source. The second
//! sorts them by offset and rebuilds the text once, copying the source
//! between successive offsets. Every comment therefore lands right after its
//! token no matter how many are inserted.

use crate::error::Result;
use crate::parser::{
    DefaultMediaWalker, DefaultValueWalker, MediaQueryWalker, Node, ValueKind, ValueWalker, Walk,
    parse_stylesheet,
};
use std::borrow::Cow;

/// A pixel value to insert at a byte offset of the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub offset: usize,
    pub pixels: f64,
}

impl Annotation {
    /// The `"16px"` label shown for this annotation.
    pub fn label(&self) -> String {
        format!("{}px", format_pixels(self.pixels))
    }

    /// The block comment inserted into the text.
    pub fn comment(&self) -> String {
        format!("/* {} */", self.label())
    }
}

/// Formats a pixel value the way it reads best: `16`, `8`, `4.5`.
///
/// Very large and very small magnitudes switch to exponent notation at the
/// same thresholds JavaScript number printing uses, so `1.6e-7` and
/// `1.6e+21` read the same as in the browser.
pub fn format_pixels(pixels: f64) -> String {
    let magnitude = pixels.abs();
    if pixels == 0.0 {
        // also folds -0 into 0
        "0".to_string()
    } else if pixels.is_infinite() {
        if pixels > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{pixels:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else {
        pixels.to_string()
    }
}

/// Collects and applies pixel annotations.
///
/// The tokenizers are pluggable through [`ValueWalker`] and
/// [`MediaQueryWalker`]; [`PixelAnnotator::new`] uses the built-in ones.
#[derive(Debug, Clone)]
pub struct PixelAnnotator<V = DefaultValueWalker, M = DefaultMediaWalker> {
    root_font_size: f64,
    values: V,
    media: M,
}

impl PixelAnnotator {
    pub fn new(root_font_size: f64) -> Self {
        Self::with_walkers(root_font_size, DefaultValueWalker, DefaultMediaWalker)
    }
}

impl<V: ValueWalker, M: MediaQueryWalker> PixelAnnotator<V, M> {
    pub fn with_walkers(root_font_size: f64, values: V, media: M) -> Self {
        Self {
            root_font_size,
            values,
            media,
        }
    }

    pub fn root_font_size(&self) -> f64 {
        self.root_font_size
    }

    /// Records an annotation after every `rem` word of `value`.
    ///
    /// `base` is the offset of `value` within the text being annotated.
    pub fn collect_value(&self, value: &str, base: usize, out: &mut Vec<Annotation>) -> Result<()> {
        self.values.walk_value(value, &mut |node| {
            if node.kind != ValueKind::Word {
                return Walk::Continue;
            }
            if let Some(dim) = node.dimension().filter(|d| d.is_unit("rem")) {
                out.push(Annotation {
                    offset: base + node.source_end_index,
                    pixels: dim.value * self.root_font_size,
                });
            }
            Walk::SkipChildren
        })
    }

    /// Records an annotation after every `rem` or `em` dimension of a media
    /// query prelude starting at `base`.
    pub fn collect_media(&self, prelude: &str, base: usize, out: &mut Vec<Annotation>) -> Result<()> {
        self.media.walk_media(prelude, &mut |token| {
            if let Some((value, unit)) = token.dimension() {
                if unit == "rem" || unit == "em" {
                    out.push(Annotation {
                        offset: base + token.end,
                        pixels: value * self.root_font_size,
                    });
                }
            }
            Walk::Continue
        })
    }

    /// Collects every annotation of a stylesheet, sorted by offset.
    pub fn collect_css(&self, css: &str) -> Result<Vec<Annotation>> {
        let sheet = parse_stylesheet(css)?;
        let mut annotations = Vec::new();
        let mut failure = None;

        sheet.walk(&mut |node| {
            if failure.is_some() {
                return;
            }
            let collected = match node {
                Node::AtRule(at_rule) if at_rule.is_named("media") && at_rule.params.contains("em") => {
                    self.collect_media(at_rule.params, at_rule.params_start, &mut annotations)
                }
                Node::Declaration(decl) if decl.value.contains("rem") => {
                    self.collect_value(decl.value, decl.value_start, &mut annotations)
                }
                _ => Ok(()),
            };
            if let Err(e) = collected {
                failure = Some(e);
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }

        annotations.sort_by_key(|a| a.offset);
        Ok(annotations)
    }

    /// Annotates a single declaration value.
    ///
    /// Returns the input unchanged when it contains no `rem`.
    pub fn annotate_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if !value.contains("rem") {
            return Cow::Borrowed(value);
        }

        let mut annotations = Vec::new();
        if let Err(e) = self.collect_value(value, 0, &mut annotations) {
            log::debug!("skipping pixel equivalents for value {value:?}: {e}");
            return Cow::Borrowed(value);
        }
        apply_annotations(value, &annotations)
    }

    /// Annotates a whole stylesheet.
    ///
    /// Returns the input unchanged when it contains no `em` or when it cannot
    /// be analysed.
    pub fn annotate_css<'a>(&self, css: &'a str) -> Cow<'a, str> {
        if !css.contains("em") {
            return Cow::Borrowed(css);
        }

        match self.collect_css(css) {
            Ok(annotations) => apply_annotations(css, &annotations),
            Err(e) => {
                log::debug!("skipping pixel equivalents for stylesheet: {e}");
                Cow::Borrowed(css)
            }
        }
    }
}

/// Inserts the comment of every annotation into `source`.
///
/// `annotations` must be sorted by ascending offset and every offset must
/// lie on a character boundary of `source`.
pub fn apply_annotations<'a>(source: &'a str, annotations: &[Annotation]) -> Cow<'a, str> {
    if annotations.is_empty() {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len() + annotations.len() * 12);
    let mut copied = 0;
    for annotation in annotations {
        log::trace!(
            "pixel equivalent {} at offset {}",
            annotation.label(),
            annotation.offset
        );
        out.push_str(&source[copied..annotation.offset]);
        out.push_str(&annotation.comment());
        copied = annotation.offset;
    }
    out.push_str(&source[copied..]);

    Cow::Owned(out)
}

/// Annotates every `rem` length of a declaration value.
///
/// ```rust
/// use vcss::pixels::add_pixel_equivalents_to_value;
///
/// assert_eq!(add_pixel_equivalents_to_value("0.5rem", 16.0), "0.5rem/* 8px */");
/// ```
pub fn add_pixel_equivalents_to_value(value: &str, root_font_size: f64) -> Cow<'_, str> {
    PixelAnnotator::new(root_font_size).annotate_value(value)
}

/// Annotates `rem` declaration values and `rem`/`em` media conditions.
///
/// ```rust
/// use vcss::pixels::add_pixel_equivalents_to_css;
///
/// let css = "@media (min-width: 2em) { a { top: 1rem } }";
/// assert_eq!(
///     add_pixel_equivalents_to_css(css, 20.0),
///     "@media (min-width: 2em/* 40px */) { a { top: 1rem/* 20px */ } }"
/// );
/// ```
pub fn add_pixel_equivalents_to_css(css: &str, root_font_size: f64) -> Cow<'_, str> {
    PixelAnnotator::new(root_font_size).annotate_css(css)
}
