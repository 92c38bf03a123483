//! # VCSS - virtual CSS for editor tooling
//!
//! Text transforms that let generic CSS tooling work on Tailwind-flavoured
//! stylesheets without losing track of the original document.
//!
//! - **Masking**: [`mask::mask`] rewrites `@screen`, `@variants`,
//!   `@responsive` and `@layer` preludes into a parseable `@media(_)` while
//!   keeping every line break and, where possible, every column.
//! - **Pixel equivalents**: [`pixels::add_pixel_equivalents_to_value`] and
//!   [`pixels::add_pixel_equivalents_to_css`] append `/* 16px */` style
//!   comments to `rem` values and `rem`/`em` media conditions.
//!
//! ## Quick Start
//!
//! ```rust
//! use vcss::{add_pixel_equivalents_to_css, mask};
//!
//! let source = "@screen md {\n  .a { margin: 1rem; }\n}";
//!
//! let masked = mask(source);
//! assert_eq!(masked, "@media(_)  {\n  .a { margin: 1rem; }\n}");
//!
//! let annotated = add_pixel_equivalents_to_css(".a { margin: 1rem; }", 16.0);
//! assert_eq!(annotated, ".a { margin: 1rem/* 16px */; }");
//! ```
//!
//! Both transforms are pure and return the input unchanged (borrowed) when
//! there is nothing to do or the input cannot be analysed.
//!
//! ## Modules
//!
//! - [`mask`]: at-rule masking
//! - [`pixels`]: pixel-equivalent annotation
//! - [`parser`]: stylesheet, value and media query analysis
//! - [`error`]: error types for analysis failures

pub mod error;
pub mod mask;
pub mod parser;
pub mod pixels;

pub use error::VcssError;
pub use mask::mask;
pub use pixels::{
    Annotation, PixelAnnotator, add_pixel_equivalents_to_css, add_pixel_equivalents_to_value,
};
