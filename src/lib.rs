//! # csslens
//!
//! Editor-facing CSS support for Tailwind stylesheets, built on [`vcss`].
//!
//! - [`TextDocument`] tracks editor documents and maps UTF-16 positions to
//!   byte offsets.
//! - [`Lens`] produces virtual documents for generic CSS tooling, hover text
//!   with pixel equivalents and inline pixel hints.
//! - [`diagnostics`] and [`symbols`] clean up what generic CSS tooling
//!   reports about a virtual document.
//!
//! ```rust
//! use csslens::{Lens, Position, TextDocument};
//!
//! let doc = TextDocument::new("file:///app.css", "css", 1, "@screen md {\n  .a { top: 1rem }\n}");
//! let lens = Lens::default();
//!
//! assert!(lens.virtual_document(&doc).text().starts_with("@media(_)"));
//!
//! let hints = lens.pixel_hints(&doc).unwrap();
//! assert_eq!(hints[0].position, Position::new(1, 16));
//! assert_eq!(hints[0].label, "16px");
//! ```

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod lens;
pub mod log_init;
pub mod symbols;

pub use config::Settings;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, filter_diagnostics};
pub use document::{Position, Range, TextDocument};
pub use error::{CsslensError, Result};
pub use lens::{Lens, PixelHint};
pub use symbols::{DocumentSymbol, restore_symbol_name, restore_symbols};
