//! The entry point editor features go through.
//!
//! A [`Lens`] pairs the current [`Settings`] with a pixel annotator and
//! answers the questions a language server asks about a CSS document: what
//! should generic CSS tooling see, what does a hover show, where do inline
//! pixel hints go.

use crate::config::Settings;
use crate::document::{Position, TextDocument};
use crate::error::Result;
use std::borrow::Cow;
use vcss::PixelAnnotator;

/// An inline hint showing the pixel value of the length ending at `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelHint {
    pub position: Position,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Lens {
    settings: Settings,
    annotator: PixelAnnotator,
}

impl Default for Lens {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Lens {
    pub fn new(settings: Settings) -> Self {
        Self {
            annotator: PixelAnnotator::new(settings.root_font_size()),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings used by later requests.
    pub fn configure(&mut self, settings: Settings) {
        log::debug!("root font size set to {}", settings.root_font_size());
        *self = Self::new(settings);
    }

    /// The document generic CSS tooling should analyse in place of `document`.
    pub fn virtual_document(&self, document: &TextDocument) -> TextDocument {
        document.to_virtual()
    }

    /// Hover text for a block of CSS, with pixel equivalents appended.
    pub fn hover_css<'a>(&self, css: &'a str) -> Cow<'a, str> {
        self.annotator.annotate_css(css)
    }

    /// Hover text for a single declaration value.
    pub fn hover_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        self.annotator.annotate_value(value)
    }

    /// Inline pixel hints for every annotated length of `document`.
    ///
    /// Analysis runs on the virtual document, so masked at-rules do not get
    /// in the way; positions are valid in the original document.
    pub fn pixel_hints(&self, document: &TextDocument) -> Result<Vec<PixelHint>> {
        let virtual_document = self.virtual_document(document);
        let annotations = self.annotator.collect_css(virtual_document.text())?;

        Ok(annotations
            .iter()
            .map(|annotation| PixelHint {
                position: virtual_document.position_at(annotation.offset),
                label: annotation.label(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_changes_the_root_font_size() {
        let mut lens = Lens::default();
        assert_eq!(lens.hover_value("1rem"), "1rem/* 16px */");

        lens.configure(Settings::with_root_font_size(10.0).unwrap());
        assert_eq!(lens.settings().root_font_size(), 10.0);
        assert_eq!(lens.hover_value("1rem"), "1rem/* 10px */");
    }
}
