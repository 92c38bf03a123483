//! Settings shared by every request.

use crate::error::{CsslensError, Result};

/// Root font size used when the client does not configure one.
pub const DEFAULT_ROOT_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    root_font_size: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
        }
    }
}

impl Settings {
    /// Settings with a custom root font size, in pixels per `rem`.
    ///
    /// ```rust
    /// use csslens::Settings;
    ///
    /// assert_eq!(Settings::with_root_font_size(10.0).unwrap().root_font_size(), 10.0);
    /// assert!(Settings::with_root_font_size(0.0).is_err());
    /// ```
    pub fn with_root_font_size(root_font_size: f64) -> Result<Self> {
        if !root_font_size.is_finite() || root_font_size <= 0.0 {
            return Err(CsslensError::InvalidRootFontSize(root_font_size));
        }
        Ok(Self { root_font_size })
    }

    pub fn root_font_size(&self) -> f64 {
        self.root_font_size
    }
}
