//! Integration tests for the editor facade.

use csslens::{CsslensError, Lens, Position, Settings, TextDocument};
use std::borrow::Cow;
use vcss::VcssError;

fn doc(text: &str) -> TextDocument {
    TextDocument::new("file:///app.css", "css", 1, text)
}

fn hint_list(lens: &Lens, text: &str) -> Vec<(u32, u32, String)> {
    lens.pixel_hints(&doc(text))
        .unwrap()
        .into_iter()
        .map(|h| (h.position.line, h.position.character, h.label))
        .collect()
}

// ============================================================================
// SETTINGS
// ============================================================================

#[test]
fn test_default_settings() {
    assert_eq!(Settings::default().root_font_size(), 16.0);
    assert_eq!(Lens::default().settings(), &Settings::default());
}

#[test]
fn test_invalid_root_font_sizes() {
    for size in [0.0, -4.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            Settings::with_root_font_size(size),
            Err(CsslensError::InvalidRootFontSize(_))
        ));
    }
}

// ============================================================================
// HOVERS
// ============================================================================

#[test]
fn test_hover_value() {
    let lens = Lens::new(Settings::with_root_font_size(20.0).unwrap());
    assert_eq!(lens.hover_value("0.5rem 1rem"), "0.5rem/* 10px */ 1rem/* 20px */");
    assert!(matches!(lens.hover_value("10px"), Cow::Borrowed("10px")));
}

#[test]
fn test_hover_css() {
    let lens = Lens::default();
    let css = ".btn {\n  padding: 0.5rem 1rem;\n}\n@media (max-width: 30em) {\n  .btn { margin: 0 }\n}";
    insta::assert_snapshot!(lens.hover_css(css).to_string(), @r"
    .btn {
      padding: 0.5rem/* 8px */ 1rem/* 16px */;
    }
    @media (max-width: 30em/* 480px */) {
      .btn { margin: 0 }
    }
    ");
}

#[test]
fn test_hover_css_falls_back_on_broken_css() {
    let lens = Lens::default();
    assert_eq!(lens.hover_css(".a { top: 1rem"), ".a { top: 1rem");
}

// ============================================================================
// PIXEL HINTS
// ============================================================================

#[test]
fn test_pixel_hints_positions() {
    let lens = Lens::default();
    let hints = hint_list(
        &lens,
        ".a { margin: 1rem 2rem }\n@media (min-width: 40em) {}",
    );
    assert_eq!(
        hints,
        vec![
            (0, 17, "16px".to_string()),
            (0, 22, "32px".to_string()),
            (1, 23, "640px".to_string()),
        ]
    );
}

#[test]
fn test_pixel_hints_inside_masked_at_rules() {
    let lens = Lens::default();
    let text = "@variants hover,\n  focus {\n  .a { margin: 1rem }\n}\n@screen md { .b { top: 2rem } }";
    let hints = hint_list(&lens, text);
    assert_eq!(
        hints,
        vec![(2, 19, "16px".to_string()), (4, 27, "32px".to_string())]
    );
}

#[test]
fn test_pixel_hints_count_utf16_units() {
    let lens = Lens::default();
    let hints = lens.pixel_hints(&doc(".😀 { top: 1rem }")).unwrap();
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].position, Position::new(0, 15));
}

#[test]
fn test_pixel_hints_report_analysis_errors() {
    let lens = Lens::default();
    let result = lens.pixel_hints(&doc(".a { top: 1rem"));
    assert!(matches!(
        result,
        Err(CsslensError::Css(VcssError::UnclosedBlock(_)))
    ));
}

#[test]
fn test_pixel_hints_empty_document() {
    assert!(Lens::default().pixel_hints(&doc("")).unwrap().is_empty());
}
