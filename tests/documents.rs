//! Integration tests for documents, diagnostics and symbols.

use csslens::diagnostics::UNKNOWN_AT_RULES;
use csslens::{
    Diagnostic, DiagnosticSeverity, DocumentSymbol, Position, Range, TextDocument,
    filter_diagnostics, restore_symbols,
};

fn doc(text: &str) -> TextDocument {
    TextDocument::new("file:///app.css", "css", 3, text)
}

// ============================================================================
// POSITIONS
// ============================================================================

#[test]
fn test_offset_position_round_trip_per_line() {
    let d = doc(".a {\n  top: 1rem;\r\n}\rx");
    assert_eq!(d.line_count(), 4);
    for offset in [0, 4, 5, 12, 17, 19, 20, 21] {
        assert_eq!(d.offset_at(d.position_at(offset)), offset);
    }
    assert_eq!(d.position_at(20), Position::new(2, 1));
    assert_eq!(d.position_at(21), Position::new(3, 0));
}

#[test]
fn test_get_text() {
    let d = doc("@screen md {\n  .a {}\n}");
    let range = Range::new(Position::new(0, 0), Position::new(0, 10));
    assert_eq!(d.get_text(range), "@screen md");

    let whole = Range::new(Position::new(0, 0), Position::new(99, 0));
    assert_eq!(d.get_text(whole), d.text());
}

#[test]
fn test_reversed_range_is_empty() {
    let d = doc("abc");
    let range = Range::new(Position::new(0, 2), Position::new(0, 1));
    assert_eq!(d.get_text(range), "");
}

// ============================================================================
// VIRTUAL DOCUMENTS
// ============================================================================

#[test]
fn test_virtual_document_keeps_identity_and_positions() {
    let d = doc("@layer components {\n  .card { top: 0 }\n}");
    let v = d.to_virtual();

    assert_eq!(v.uri(), d.uri());
    assert_eq!(v.version(), d.version());
    assert_eq!(v.language_id(), "css");
    assert_eq!(v.line_count(), d.line_count());
    assert_eq!(v.text().lines().next(), Some("@media(_)         {"));

    let card = Range::new(Position::new(1, 2), Position::new(1, 7));
    assert_eq!(v.get_text(card), ".card");
    assert_eq!(d.get_text(card), ".card");
}

#[test]
fn test_virtual_document_with_wide_characters() {
    let d = doc("@variants 😀 {\n.é { top: 0 }\n}");
    let v = d.to_virtual();
    let brace = Range::new(Position::new(0, 13), Position::new(0, 14));
    assert_eq!(d.get_text(brace), "{");
    assert_eq!(v.get_text(brace), "{");
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

#[test]
fn test_filter_diagnostics_keeps_order_of_the_rest() {
    let range = Range::default();
    let diagnostics = vec![
        Diagnostic::new(range, DiagnosticSeverity::Warning, "Unknown at rule @tailwind")
            .with_code(UNKNOWN_AT_RULES),
        Diagnostic::new(range, DiagnosticSeverity::Error, "colon expected"),
        Diagnostic::new(range, DiagnosticSeverity::Warning, "Unknown at rule @apply")
            .with_code(UNKNOWN_AT_RULES),
        Diagnostic::new(range, DiagnosticSeverity::Warning, "Unknown at rule @foo")
            .with_code(UNKNOWN_AT_RULES),
    ];

    let messages: Vec<String> = filter_diagnostics(diagnostics)
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(messages, vec!["colon expected", "Unknown at rule @foo"]);
}

// ============================================================================
// SYMBOLS
// ============================================================================

#[test]
fn test_restore_symbols_from_original_text() {
    let d = doc("@screen md {\n  .a {}\n}\n.b {}");
    let mut symbols = vec![
        DocumentSymbol {
            name: "@media (_)".to_string(),
            range: Range::new(Position::new(0, 0), Position::new(2, 1)),
        },
        DocumentSymbol {
            name: ".b".to_string(),
            range: Range::new(Position::new(3, 0), Position::new(3, 5)),
        },
    ];

    restore_symbols(&mut symbols, &d);

    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["@screen md", ".b"]);
}

#[test]
fn test_restore_symbols_with_indented_range() {
    let d = doc(".a {}\n  @variants hover {\n    .b {}\n  }");
    let mut symbols = vec![DocumentSymbol {
        name: "@media (_)".to_string(),
        range: Range::new(Position::new(1, 0), Position::new(3, 3)),
    }];

    restore_symbols(&mut symbols, &d);
    assert_eq!(symbols[0].name, "@variants hover");
}

#[test]
fn test_restore_symbols_leaves_real_media_queries() {
    let d = doc("@media (_) {}");
    let mut symbols = vec![DocumentSymbol {
        name: "@media (_)".to_string(),
        range: Range::new(Position::new(0, 0), Position::new(0, 13)),
    }];

    restore_symbols(&mut symbols, &d);
    assert_eq!(symbols[0].name, "@media (_)");
}
