//! Text documents addressed the way editors address them.
//!
//! Editors send positions as a zero-based line plus a character offset in
//! UTF-16 code units. [`TextDocument`] converts between those positions and
//! byte offsets into its text, and produces the masked virtual copy handed
//! to CSS analysis.

use std::ops::Range as ByteRange;

/// A zero-based line and UTF-16 character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    uri: String,
    language_id: String,
    version: i32,
    text: String,
    /// Byte offset of the start of every line.
    line_offsets: Vec<usize>,
}

impl TextDocument {
    pub fn new(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        version: i32,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let line_offsets = compute_line_offsets(&text);
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            version,
            text,
            line_offsets,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// The masked copy of this document, with the same uri and version.
    ///
    /// Positions in the virtual document address the same characters as in
    /// this one, so results computed on it can be reported as-is.
    pub fn to_virtual(&self) -> TextDocument {
        let masked = vcss::mask(&self.text);
        TextDocument::new(
            self.uri.clone(),
            self.language_id.clone(),
            self.version,
            masked.into_owned(),
        )
    }

    /// Byte offset of `position`, clamped to the document and to the end of
    /// its line.
    pub fn offset_at(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_offsets.len() {
            return self.text.len();
        }

        let line_text = &self.text[self.line_range(line)];
        let mut units = 0u32;
        for (i, c) in line_text.char_indices() {
            if units >= position.character || c == '\n' || c == '\r' {
                return self.line_offsets[line] + i;
            }
            units += c.len_utf16() as u32;
        }
        self.line_offsets[line] + line_text.len()
    }

    /// Position of the byte offset `offset`, clamped to the document.
    ///
    /// Offsets inside a multi-byte character resolve to that character.
    pub fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self.line_offsets.partition_point(|&start| start <= offset) - 1;
        let character = vcss::mask::utf16_len(&self.text[self.line_offsets[line]..offset]);
        Position::new(line as u32, character as u32)
    }

    pub fn get_text(&self, range: Range) -> &str {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end).max(start);
        &self.text[start..end]
    }

    fn line_range(&self, line: usize) -> ByteRange<usize> {
        let start = self.line_offsets[line];
        let end = self
            .line_offsets
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        start..end
    }
}

/// Line starts after `\n`, `\r\n` and lone `\r`.
fn compute_line_offsets(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut offsets = vec![0];
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                i += 2;
                offsets.push(i);
            }
            b'\r' | b'\n' => {
                i += 1;
                offsets.push(i);
            }
            _ => i += 1,
        }
    }

    offsets
}
