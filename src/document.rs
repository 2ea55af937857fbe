//! Line-addressable document snapshot

use crate::types::Position;

/// Immutable view over the text of an open document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    lines: Vec<String>,
}

impl DocumentView {
    /// Split source text into lines, accepting both `\n` and `\r\n`
    pub fn new(source: &str) -> Self {
        let mut lines: Vec<String> = source
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Full text of a line
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.line < self.lines.len()
    }

    /// Text from the start of the cursor's line up to the cursor
    pub fn text_before(&self, position: Position) -> &str {
        let Some(line) = self.line(position.line) else {
            return "";
        };
        &line[..byte_index(line, position.character)]
    }

    /// The character immediately left of the cursor
    pub fn char_before(&self, position: Position) -> Option<char> {
        self.text_before(position).chars().next_back()
    }

    /// Absolute character offset of a position, newlines count as one
    pub fn offset_at(&self, position: Position) -> usize {
        let preceding: usize = self
            .lines
            .iter()
            .take(position.line)
            .map(|l| l.chars().count() + 1)
            .sum();
        let column = self
            .line(position.line)
            .map(|l| position.character.min(l.chars().count()))
            .unwrap_or(0);
        preceding + column
    }

    /// Last whitespace-separated token before the cursor
    pub fn typed_word_before(&self, position: Position) -> &str {
        let before = self.text_before(position);
        before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default()
    }
}

/// Byte offset of a character column, clamped to the end of the line
pub(crate) fn byte_index(text: &str, character: usize) -> usize {
    text.char_indices()
        .nth(character)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let doc = DocumentView::new("abc\r\ndef\nghi");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(0), Some("abc"));
        assert_eq!(doc.line(1), Some("def"));
        assert_eq!(doc.line(3), None);
    }

    #[test]
    fn test_empty_source_has_one_line() {
        let doc = DocumentView::new("");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.text_before(Position::new(0, 5)), "");
    }

    #[test]
    fn test_text_before_clamps_column() {
        let doc = DocumentView::new("<el-button");
        assert_eq!(doc.text_before(Position::new(0, 3)), "<el");
        assert_eq!(doc.text_before(Position::new(0, 100)), "<el-button");
        assert_eq!(doc.text_before(Position::new(4, 1)), "");
    }

    #[test]
    fn test_text_before_multibyte() {
        let doc = DocumentView::new("<el-tag>标签 <");
        assert_eq!(doc.text_before(Position::new(0, 10)), "<el-tag>标签");
        assert_eq!(doc.char_before(Position::new(0, 12)), Some('<'));
    }

    #[test]
    fn test_offset_at() {
        let doc = DocumentView::new("abc\ndef\nghi");
        assert_eq!(doc.offset_at(Position::new(0, 0)), 0);
        assert_eq!(doc.offset_at(Position::new(1, 0)), 4);
        assert_eq!(doc.offset_at(Position::new(2, 1)), 9);
        assert_eq!(doc.offset_at(Position::new(2, 50)), 11);
    }

    #[test]
    fn test_typed_word_before() {
        let doc = DocumentView::new("<el-button @cl");
        assert_eq!(doc.typed_word_before(Position::new(0, 14)), "@cl");
        assert_eq!(doc.typed_word_before(Position::new(0, 11)), "");
    }
}
