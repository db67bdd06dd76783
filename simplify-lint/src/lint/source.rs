//! Row/column to byte offset mapping over module source text.

use simplify_repr::{Location, Range};

/// Source text with a precomputed line table.
#[derive(Debug, Clone)]
pub struct SourceText<'s> {
    text: &'s str,
    /// Byte offset where each row starts.
    line_starts: Vec<usize>,
}

impl<'s> SourceText<'s> {
    pub fn new(text: &'s str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    pub fn as_str(&self) -> &'s str {
        self.text
    }

    fn line(&self, row: u32) -> Option<&'s str> {
        let index = (row as usize).checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |next| next - 1);
        self.text.get(start..end)
    }

    /// Byte offset of a location. The column just past the last character of
    /// a row is valid (it points at the newline or end of text).
    pub fn offset(&self, location: Location) -> Option<usize> {
        let line = self.line(location.row)?;
        let line_start = self.line_starts[(location.row - 1) as usize];
        let column = (location.column as usize).checked_sub(1)?;
        if column == line.chars().count() {
            return Some(line_start + line.len());
        }
        line.char_indices()
            .nth(column)
            .map(|(byte, _)| line_start + byte)
    }

    /// Text covered by a range.
    pub fn slice(&self, range: Range) -> Option<&'s str> {
        let start = self.offset(range.start)?;
        let end = self.offset(range.end)?;
        self.text.get(start..end)
    }

    /// Text covered by a range, or the empty string when out of bounds.
    pub fn extract(&self, range: Range) -> &'s str {
        self.slice(range).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let source = SourceText::new("ab\ncd");
        assert_eq!(source.offset(Location::new(1, 1)), Some(0));
        assert_eq!(source.offset(Location::new(1, 3)), Some(2));
        assert_eq!(source.offset(Location::new(2, 2)), Some(4));
        assert_eq!(source.offset(Location::new(2, 3)), Some(5));
        assert_eq!(source.offset(Location::new(2, 4)), None);
        assert_eq!(source.offset(Location::new(3, 1)), None);
    }

    #[test]
    fn test_multibyte_columns() {
        let source = SourceText::new("a = \"é\" ++ b");
        assert_eq!(
            source.slice(Range::from_coords(1, 5, 1, 8)),
            Some("\"é\"")
        );
    }

    #[test]
    fn test_extract_across_lines() {
        let source = SourceText::new("a =\n    b");
        assert_eq!(source.extract(Range::from_coords(1, 3, 2, 6)), "=\n    b");
        assert_eq!(source.extract(Range::from_coords(9, 1, 9, 2)), "");
    }
}
