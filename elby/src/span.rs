/// Location of a lexeme inside the source buffer.
///
/// `start` and `len` are byte offsets, `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The text this span covers in `source`, if it lies within it.
    pub fn slice<'src>(&self, source: &'src str) -> Option<&'src str> {
        source.get(self.start..self.end())
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            len: 0,
            line: 1,
            column: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_returns_covered_text() {
        let span = Span { start: 4, len: 1, line: 1, column: 5 };
        assert_eq!(span.slice("let a = 0"), Some("a"));
        assert_eq!(span.end(), 5);
    }

    #[test]
    fn slice_out_of_range_is_none() {
        let span = Span { start: 8, len: 4, ..Span::default() };
        assert_eq!(span.slice("let a"), None);
    }
}
