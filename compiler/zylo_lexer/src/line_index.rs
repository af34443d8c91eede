//! Byte offset to line/column conversion.

use zylo_ir::Span;

/// Start offsets of every line in a source text.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { line_starts }
    }

    /// 1-based `(line, column)` of a byte offset; columns count characters.
    pub fn position(&self, source: &str, offset: usize) -> (u32, u32) {
        let offset = offset.min(source.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let col = source
            .get(line_start..offset)
            .map_or(offset - line_start, |text| text.chars().count());
        (to_u32(line + 1), to_u32(col + 1))
    }

    /// Span covering a byte range.
    pub fn span(&self, source: &str, range: std::ops::Range<usize>) -> Span {
        let (start_line, start_col) = self.position(source, range.start);
        let (end_line, end_col) = self.position(source, range.end);
        Span::new(start_line, start_col, end_line, end_col)
    }
}

#[inline]
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
