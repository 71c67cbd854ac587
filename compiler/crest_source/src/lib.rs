use std::cmp::Ordering;

/// Line-indexed view over a source buffer, used when rendering
/// diagnostics with their surrounding line.
pub struct Source<'src> {
    src: &'src str,
    lines: Vec<Line>,
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(src: &'a str) -> Self {
        Self {
            lines: Self::lines_matrix(src),
            src,
        }
    }
}

impl<'a> Source<'a> {
    pub fn get_line_contents(&self, index: usize) -> Option<&'a str> {
        let line = self.lines.get(index)?;
        self.src.get(line.offset..line.offset + line.width)
    }

    /// Convert a byte offset to 1-based line and column numbers
    pub fn get_line_col(&self, offset: usize) -> Option<(usize, usize)> {
        self.get_line_containing_offset(offset).map(|line_index| {
            (line_index + 1, offset - self.lines[line_index].offset + 1)
        })
    }

    /// Get line index by byte offset in O(log n)
    pub fn get_line_containing_offset(&self, offset: usize) -> Option<usize> {
        self.lines
            .binary_search_by(|line| {
                if line.contains(offset) {
                    Ordering::Equal
                } else if offset < line.offset {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()
    }

    fn lines_matrix(src: &'a str) -> Vec<Line> {
        let mut lines_matrix = Vec::new();
        let mut offset = 0;

        for line in src.split('\n') {
            let width = line.len();
            lines_matrix.push(Line { offset, width });
            offset += width + 1;
        }

        lines_matrix
    }
}

#[derive(Debug)]
struct Line {
    offset: usize,
    width: usize,
}

impl Line {
    /// Check whether a line contains a byte offset. The trailing newline
    /// counts as part of the line so end-of-line spans still resolve.
    fn contains(&self, offset: usize) -> bool {
        offset >= self.offset && offset <= self.offset + self.width
    }
}
